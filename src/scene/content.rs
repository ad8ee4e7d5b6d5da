//! Asynchronous scene content.
//!
//! The torus-field demo populates part of its scene through a loader that
//! resolves after construction. A failed load leaves the scene in its
//! pre-load state; the error is logged, nothing retries.

use futures::future::BoxFuture;

use super::node::Node;

/// Nodes produced by a loader, split by where they attach.
#[derive(Default)]
pub struct LoadedContent {
    /// Appended to the animated group (rotates and bobs with it).
    pub animated: Vec<Node>,
    /// Appended to the scene root (static scenery).
    pub root: Vec<Node>,
}

pub type ContentResult = anyhow::Result<LoadedContent>;

/// Deferred content producer attached to a [`crate::config::SceneConfig`].
pub struct ContentLoader {
    label: String,
    load: Box<dyn FnOnce() -> BoxFuture<'static, ContentResult> + Send>,
}

impl ContentLoader {
    pub fn new<F>(label: &str, load: F) -> Self
    where
        F: FnOnce() -> BoxFuture<'static, ContentResult> + Send + 'static,
    {
        Self {
            label: label.to_string(),
            load: Box::new(load),
        }
    }

    /// Wraps a synchronous producer in an already-resolved future.
    pub fn from_fn<F>(label: &str, f: F) -> Self
    where
        F: FnOnce() -> ContentResult + Send + 'static,
    {
        Self::new(label, move || Box::pin(futures::future::ready(f())))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Resolves the content on the calling thread.
    pub fn run_blocking(self) -> ContentResult {
        pollster::block_on((self.load)())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::node::Group;

    #[test]
    fn test_sync_loader_resolves() {
        let loader = ContentLoader::from_fn("donuts", || {
            Ok(LoadedContent {
                animated: vec![Node::Group(Group::new("loaded"))],
                root: Vec::new(),
            })
        });
        assert_eq!(loader.label(), "donuts");
        let content = loader.run_blocking().unwrap();
        assert_eq!(content.animated.len(), 1);
        assert!(content.root.is_empty());
    }

    #[test]
    fn test_failed_loader_surfaces_error() {
        let loader = ContentLoader::from_fn("broken", || anyhow::bail!("asset missing"));
        assert!(loader.run_blocking().is_err());
    }
}
