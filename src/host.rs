//! Host-environment capabilities.
//!
//! Wraps the window-system singletons (viewport size, fullscreen state)
//! behind a trait so the fullscreen state machine can be exercised against a
//! test double.

use std::sync::Arc;

use winit::window::{Fullscreen, Window};

/// Cap on the device pixel ratio used for the render surface, bounding GPU
/// fill cost on high-density displays.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Current host window dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Render-surface size after capping the device pixel ratio at
    /// [`MAX_PIXEL_RATIO`]. The viewport itself always tracks the raw window
    /// size; only the surface shrinks.
    pub fn render_size(&self, scale_factor: f64) -> (u32, u32) {
        if scale_factor <= MAX_PIXEL_RATIO {
            return (self.width, self.height);
        }
        let shrink = MAX_PIXEL_RATIO / scale_factor;
        (
            ((self.width as f64 * shrink).round() as u32).max(1),
            ((self.height as f64 * shrink).round() as u32).max(1),
        )
    }
}

/// Capabilities the app needs from its host: viewport queries and the
/// fullscreen flag/actions.
pub trait HostEnvironment {
    fn viewport(&self) -> Viewport;
    fn fullscreen_supported(&self) -> bool;
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self);
    fn exit_fullscreen(&mut self);
}

/// Two-state fullscreen machine: Windowed ⇄ Fullscreen on each call.
/// Silent no-op when the host lacks fullscreen support. Returns whether a
/// transition was requested.
pub fn toggle_fullscreen(host: &mut dyn HostEnvironment) -> bool {
    if !host.fullscreen_supported() {
        log::debug!("fullscreen not supported by host; ignoring toggle");
        return false;
    }

    if host.is_fullscreen() {
        host.exit_fullscreen();
    } else {
        host.request_fullscreen();
    }
    true
}

/// Production host backed by a winit window.
pub struct WinitHost {
    window: Arc<Window>,
}

impl WinitHost {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl HostEnvironment for WinitHost {
    fn viewport(&self) -> Viewport {
        let size = self.window.inner_size();
        Viewport::new(size.width, size.height)
    }

    fn fullscreen_supported(&self) -> bool {
        // winit exposes no capability flag; a window without a monitor
        // (headless or mid-teardown) cannot go fullscreen.
        self.window.current_monitor().is_some()
    }

    fn is_fullscreen(&self) -> bool {
        self.window.fullscreen().is_some()
    }

    fn request_fullscreen(&mut self) {
        self.window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    fn exit_fullscreen(&mut self) {
        self.window.set_fullscreen(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test double recording fullscreen requests.
    struct FakeHost {
        supported: bool,
        fullscreen: bool,
        requests: u32,
        exits: u32,
    }

    impl FakeHost {
        fn new(supported: bool) -> Self {
            Self {
                supported,
                fullscreen: false,
                requests: 0,
                exits: 0,
            }
        }
    }

    impl HostEnvironment for FakeHost {
        fn viewport(&self) -> Viewport {
            Viewport::new(1200, 800)
        }

        fn fullscreen_supported(&self) -> bool {
            self.supported
        }

        fn is_fullscreen(&self) -> bool {
            self.fullscreen
        }

        fn request_fullscreen(&mut self) {
            self.requests += 1;
            self.fullscreen = true;
        }

        fn exit_fullscreen(&mut self) {
            self.exits += 1;
            self.fullscreen = false;
        }
    }

    #[test]
    fn test_toggle_enters_then_exits() {
        let mut host = FakeHost::new(true);

        assert!(toggle_fullscreen(&mut host));
        assert!(host.is_fullscreen());
        assert_eq!(host.requests, 1);

        assert!(toggle_fullscreen(&mut host));
        assert!(!host.is_fullscreen());
        assert_eq!(host.exits, 1);
    }

    #[test]
    fn test_unsupported_host_is_a_no_op() {
        let mut host = FakeHost::new(false);
        for _ in 0..3 {
            assert!(!toggle_fullscreen(&mut host));
        }
        assert!(!host.is_fullscreen());
        assert_eq!(host.requests, 0);
        assert_eq!(host.exits, 0);
    }

    #[test]
    fn test_viewport_aspect() {
        assert_eq!(Viewport::new(1920, 1080).aspect(), 1920.0 / 1080.0);
        // Degenerate height doesn't divide by zero
        assert_eq!(Viewport::new(100, 0).aspect(), 100.0);
    }

    #[test]
    fn test_render_size_caps_pixel_ratio() {
        let viewport = Viewport::new(3000, 2000);
        assert_eq!(viewport.render_size(1.0), (3000, 2000));
        assert_eq!(viewport.render_size(2.0), (3000, 2000));
        assert_eq!(viewport.render_size(3.0), (2000, 1333));
    }
}
