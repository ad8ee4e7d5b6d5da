//! Error types for app and config construction.

use thiserror::Error;

/// Validation failures caught while constructing a scene configuration.
///
/// The debug-panel binding table is checked once, up front, so a bad range
/// can never reach a live widget.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parameter `{id}`: invalid range [{min}, {max}]")]
    InvalidRange { id: String, min: f32, max: f32 },

    #[error("parameter `{id}`: step must be positive and fit the range")]
    InvalidStep { id: String },

    #[error("duplicate parameter id `{id}`")]
    DuplicateParam { id: String },
}
