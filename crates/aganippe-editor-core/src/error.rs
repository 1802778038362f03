//! Error types for rendering.

use thiserror::Error;

use crate::patch::PatchError;
use crate::platform::PlatformError;
use crate::token::TokenError;

/// Errors that can abort a render pass.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RenderError {
    /// Tokenizer produced something the renderer cannot handle.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The patch engine failed to apply the new tree.
    #[error("patch failed: {0}")]
    Patch(#[from] PatchError),

    /// Selection could not be restored.
    #[error("cursor restoration failed: {0}")]
    Platform(#[from] PlatformError),
}

/// Configuration parsing errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}
