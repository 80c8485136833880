//! Error types for scene operations.

use thiserror::Error;

/// Errors produced by the scene store and the tool-name boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// A tool name arriving from the host did not match any known tool.
    #[error("invalid tool name: {0:?}")]
    InvalidTool(String),

    /// An element id outside the scene's current range was mutated.
    #[error("element id {id} out of range (scene has {len} elements)")]
    IndexOutOfRange { id: usize, len: usize },
}
