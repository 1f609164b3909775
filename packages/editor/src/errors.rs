//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("malformed page payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Render(#[from] pagecraft_evaluator::RenderError),
}
