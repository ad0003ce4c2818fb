use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown entity kind: {0}")]
    UnknownEntity(String),
    #[error("unknown semantic type: {0}")]
    UnknownSemanticType(String),
    #[error("unknown body kind: {0}")]
    UnknownBodyKind(String),
}
