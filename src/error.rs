use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DexError {
    #[error("no such record: {0}")]
    NotFound(String),
    #[error("no record selected")]
    NoSelection,
    #[error("duplicate record name: {0}")]
    DuplicateName(String),
}
