use crate::core::catalog::descriptor::GroupId;
use crate::core::catalog::registry::CatalogError;
use crate::core::pattern::PatternError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid catalog: {source}")]
    Catalog {
        #[from]
        source: CatalogError,
    },

    #[error("Failed to compile pattern {pattern} of group {group}: {source}")]
    Pattern {
        group: GroupId,
        pattern: usize,
        source: PatternError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
