/// Failures of catalog operations.
///
/// An empty page and an exhausted quiz pool are kept apart from missing
/// resources so callers can decide how to present them.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("page {page} holds no questions")]
    EmptyPage { page: i64 },

    #[error("category {category} has no questions to draw from")]
    EmptyPool { category: i64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage failure: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl CatalogError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}
