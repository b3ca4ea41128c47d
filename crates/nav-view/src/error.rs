//! Rendering errors.

use nav_tree::NavigationError;

/// Error returned while building a view or rendering its template.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The `root` option did not resolve, or had the wrong type.
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    /// Template lookup or evaluation failed.
    #[error("Template error in {name}: {message}")]
    Template {
        /// Template name, e.g. `default/Menu`.
        name: String,
        message: String,
    },
    /// Context could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
