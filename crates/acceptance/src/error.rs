/// Failure while driving pages.
///
/// Every variant is treated as transient by the wait helpers until the
/// polling budget runs out.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("No page has been loaded yet")]
    NoPage,

    #[error("Unable to locate element: {0}")]
    ElementNotFound(String),

    #[error("Row {expected:?} not found in table; rows were {rows:?}")]
    RowMissing { expected: String, rows: Vec<String> },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
