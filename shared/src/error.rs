use thiserror::Error;

/// Failure to read a value embedded in page markup.
///
/// Presenters never surface these to the user; callers pick a default
/// through the `*_or_default` helpers instead.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The attribute was not present on the element
    #[error("attribute `{0}` is missing")]
    Missing(&'static str),

    /// The attribute held text that is not valid JSON for the expected shape
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// An integer attribute could not be parsed
    #[error("attribute `{attribute}` is not an integer: {value:?}")]
    InvalidNumber {
        attribute: &'static str,
        value: String,
    },
}

/// Failure while drawing a chart through a [`crate::chart::ChartRenderer`].
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("canvas is not available for drawing")]
    CanvasUnavailable,

    #[error("chart backend error: {0}")]
    Backend(String),
}
