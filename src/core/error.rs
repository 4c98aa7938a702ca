use thiserror::Error;

/// Errors that can occur while extracting, storing or ingesting invoices.
///
/// Every failure is returned as a value so a batch of files can continue
/// past a bad document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FacturaError {
    /// The input is not well-formed XML.
    #[error("invalid XML: {0}")]
    Xml(String),

    /// The PDF could not be loaded or read.
    #[error("could not read PDF: {0}")]
    Pdf(String),

    /// A required numeric attribute holds text that is not a number.
    #[error("invalid amount in {field}: '{value}'")]
    InvalidAmount {
        /// Attribute name (e.g. "SubTotal").
        field: String,
        /// The raw attribute text.
        value: String,
    },

    /// Neither a company name nor a non-zero total was found in the PDF text.
    #[error("no recognizable data found in PDF")]
    NoRecognizableData,

    /// File extension is neither `.xml` nor `.pdf`.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Input exceeds the configured size limit.
    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },

    /// Reading the input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage sink rejected an operation.
    #[error("storage error: {0}")]
    Storage(String),
}

impl FacturaError {
    pub(crate) fn invalid_amount(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidAmount {
            field: field.into(),
            value: value.into(),
        }
    }
}
