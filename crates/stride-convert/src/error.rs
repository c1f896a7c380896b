use stride_syntax::ScanError;

/// Fatal conversion failures. Recoverable problems are reported as
/// [`crate::ConversionWarning`]s instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("parse failed at offset {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("unbalanced `{event}` event at offset {position}")]
    UnbalancedEvents { event: &'static str, position: usize },

    #[error("invalid conversion options: {0}")]
    Config(String),
}

impl From<ScanError> for ConvertError {
    fn from(err: ScanError) -> Self {
        ConvertError::Parse {
            position: err.position,
            message: err.message,
        }
    }
}
