use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("no text to analyze")]
    EmptyInput,

    #[error("unknown readability metric: {0}")]
    UnknownMetric(String),

    #[error("embedding model error: {0}")]
    Embedding(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
