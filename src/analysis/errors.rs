/// Errors raised while reading an analysis response
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Malformed analysis response: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("Failed to read analysis response: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
