use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A categorical input is outside the vocabulary the model was trained
    /// on. The engine never guesses or substitutes a default here.
    #[error("unknown {dimension} value: '{value}'")]
    UnknownCategory {
        dimension: &'static str,
        value: String,
    },

    /// Startup-time misconfiguration (column order mismatch, missing
    /// vocabulary, unloadable artifact). Fatal: the engine must not serve.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A request parameter that is missing or not a number.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
