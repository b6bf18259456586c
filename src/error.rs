use miette::Diagnostic;
use thiserror::Error;

/// Main error type for assets-gen operations
#[derive(Error, Diagnostic, Debug)]
pub enum AssetsGenError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(assets_gen::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(assets_gen::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Watch error: {message}")]
    #[diagnostic(code(assets_gen::watch))]
    Watch {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl AssetsGenError {
    /// Build an [`AssetsGenError::Io`] from a path and an underlying error.
    pub fn io(
        path: impl Into<std::path::PathBuf>,
        context: &str,
        err: impl std::fmt::Display,
    ) -> Self {
        AssetsGenError::Io {
            path: path.into(),
            message: format!("{}: {}", context, err),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssetsGenError>;
