use crate::{config::ConfigError, form::FormError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config Error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Import Error: {0}")]
    ImportError(#[from] sdk::ImportError),

    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("No message at index {0}")]
    MissingMessage(usize),

    #[error("Message failed validation with {} problems", .0.len())]
    Invalid(Vec<FormError>),
}

impl Error {
    /// Individual problems to show the user, one per line
    pub fn details(&self) -> Vec<String> {
        match self {
            Error::ImportError(e) => e.messages(),
            Error::Invalid(errors) => errors.iter().map(ToString::to_string).collect(),
            _ => vec![self.to_string()],
        }
    }
}
