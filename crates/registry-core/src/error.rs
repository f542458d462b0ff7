use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Referenced company does not exist in the store.
    #[error("{0}")]
    NotFound(String),

    /// Malformed request parameters (id lists, missing industry code).
    #[error("{0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl RegistryError {
    pub fn company_not_found() -> Self {
        RegistryError::NotFound("A cég nem található".to_string())
    }

    /// True for errors caused by the request rather than by the system.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RegistryError::NotFound(_) | RegistryError::InvalidInput(_))
    }

    /// HTTP status the request layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            RegistryError::NotFound(_) => 404,
            RegistryError::InvalidInput(_) => 400,
            RegistryError::Storage(_) => 500,
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
