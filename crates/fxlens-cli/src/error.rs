use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] fxlens_core::ValidationError),

    #[error(transparent)]
    Storage(#[from] fxlens_core::WarehouseError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<fxlens_core::CoreError> for CliError {
    fn from(error: fxlens_core::CoreError) -> Self {
        match error {
            fxlens_core::CoreError::Validation(error) => Self::Validation(error),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Serialization(_) => 4,
            Self::Storage(_) => 7,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxlens_core::{CoreError, ValidationError};

    #[test]
    fn exit_codes_follow_category() {
        let validation: CliError = CoreError::from(ValidationError::InvalidPeriod { days: 0 }).into();
        assert_eq!(validation.exit_code(), 2);

        let storage = CliError::from(fxlens_core::WarehouseError::Rejected(String::from("x")));
        assert_eq!(storage.exit_code(), 7);

        let io = CliError::from(std::io::Error::other("closed pipe"));
        assert_eq!(io.exit_code(), 10);
    }
}
