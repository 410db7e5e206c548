use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    config::LoadError,
    domain::error::DomainError,
    infra::{error::InfraError, graphql::IngestError},
};

/// Flattened `source()` chain of an error, outermost first.
pub fn error_chain(error: &dyn StdError) -> Vec<String> {
    let mut messages = vec![error.to_string()];
    let mut current = error.source();
    while let Some(inner) = current {
        messages.push(inner.to_string());
        current = inner.source();
    }
    messages
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to ingest content: {0}")]
    Ingest(#[from] IngestError),
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Process exit status (sysexits.h conventions).
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Domain(_) | AppError::Ingest(_) => 65,
            AppError::Infra(InfraError::Io(_)) => 74,
            AppError::Infra(InfraError::Json(_)) => 65,
            AppError::Config(_) => 78,
            AppError::Infra(InfraError::Telemetry(_)) | AppError::Unexpected(_) => 70,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_chain_collects_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "bundle.json missing");
        let error = AppError::from(InfraError::from(io));
        let chain = error_chain(&error);
        assert_eq!(chain.first().map(String::as_str), Some("io error: bundle.json missing"));
        assert_eq!(error.exit_code(), 74);
    }

    #[test]
    fn domain_errors_map_to_data_error() {
        let error = AppError::from(DomainError::invalid_argument("ratings", "empty"));
        assert_eq!(error.exit_code(), 65);
    }
}
