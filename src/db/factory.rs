//! Repository factory for dependency injection.
//!
//! Creates repository instances from runtime configuration. The returned
//! `Arc<dyn BookingRepository>` is handed to the application state at
//! startup; nothing in the crate reaches for a global handle.

use std::sync::Arc;

use super::repository::{BookingRepository, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory repository for local development and tests
    Local,
}

impl RepositoryType {
    /// Parse repository type from string.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }

    /// Get repository type from the `REPOSITORY_TYPE` environment variable.
    /// Defaults to `Local` if not set.
    pub fn from_env() -> Self {
        std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|s| Self::parse(&s).ok())
            .unwrap_or(Self::Local)
    }
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn BookingRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Arc::new(super::repositories::LocalRepository::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository_type() {
        assert_eq!(RepositoryType::parse("local"), Ok(RepositoryType::Local));
        assert_eq!(RepositoryType::parse("LOCAL"), Ok(RepositoryType::Local));
        assert!(RepositoryType::parse("postgres").is_err());
    }

    #[test]
    fn test_create_local_repository() {
        let repo = RepositoryFactory::create(RepositoryType::Local);
        assert!(repo.is_ok());
    }
}
