//! Store configuration.
//!
//! The deployment environment selects which collections the store reads and writes
//! (`bookings_dev` vs `bookings_prod`). The value is built once by the embedding application and
//! handed to the store at construction.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Environment variable consulted by [StoreConfig::from_env].
pub const ENVIRONMENT_VAR: &str = "POOJA_BOOKING_ENV";

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Development data
    #[default]
    Dev,
    /// Production data
    Prod,
}

impl Environment {
    /// Collection suffix of the environment.
    pub const fn suffix(self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Collections the application keeps per environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Booking records
    Bookings,
    /// Member roster
    Members,
    /// Monthly contributions
    Contributions,
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Environment whose collections are used.
    ///
    /// Default: `Dev`
    pub environment: Environment,

    /// Name of the booking collection before the environment suffix.
    ///
    /// Default: `"bookings"`
    pub collection_prefix: String,
}

impl StoreConfig {
    /// Create a configuration for `environment` with default collection names.
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            collection_prefix: "bookings".to_string(),
        }
    }

    /// Reads the environment from [ENVIRONMENT_VAR]; unset means `Dev`.
    ///
    /// # Errors
    ///
    /// [ConfigError::UnknownEnvironment] when the variable holds anything but `dev` or `prod`.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(ENVIRONMENT_VAR) {
            Ok(value) => Ok(Self::new(value.parse()?)),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Set the booking collection prefix.
    #[must_use]
    pub fn with_collection_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.collection_prefix = prefix.into();
        self
    }

    /// Name of the booking collection, e.g. `bookings_prod`.
    pub fn collection(&self) -> String {
        self.collection_for(Collection::Bookings)
    }

    /// Name of any of the application's collections in this environment.
    pub fn collection_for(&self, collection: Collection) -> String {
        let prefix = match collection {
            Collection::Bookings => self.collection_prefix.as_str(),
            Collection::Members => "members",
            Collection::Contributions => "contributions",
        };
        format!("{prefix}_{}", self.environment.suffix())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Environment::Dev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_follow_environment() {
        let prod = StoreConfig::new(Environment::Prod);
        assert_eq!(prod.collection(), "bookings_prod");
        assert_eq!(prod.collection_for(Collection::Contributions), "contributions_prod");
        assert_eq!(StoreConfig::default().collection(), "bookings_dev");
    }

    #[test]
    fn environment_parsing_is_case_insensitive() {
        assert_eq!("PROD".parse::<Environment>(), Ok(Environment::Prod));
        assert_eq!(
            "staging".parse::<Environment>(),
            Err(ConfigError::UnknownEnvironment("staging".to_string()))
        );
    }
}
