use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

mod administrators;
mod base_paths;
mod database;
mod dictionary;
mod identity;
mod local_storage;
mod logging;
mod review;

pub use administrators::*;
pub use base_paths::*;
pub use database::*;
pub use dictionary::*;
pub use identity::*;
pub use local_storage::*;
pub use logging::*;
pub use review::*;

use crate::traits::{Resolve, ResolveWithContext, TryResolve, TryResolveWithContext};
use crate::utilities::get_default_configuration_file_path;
use crate::{ConfigurationLoadingError, ConfigurationResolutionError};



#[derive(Deserialize, Debug)]
pub(crate) struct UnresolvedConfiguration {
    /// Base paths.
    base_paths: UnresolvedBasePathsConfiguration,

    /// Logging-related configuration.
    logging: UnresolvedLoggingConfiguration,

    /// Guest-mode (local) storage configuration.
    local_storage: UnresolvedLocalStorageConfiguration,

    /// Configuration related to the remote database (optional).
    database: Option<UnresolvedDatabaseConfiguration>,

    /// Identity provider configuration (optional).
    identity: Option<UnresolvedIdentityConfiguration>,

    /// Dictionary lookup API configuration.
    #[serde(default)]
    dictionary: UnresolvedDictionaryConfiguration,

    /// Administrator accounts.
    #[serde(default)]
    administrators: UnresolvedAdministratorsConfiguration,

    /// Review and search configuration.
    #[serde(default)]
    review: UnresolvedReviewConfiguration,
}


/// The entire Lexicard configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// This is the file path this [`Configuration`] instance was loaded from.
    pub configuration_file_path: PathBuf,

    /// Base paths
    pub base_paths: BasePathsConfiguration,

    /// Logging-related configuration.
    pub logging: LoggingConfiguration,

    /// Guest-mode (local) storage configuration.
    pub local_storage: LocalStorageConfiguration,

    /// Configuration related to the remote database.
    /// If missing, only guest mode is available.
    pub database: Option<DatabaseConfiguration>,

    /// Identity provider configuration.
    /// If missing, only guest mode is available.
    pub identity: Option<IdentityConfiguration>,

    /// Dictionary lookup API configuration.
    pub dictionary: DictionaryConfiguration,

    /// Administrator accounts.
    pub administrators: AdministratorsConfiguration,

    /// Review and search configuration.
    pub review: ReviewConfiguration,
}



pub(crate) struct ConfigurationResolutionContext {
    configuration_file_path: PathBuf,
}


impl<'r> TryResolveWithContext<'r> for UnresolvedConfiguration {
    type Resolved = Configuration;
    type Context = ConfigurationResolutionContext;
    type Error = ConfigurationResolutionError;

    fn try_resolve_with_context(
        self,
        context: Self::Context,
    ) -> Result<Self::Resolved, Self::Error> {
        let base_paths = self.base_paths.resolve();
        let logging = self.logging.try_resolve_with_context(&base_paths)?;
        let local_storage = self.local_storage.resolve_with_context(&base_paths);
        let database = self.database.map(Resolve::resolve);
        let identity = self.identity.map(TryResolve::try_resolve).transpose()?;
        let dictionary = self.dictionary.try_resolve()?;
        let administrators = self.administrators.resolve();
        let review = self.review.resolve();

        Ok(Configuration {
            configuration_file_path: context.configuration_file_path,
            base_paths,
            logging,
            local_storage,
            database,
            identity,
            dictionary,
            administrators,
            review,
        })
    }
}


impl Configuration {
    /// Load the configuration from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(
        configuration_file_path: S,
    ) -> Result<Self, ConfigurationLoadingError> {
        // Read the configuration file into memory as a string.
        let configuration_string =
            fs::read_to_string(configuration_file_path.as_ref()).map_err(|error| {
                ConfigurationLoadingError::UnableToReadConfigurationFile {
                    path: configuration_file_path.as_ref().to_path_buf(),
                    error,
                }
            })?;

        let canonical_configuration_file_path =
            dunce::canonicalize(configuration_file_path.as_ref()).map_err(|error| {
                ConfigurationLoadingError::UnableToCanonicalizePath {
                    path: configuration_file_path.as_ref().to_path_buf(),
                    error,
                }
            })?;

        Self::load_from_str(&configuration_string, canonical_configuration_file_path)
    }

    /// Parse and resolve configuration contents that were already read into memory.
    pub fn load_from_str(
        configuration_string: &str,
        configuration_file_path: PathBuf,
    ) -> Result<Self, ConfigurationLoadingError> {
        // Parse the string into the [`UnresolvedConfiguration`] structure and then resolve it.
        let unresolved_configuration =
            toml::from_str::<UnresolvedConfiguration>(configuration_string)
                .map_err(|error| ConfigurationLoadingError::ParsingError { error })?;

        let resolved_configuration =
            unresolved_configuration.try_resolve_with_context(ConfigurationResolutionContext {
                configuration_file_path,
            })?;

        Ok(resolved_configuration)
    }

    /// Load the configuration from the default path (`./data/configuration.toml`).
    pub fn load_from_default_path() -> Result<Self, ConfigurationLoadingError> {
        Configuration::load_from_path(get_default_configuration_file_path())
    }
}



#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use crate::{ConfigurationResolutionError, LoggingConfigurationError};

    const MINIMAL_CONFIGURATION: &str = r#"
        [base_paths]
        base_data_directory_path = "/tmp/lexicard"

        [logging]
        console_output_level_filter = "info"
        log_file_output_level_filter = "debug"
        log_file_output_directory = "{BASE_DATA_DIRECTORY}/logs"

        [local_storage]
        directory_path = "{BASE_DATA_DIRECTORY}/local-storage"
    "#;

    #[test]
    fn loads_minimal_guest_only_configuration() {
        let configuration =
            Configuration::load_from_str(MINIMAL_CONFIGURATION, PathBuf::from("test.toml"))
                .unwrap();

        assert!(configuration.database.is_none());
        assert!(configuration.identity.is_none());
        assert_eq!(
            configuration.logging.log_file_output_directory,
            PathBuf::from("/tmp/lexicard/logs")
        );
        assert_eq!(
            configuration.local_storage.directory_path,
            PathBuf::from("/tmp/lexicard/local-storage")
        );
        assert_eq!(
            configuration.local_storage.simulated_latency,
            Duration::from_millis(300)
        );
        assert_eq!(
            configuration.dictionary.base_url.as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/"
        );
        assert_eq!(
            configuration.review.search_debounce,
            Duration::from_millis(300)
        );
    }

    #[test]
    fn loads_full_configuration_from_file() {
        let full_configuration = format!(
            "{}{}",
            MINIMAL_CONFIGURATION,
            r#"
            [database]
            host = "localhost"
            port = 5432
            username = "lexicard"
            database_name = "lexicard"

            [identity]
            token_secret = "very-secret"
            issuer = "https://identity.example.com"
            audience = "lexicard"

            [dictionary]
            base_url = "http://localhost:8080/entries"
            request_timeout_seconds = 3

            [administrators]
            emails = ["  Admin@Example.com "]
            "#
        );

        let directory = tempfile::tempdir().unwrap();
        let file_path = directory.path().join("configuration.toml");
        std::fs::write(&file_path, full_configuration).unwrap();

        let configuration = Configuration::load_from_path(&file_path).unwrap();

        let database = configuration.database.unwrap();
        assert_eq!(database.port, 5432);
        assert_eq!(database.password, None);

        assert_eq!(configuration.identity.unwrap().audience, "lexicard");
        assert_eq!(
            configuration.dictionary.base_url.as_str(),
            "http://localhost:8080/entries/"
        );
        assert!(configuration
            .administrators
            .is_administrator_email("admin@example.com"));
    }

    #[test]
    fn refuses_invalid_tracing_filter() {
        let broken = MINIMAL_CONFIGURATION.replace(
            "console_output_level_filter = \"info\"",
            "console_output_level_filter = \"lexicard=verbose\"",
        );

        let error = Configuration::load_from_str(&broken, PathBuf::from("test.toml")).unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::ResolutionError {
                error: ConfigurationResolutionError::LoggingConfigurationError {
                    error: LoggingConfigurationError::InvalidTracingFilter { .. }
                }
            }
        ));
    }
}
