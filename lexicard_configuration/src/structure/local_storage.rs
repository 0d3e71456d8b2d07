use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use super::base_paths::{create_directory_if_missing, BasePathsConfiguration};
use crate::{
    traits::ResolveWithContext,
    utilities::replace_placeholders_in_path,
    MissingDirectoryCreationError,
};


/// Browsers usually allow around five megabytes of local storage per origin.
const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

const DEFAULT_SIMULATED_LATENCY_MILLISECONDS: u64 = 300;


#[derive(Deserialize, Debug)]
pub(super) struct UnresolvedLocalStorageConfiguration {
    directory_path: String,

    simulated_latency_milliseconds: Option<u64>,

    quota_bytes: Option<u64>,
}


/// Guest-mode storage configuration.
#[derive(Debug, Clone)]
pub struct LocalStorageConfiguration {
    /// Directory holding one JSON document per storage key.
    pub directory_path: PathBuf,

    /// Artificial delay applied to every read, mimicking an asynchronous backend.
    pub simulated_latency: Duration,

    /// Maximum size of a single stored document.
    pub quota_bytes: u64,
}


impl<'r> ResolveWithContext<'r> for UnresolvedLocalStorageConfiguration {
    type Resolved = LocalStorageConfiguration;
    type Context = &'r BasePathsConfiguration;

    fn resolve_with_context(self, context: Self::Context) -> Self::Resolved {
        let directory_path = replace_placeholders_in_path(
            Path::new(&self.directory_path),
            context.placeholders(),
        );

        Self::Resolved {
            directory_path,
            simulated_latency: Duration::from_millis(
                self.simulated_latency_milliseconds
                    .unwrap_or(DEFAULT_SIMULATED_LATENCY_MILLISECONDS),
            ),
            quota_bytes: self.quota_bytes.unwrap_or(DEFAULT_QUOTA_BYTES),
        }
    }
}

impl LocalStorageConfiguration {
    pub fn create_directory_if_missing(&self) -> Result<(), MissingDirectoryCreationError> {
        create_directory_if_missing(&self.directory_path)
    }
}
