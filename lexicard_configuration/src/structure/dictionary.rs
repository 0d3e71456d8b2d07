use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::{traits::TryResolve, DictionaryConfigurationError};


const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;


#[derive(Deserialize, Debug, Default)]
pub(super) struct UnresolvedDictionaryConfiguration {
    base_url: Option<String>,

    request_timeout_seconds: Option<u64>,
}


/// Dictionary lookup API configuration.
#[derive(Debug, Clone)]
pub struct DictionaryConfiguration {
    /// Base URL that the (percent-encoded) word is appended to.
    /// Always ends with a slash.
    pub base_url: Url,

    pub request_timeout: Duration,
}


impl TryResolve for UnresolvedDictionaryConfiguration {
    type Resolved = DictionaryConfiguration;
    type Error = DictionaryConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        let mut base_url_string = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // `Url::join` would otherwise replace the last path segment.
        if !base_url_string.ends_with('/') {
            base_url_string.push('/');
        }

        let base_url = Url::parse(&base_url_string).map_err(|error| {
            DictionaryConfigurationError::InvalidBaseUrl {
                base_url: base_url_string.clone(),
                error,
            }
        })?;

        let request_timeout_seconds = self
            .request_timeout_seconds
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS);

        if request_timeout_seconds == 0 {
            return Err(DictionaryConfigurationError::ZeroRequestTimeout);
        }

        Ok(Self::Resolved {
            base_url,
            request_timeout: Duration::from_secs(request_timeout_seconds),
        })
    }
}
