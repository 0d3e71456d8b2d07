use std::time::Duration;

use async_trait::async_trait;
use lexicard_configuration::DictionaryConfiguration;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::{response::RawEntry, DictionaryError, DictionaryResult};


/// What the dictionary API answered for a single word.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FetchOutcome {
    Found(Vec<RawEntry>),
    NotFound,
}


/// Access to the dictionary lookup API.
///
/// Production code uses [`FreeDictionaryClient`], tests use
/// [`MockDictionaryApi`][crate::MockDictionaryApi].
#[async_trait]
pub trait DictionaryApi: Send + Sync {
    /// Fetch all dictionary entries for a single (normalized) word.
    async fn fetch_entries(&self, normalized_word: &str) -> DictionaryResult<FetchOutcome>;
}



fn build_client_user_agent() -> String {
    format!("lexicard / v{}", env!("CARGO_PKG_VERSION"))
}


/// Client for the Free Dictionary API (<https://dictionaryapi.dev>).
pub struct FreeDictionaryClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl FreeDictionaryClient {
    pub fn new(configuration: &DictionaryConfiguration) -> DictionaryResult<Self> {
        Self::with_base_url(
            configuration.base_url.clone(),
            configuration.request_timeout,
        )
    }

    pub fn with_base_url(base_url: Url, request_timeout: Duration) -> DictionaryResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(build_client_user_agent())
            .timeout(request_timeout)
            .build()
            .map_err(|error| DictionaryError::UnableToInitializeClient { error })?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    fn word_url(&self, normalized_word: &str) -> DictionaryResult<Url> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| DictionaryError::UnusableBaseUrl {
                base_url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .push(normalized_word);

        Ok(url)
    }
}

#[async_trait]
impl DictionaryApi for FreeDictionaryClient {
    async fn fetch_entries(&self, normalized_word: &str) -> DictionaryResult<FetchOutcome> {
        let url = self.word_url(normalized_word)?;

        debug!(word = normalized_word, url = %url, "Requesting dictionary entries.");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|error| DictionaryError::RequestExecutionError { error })?;

        match response.status() {
            StatusCode::OK => {
                let entries = response
                    .json::<Vec<RawEntry>>()
                    .await
                    .map_err(|error| DictionaryError::ResponseBodyError { error })?;

                Ok(FetchOutcome::Found(entries))
            }
            StatusCode::NOT_FOUND => Ok(FetchOutcome::NotFound),
            status_code => Err(DictionaryError::UnexpectedStatus { status_code }),
        }
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn word_url_percent_encodes_the_word() {
        let client = FreeDictionaryClient::with_base_url(
            Url::parse("https://api.dictionaryapi.dev/api/v2/entries/en/").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.word_url("ice cream").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/ice%20cream"
        );
        assert_eq!(
            client.word_url("a/b").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/a%2Fb"
        );
    }
}
