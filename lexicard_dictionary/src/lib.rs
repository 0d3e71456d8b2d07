//! Dictionary lookups for Lexicard.
//!
//! Words are fetched from the Free Dictionary API, normalized into
//! [`NormalizedWordData`] and cached for the lifetime of a [`DictionaryLookup`].
//! Batch lookups ([`DictionaryLookup::lookup_many`]) only ever request words
//! that are not cached yet, and request them concurrently.

mod api;
mod cache;
mod lookup;
mod mock;
mod normalize;
pub mod response;

pub use api::*;
pub use cache::*;
pub use lookup::*;
pub use mock::*;
pub use normalize::*;
use reqwest::StatusCode;
use thiserror::Error;


#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("unable to initialize HTTP client")]
    UnableToInitializeClient {
        #[source]
        error: reqwest::Error,
    },

    #[error("dictionary base URL cannot have path segments appended: {}", .base_url)]
    UnusableBaseUrl { base_url: String },

    #[error("failed to execute dictionary request")]
    RequestExecutionError {
        #[source]
        error: reqwest::Error,
    },

    #[error("failed to read dictionary response body")]
    ResponseBodyError {
        #[source]
        error: reqwest::Error,
    },

    #[error("dictionary responded with unexpected status code {}", .status_code)]
    UnexpectedStatus { status_code: StatusCode },

    #[error("dictionary is unavailable: {}", .reason)]
    Unavailable { reason: String },
}

pub type DictionaryResult<T, E = DictionaryError> = Result<T, E>;
