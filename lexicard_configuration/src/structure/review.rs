use std::time::Duration;

use serde::Deserialize;

use crate::traits::Resolve;


const DEFAULT_SEARCH_DEBOUNCE_MILLISECONDS: u64 = 300;


#[derive(Deserialize, Debug, Default)]
pub(super) struct UnresolvedReviewConfiguration {
    search_debounce_milliseconds: Option<u64>,
}


#[derive(Debug, Clone)]
pub struct ReviewConfiguration {
    /// Quiet period after the last keystroke before a search query is applied.
    pub search_debounce: Duration,
}

impl Resolve for UnresolvedReviewConfiguration {
    type Resolved = ReviewConfiguration;

    fn resolve(self) -> Self::Resolved {
        Self::Resolved {
            search_debounce: Duration::from_millis(
                self.search_debounce_milliseconds
                    .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MILLISECONDS),
            ),
        }
    }
}
