use serde::Deserialize;
use sqlx::{postgres::PgListener, PgPool};
use tracing::{debug, warn};

use crate::QueryResult;


/// Name of the PostgreSQL notification channel the change triggers publish to.
pub const CHANGE_NOTIFICATION_CHANNEL: &str = "lexicard_changes";


/// The table a change notification originated from.
#[derive(Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ChangedTable {
    Topic,
    WordType,
    VocabularyItem,
    UserProfile,
}


/// A single row change, as published by the database triggers.
#[derive(Deserialize, PartialEq, Eq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChangeNotification {
    pub table: ChangedTable,

    /// Owner of the changed row (for `user_profile`, the profile's own id).
    pub owner_id: String,
}

impl ChangeNotification {
    pub fn from_payload(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    #[inline]
    pub fn concerns(&self, table: ChangedTable, owner_id: &str) -> bool {
        self.table == table && self.owner_id == owner_id
    }
}


/// Receives row change notifications over a dedicated database connection.
pub struct ChangeListener {
    listener: PgListener,
}

impl ChangeListener {
    pub async fn connect(database_pool: &PgPool) -> QueryResult<Self> {
        let mut listener = PgListener::connect_with(database_pool).await?;
        listener.listen(CHANGE_NOTIFICATION_CHANNEL).await?;

        debug!(
            channel = CHANGE_NOTIFICATION_CHANNEL,
            "Listening for database changes."
        );

        Ok(Self { listener })
    }

    /// Waits for the next change notification.
    ///
    /// Notifications with a payload we can not parse are logged and skipped.
    pub async fn next_change(&mut self) -> QueryResult<ChangeNotification> {
        loop {
            let notification = self.listener.recv().await?;

            match ChangeNotification::from_payload(notification.payload()) {
                Ok(change) => return Ok(change),
                Err(error) => {
                    warn!(
                        payload = notification.payload(),
                        error = %error,
                        "Ignoring malformed change notification."
                    );
                }
            }
        }
    }
}
