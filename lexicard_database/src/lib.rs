//! PostgreSQL persistence for authenticated Lexicard users.
//!
//! Each entity lives in its own module under [`entities`], split into
//! a model (raw database row and its conversion into the shared model),
//! a query and a mutation part. All queries on user-owned data are scoped
//! by owner and ordered newest-first.
//!
//! Every insert, update and delete raises a notification on
//! [`CHANGE_NOTIFICATION_CHANNEL`] (see the migrations), which
//! [`ChangeListener`] turns into a stream of [`ChangeNotification`]s.

mod connection;
pub mod entities;
mod listener;

use std::borrow::Cow;

pub use connection::*;
pub use listener::*;
use thiserror::Error;



#[derive(Debug, Error)]
pub enum QueryError {
    #[error("sqlx error")]
    SqlxError {
        #[from]
        #[source]
        error: sqlx::Error,
    },

    #[error("model error: {}", .reason)]
    ModelError { reason: Cow<'static, str> },

    #[error("database inconsistency: {}", .problem)]
    DatabaseInconsistencyError { problem: Cow<'static, str> },
}

impl QueryError {
    pub fn model_error<R>(reason: R) -> Self
    where
        R: Into<Cow<'static, str>>,
    {
        Self::ModelError {
            reason: reason.into(),
        }
    }

    pub fn database_inconsistency<R>(problem: R) -> Self
    where
        R: Into<Cow<'static, str>>,
    {
        Self::DatabaseInconsistencyError {
            problem: problem.into(),
        }
    }
}


pub type QueryResult<R, E = QueryError> = Result<R, E>;



/// Conversion of a raw database row into the shared model,
/// for rows that can contain values the shared model rejects.
pub trait TryIntoExternalModel {
    type ExternalModel;
    type Error;

    fn try_into_external_model(self) -> Result<Self::ExternalModel, Self::Error>;
}
