pub mod topic;
pub mod user_profile;
pub mod vocabulary;
pub mod word_type;

pub use topic::{TopicMutation, TopicQuery};
pub use user_profile::{UserProfileMutation, UserProfileQuery};
pub use vocabulary::{VocabularyMutation, VocabularyQuery};
pub use word_type::{WordTypeMutation, WordTypeQuery};

use lexicard_core::{id::UserId, owner::Owner};

use crate::{QueryError, QueryResult, TryIntoExternalModel};


/// Parses an `owner_id` column back into an [`Owner`].
///
/// Rows in the remote store always belong to a real user,
/// so the guest sentinel (or an empty string) is a model error.
pub(crate) fn owner_from_column(owner_id: String) -> QueryResult<Owner> {
    UserId::new(owner_id)
        .map(Owner::User)
        .map_err(|error| QueryError::model_error(format!("invalid owner_id column: {}", error)))
}


pub(crate) fn try_into_external_models<M>(rows: Vec<M>) -> QueryResult<Vec<M::ExternalModel>>
where
    M: TryIntoExternalModel<Error = QueryError>,
{
    rows.into_iter()
        .map(TryIntoExternalModel::try_into_external_model)
        .collect()
}
