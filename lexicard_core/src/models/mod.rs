pub mod topic;
pub mod user_profile;
pub mod vocabulary;
pub mod word_type;

pub use topic::{Topic, TopicDraft, TopicPatch};
pub use user_profile::{NewUserProfile, UserProfile};
pub use vocabulary::{Accent, Phonetic, VocabularyDraft, VocabularyItem, VocabularyPatch};
pub use word_type::{WordType, WordTypeDraft, WordTypePatch};
