use std::sync::Arc;

use lexicard_core::{
    models::{Topic, UserProfile, VocabularyItem, WordType},
    owner::Owner,
    roles::ApprovalStatus,
};
use sqlx::PgPool;
use tracing::info;

use crate::{EntityStore, LocalStorage, LocalStore, RemoteStore, StoreError, StoreResult};


/// Who is using the application.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Session {
    Guest,
    Authenticated(UserProfile),
}

impl Session {
    pub fn owner(&self) -> Owner {
        match self {
            Session::Guest => Owner::Guest,
            Session::Authenticated(profile) => Owner::User(profile.id.clone()),
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Session::Guest => None,
            Session::Authenticated(profile) => Some(profile),
        }
    }
}


/// The stores of a single session, one per entity kind.
#[derive(Clone)]
pub struct Stores {
    pub topics: Arc<dyn EntityStore<Topic>>,
    pub vocabulary: Arc<dyn EntityStore<VocabularyItem>>,
    pub word_types: Arc<dyn EntityStore<WordType>>,
}

impl Stores {
    pub fn owner(&self) -> &Owner {
        self.topics.owner()
    }
}


/// Picks the local or the remote store implementation for a session.
#[derive(Clone)]
pub struct StoreFactory {
    local_storage: Arc<LocalStorage>,

    database_pool: Option<PgPool>,
}

impl StoreFactory {
    pub fn new(local_storage: Arc<LocalStorage>, database_pool: Option<PgPool>) -> Self {
        Self {
            local_storage,
            database_pool,
        }
    }

    #[inline]
    pub fn has_remote_store(&self) -> bool {
        self.database_pool.is_some()
    }

    /// Guests get local stores; approved, authenticated users get remote ones.
    pub fn stores_for(&self, session: &Session) -> StoreResult<Stores> {
        match session {
            Session::Guest => {
                info!("Using local storage for guest session.");

                Ok(Stores {
                    topics: Arc::new(LocalStore::<Topic>::new(self.local_storage.clone())),
                    vocabulary: Arc::new(LocalStore::<VocabularyItem>::new(
                        self.local_storage.clone(),
                    )),
                    word_types: Arc::new(LocalStore::<WordType>::new(self.local_storage.clone())),
                })
            }
            Session::Authenticated(profile) => {
                if profile.status != ApprovalStatus::Approved {
                    return Err(StoreError::AccountNotApproved {
                        status: profile.status,
                    });
                }

                let database_pool = self
                    .database_pool
                    .as_ref()
                    .ok_or(StoreError::RemoteStoreNotConfigured)?;

                info!(user_id = %profile.id, "Using remote store for authenticated session.");

                Ok(Stores {
                    topics: Arc::new(RemoteStore::<Topic>::new(
                        database_pool.clone(),
                        profile.id.clone(),
                    )),
                    vocabulary: Arc::new(RemoteStore::<VocabularyItem>::new(
                        database_pool.clone(),
                        profile.id.clone(),
                    )),
                    word_types: Arc::new(RemoteStore::<WordType>::new(
                        database_pool.clone(),
                        profile.id.clone(),
                    )),
                })
            }
        }
    }
}
