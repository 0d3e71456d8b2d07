//! Application-wide state, set up once at startup.

use std::{borrow::Cow, sync::Arc};

use lexicard_auth::{AccessDecision, IdentityTokenVerifier};
use lexicard_configuration::Configuration;
use lexicard_core::models::UserProfile;
use lexicard_database::establish_database_connection_pool;
use lexicard_dictionary::{DictionaryLookup, FreeDictionaryClient};
use lexicard_store::{LocalStorage, ProfileService, RemoteProfileRepository, Session, StoreFactory};
use miette::{Context, IntoDiagnostic, Result};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::session::{SessionContext, SessionResult};


/// How signing in ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignIn {
    /// No sign-in was attempted, or it did not succeed.
    /// In the latter case, `notice` explains why.
    Guest { notice: Option<Cow<'static, str>> },

    /// The account exists, but may not use the application (yet).
    Blocked {
        profile: Box<UserProfile>,
        message: Cow<'static, str>,
    },

    Granted { profile: Box<UserProfile> },
}

impl SignIn {
    fn guest_with_notice<M>(notice: M) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        Self::Guest {
            notice: Some(notice.into()),
        }
    }

    /// The session to continue with. Blocked accounts get none.
    pub fn session(&self) -> Option<Session> {
        match self {
            SignIn::Guest { .. } => Some(Session::Guest),
            SignIn::Blocked { .. } => None,
            SignIn::Granted { profile } => Some(Session::Authenticated(profile.as_ref().clone())),
        }
    }
}


pub struct ApplicationState {
    pub configuration: Configuration,

    pub store_factory: StoreFactory,

    pub dictionary: DictionaryLookup,

    /// Only present if the remote database is configured and reachable.
    pub database_pool: Option<PgPool>,

    /// Only present if the identity provider is configured.
    pub identity_verifier: Option<IdentityTokenVerifier>,

    /// Only present if both the database and the identity provider are available.
    pub profile_service: Option<ProfileService>,
}

impl ApplicationState {
    pub async fn initialize(configuration: Configuration) -> Result<Self> {
        configuration
            .local_storage
            .create_directory_if_missing()
            .into_diagnostic()
            .wrap_err("Failed to create local storage directory.")?;

        let local_storage = Arc::new(LocalStorage::from_configuration(
            &configuration.local_storage,
        ));

        let database_pool = match configuration.database.as_ref() {
            Some(database_configuration) => {
                match establish_database_connection_pool(database_configuration).await {
                    Ok(pool) => {
                        info!(
                            host = %database_configuration.host,
                            database = %database_configuration.database_name,
                            "Connected to the remote database."
                        );
                        Some(pool)
                    }
                    Err(error) => {
                        warn!(
                            error = ?error,
                            "Unable to connect to the remote database, guest mode only."
                        );
                        None
                    }
                }
            }
            None => {
                info!("No remote database configured, only guest mode is available.");
                None
            }
        };

        let dictionary_client = FreeDictionaryClient::new(&configuration.dictionary)
            .into_diagnostic()
            .wrap_err("Failed to set up the dictionary client.")?;
        let dictionary = DictionaryLookup::new(Arc::new(dictionary_client));

        let identity_verifier = configuration
            .identity
            .as_ref()
            .map(IdentityTokenVerifier::new);

        let profile_service = match (&database_pool, &identity_verifier) {
            (Some(pool), Some(_)) => Some(ProfileService::new(
                Arc::new(RemoteProfileRepository::new(pool.clone())),
                configuration.administrators.clone(),
            )),
            _ => None,
        };

        Ok(Self {
            store_factory: StoreFactory::new(local_storage, database_pool.clone()),
            dictionary,
            database_pool,
            identity_verifier,
            profile_service,
            configuration,
        })
    }

    /// Signs in with an identity token, if one was given.
    ///
    /// Failures never abort the program: they fall back to guest mode with a notice
    /// (a cancelled sign-in is worded differently from a failed one).
    pub async fn sign_in(&self, id_token: Option<&str>) -> SignIn {
        let Some(id_token) = id_token else {
            return SignIn::Guest { notice: None };
        };

        let (Some(identity_verifier), Some(profile_service)) =
            (self.identity_verifier.as_ref(), self.profile_service.as_ref())
        else {
            warn!("Sign-in requested, but accounts are not available.");
            return SignIn::guest_with_notice(
                "Accounts are not available right now. Continuing as a guest.",
            );
        };

        let account = match identity_verifier.sign_in(Some(id_token)) {
            Ok(account) => account,
            Err(error) => {
                if error.is_cancellation() {
                    info!("Sign-in was cancelled, continuing as a guest.");
                } else {
                    warn!(error = ?error, "Sign-in failed.");
                }

                return SignIn::guest_with_notice(error.user_facing_message());
            }
        };

        let profile = match profile_service.sign_in(&account).await {
            Ok(profile) => profile,
            Err(error) => {
                warn!(user_id = %account.user_id, error = ?error, "Unable to load profile.");
                return SignIn::guest_with_notice(
                    "Your profile could not be loaded. Continuing as a guest.",
                );
            }
        };

        let decision = AccessDecision::for_profile(&profile);

        match decision.blocking_message(&profile) {
            Some(message) => {
                info!(
                    user_id = %profile.id,
                    status = profile.status.name(),
                    "Access denied until the account is approved."
                );

                SignIn::Blocked {
                    profile: Box::new(profile),
                    message,
                }
            }
            None => SignIn::Granted {
                profile: Box::new(profile),
            },
        }
    }

    pub async fn start_session(&self, session: Session) -> SessionResult<SessionContext> {
        SessionContext::start(
            &self.store_factory,
            session,
            self.dictionary.clone(),
            self.configuration.review.search_debounce,
        )
        .await
    }
}
