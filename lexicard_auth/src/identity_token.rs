use std::borrow::Cow;
use std::ops::Add;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lexicard_configuration::IdentityConfiguration;
use lexicard_core::id::{UserId, UserIdError};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::TimestampSeconds;
use thiserror::Error;
use tracing::debug;


/// Why signing in did not produce an account.
#[derive(Error, Debug)]
pub enum AuthenticationError {
    /// The user dismissed the sign-in prompt without providing credentials.
    #[error("sign-in was cancelled")]
    Cancelled,

    #[error("identity token has expired")]
    Expired,

    #[error("identity token is invalid: {}", .reason)]
    InvalidToken { reason: Cow<'static, str> },

    #[error("identity token does not carry an e-mail address")]
    MissingEmail,

    #[error("identity token carries an unusable account identifier")]
    InvalidAccountIdentifier {
        #[from]
        #[source]
        error: UserIdError,
    },
}

impl AuthenticationError {
    #[inline]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Message to show to the user.
    ///
    /// A cancelled sign-in is not a failure, which is why it gets its own wording.
    pub fn user_facing_message(&self) -> Cow<'static, str> {
        match self {
            Self::Cancelled => Cow::Borrowed("Sign-in was cancelled. You can continue as a guest."),
            Self::Expired => Cow::Borrowed("Your sign-in has expired. Please sign in again."),
            _ => Cow::Owned(format!("Sign-in failed: {}.", self)),
        }
    }
}


/// Identity token data (also called "claims") as issued by the identity provider.
///
/// More information:
/// - <https://openid.net/specs/openid-connect-core-1_0.html#IDToken>
/// - <https://datatracker.ietf.org/doc/html/rfc7519#section-4.1>
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IdentityClaims {
    /// Registered claim: Issuer.
    pub iss: String,

    /// Registered claim: Audience (this application).
    pub aud: String,

    /// Registered claim: Subject, the stable provider account identifier.
    pub sub: String,

    /// Registered claim: Issued At
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub iat: DateTime<Utc>,

    /// Registered claim: Expiration Time
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub exp: DateTime<Utc>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,
}

impl IdentityClaims {
    /// Note that the `issued_at` timestamp will have its sub-second content truncated
    /// (see [`trunc_subsecs`][chrono::round::SubsecRound::trunc_subsecs]).
    pub fn create(
        configuration: &IdentityConfiguration,
        account_id: &str,
        email: Option<String>,
        issued_at: DateTime<Utc>,
        valid_for: Duration,
    ) -> Self {
        let issued_at = issued_at.trunc_subsecs(0);

        Self {
            iss: configuration.issuer.clone(),
            aud: configuration.audience.clone(),
            sub: account_id.to_string(),
            iat: issued_at,
            exp: issued_at.add(valid_for),
            email,
            name: None,
            picture: None,
        }
    }
}


/// The account returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub user_id: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}


#[derive(Debug, Error)]
pub enum IdentityTokenCreationError {
    #[error("JWT error")]
    JWTError {
        #[from]
        #[source]
        error: jsonwebtoken::errors::Error,
    },
}


/// Verifies identity tokens issued by the identity provider.
pub struct IdentityTokenVerifier {
    header: Header,

    encoding_key: EncodingKey,

    decoding_key: DecodingKey,

    /// An issuer and audience validator.
    validation: Validation,
}

impl IdentityTokenVerifier {
    pub fn new(configuration: &IdentityConfiguration) -> Self {
        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(configuration.token_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(configuration.token_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&configuration.issuer]);
        validation.set_audience(&[&configuration.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        // Expiry is validated by hand with `chrono`.
        validation.validate_exp = false;
        validation.validate_nbf = false;

        Self {
            header,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Signs a token with the shared secret, the way the identity provider would.
    /// Used by tooling and tests.
    pub fn create_token(
        &self,
        claims: &IdentityClaims,
    ) -> Result<String, IdentityTokenCreationError> {
        jsonwebtoken::encode(&self.header, claims, &self.encoding_key)
            .map_err(|error| IdentityTokenCreationError::JWTError { error })
    }

    pub fn decode_token(&self, token: &str) -> Result<IdentityClaims, AuthenticationError> {
        let token_data = jsonwebtoken::decode::<IdentityClaims>(
            token,
            &self.decoding_key,
            &self.validation,
        )
        .map_err(|error| AuthenticationError::InvalidToken {
            reason: match error.kind() {
                ErrorKind::InvalidIssuer => Cow::from("invalid issuer"),
                ErrorKind::InvalidAudience => Cow::from("invalid audience"),
                ErrorKind::InvalidSignature => Cow::from("invalid signature"),
                _ => Cow::from(format!("failed to parse token: {}", error)),
            },
        })?;

        let current_time = Utc::now();

        if token_data.claims.iat > current_time {
            return Err(AuthenticationError::InvalidToken {
                reason: Cow::from("issued-at field is in the future"),
            });
        }

        if token_data.claims.exp <= current_time {
            return Err(AuthenticationError::Expired);
        }

        Ok(token_data.claims)
    }

    /// Completes a sign-in attempt.
    ///
    /// `None` (or a blank token) means the user dismissed the sign-in prompt.
    pub fn sign_in(
        &self,
        token: Option<&str>,
    ) -> Result<AuthenticatedAccount, AuthenticationError> {
        let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) else {
            debug!("Sign-in prompt was dismissed.");
            return Err(AuthenticationError::Cancelled);
        };

        let claims = self.decode_token(token)?;

        let email = claims
            .email
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .ok_or(AuthenticationError::MissingEmail)?;

        let user_id = UserId::new(claims.sub)?;

        debug!(user_id = %user_id, "Identity token verified.");

        Ok(AuthenticatedAccount {
            user_id,
            email,
            display_name: claims.name,
            photo_url: claims.picture,
        })
    }
}



#[cfg(test)]
mod test {
    use chrono::SubsecRound;

    use super::*;

    fn configuration() -> IdentityConfiguration {
        IdentityConfiguration {
            token_secret: "secret".to_string(),
            issuer: "https://identity.example.com".to_string(),
            audience: "lexicard".to_string(),
        }
    }

    #[test]
    fn create_and_verify_token() {
        let configuration = configuration();
        let verifier = IdentityTokenVerifier::new(&configuration);

        let issued_at = Utc::now().trunc_subsecs(0);
        let mut claims = IdentityClaims::create(
            &configuration,
            "provider-account-1",
            Some("Jane@Example.com".to_string()),
            issued_at,
            Duration::seconds(60),
        );
        claims.name = Some("Jane".to_string());

        let token = verifier.create_token(&claims).unwrap();
        let account = verifier.sign_in(Some(&token)).unwrap();

        assert_eq!(account.user_id.as_str(), "provider-account-1");
        assert_eq!(account.email, "jane@example.com");
        assert_eq!(account.display_name.as_deref(), Some("Jane"));
    }

    #[test]
    fn missing_token_is_a_cancellation() {
        let verifier = IdentityTokenVerifier::new(&configuration());

        let error = verifier.sign_in(None).unwrap_err();
        assert!(error.is_cancellation());

        let error = verifier.sign_in(Some("   ")).unwrap_err();
        assert!(error.is_cancellation());
        assert!(error.user_facing_message().contains("cancelled"));
    }

    #[test]
    fn refuses_expired_and_foreign_tokens() {
        let configuration = configuration();
        let verifier = IdentityTokenVerifier::new(&configuration);

        let expired_claims = IdentityClaims::create(
            &configuration,
            "provider-account-1",
            Some("jane@example.com".to_string()),
            Utc::now() - Duration::hours(2),
            Duration::hours(1),
        );
        let expired_token = verifier.create_token(&expired_claims).unwrap();
        assert!(matches!(
            verifier.sign_in(Some(&expired_token)),
            Err(AuthenticationError::Expired)
        ));

        let mut foreign_configuration = configuration.clone();
        foreign_configuration.audience = "another-app".to_string();
        let foreign_claims = IdentityClaims::create(
            &foreign_configuration,
            "provider-account-1",
            Some("jane@example.com".to_string()),
            Utc::now(),
            Duration::hours(1),
        );
        let foreign_token = verifier.create_token(&foreign_claims).unwrap();

        let error = verifier.sign_in(Some(&foreign_token)).unwrap_err();
        assert!(matches!(error, AuthenticationError::InvalidToken { .. }));
        assert!(!error.is_cancellation());
    }

    #[test]
    fn refuses_reserved_account_identifier() {
        let configuration = configuration();
        let verifier = IdentityTokenVerifier::new(&configuration);

        let claims = IdentityClaims::create(
            &configuration,
            "guest",
            Some("sneaky@example.com".to_string()),
            Utc::now(),
            Duration::hours(1),
        );
        let token = verifier.create_token(&claims).unwrap();

        assert!(matches!(
            verifier.sign_in(Some(&token)),
            Err(AuthenticationError::InvalidAccountIdentifier { .. })
        ));
    }
}
