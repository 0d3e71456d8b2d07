use serde::Deserialize;

use crate::{traits::TryResolve, IdentityConfigurationError};


#[derive(Deserialize, Debug)]
pub(super) struct UnresolvedIdentityConfiguration {
    token_secret: String,

    issuer: String,

    audience: String,
}


/// Identity provider configuration: how to verify the identity tokens it issues.
#[derive(Clone)]
pub struct IdentityConfiguration {
    /// Shared secret the provider signs identity tokens with (HS256).
    pub token_secret: String,

    /// Expected `iss` claim.
    pub issuer: String,

    /// Expected `aud` claim (the identifier of this application at the provider).
    pub audience: String,
}

impl std::fmt::Debug for IdentityConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfiguration")
            .field("token_secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}


impl TryResolve for UnresolvedIdentityConfiguration {
    type Resolved = IdentityConfiguration;
    type Error = IdentityConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        if self.token_secret.is_empty() {
            return Err(IdentityConfigurationError::EmptySecret);
        }

        Ok(Self::Resolved {
            token_secret: self.token_secret,
            issuer: self.issuer,
            audience: self.audience,
        })
    }
}
