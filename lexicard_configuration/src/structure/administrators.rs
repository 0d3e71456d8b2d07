use serde::Deserialize;

use crate::traits::Resolve;


#[derive(Deserialize, Debug, Default)]
pub(super) struct UnresolvedAdministratorsConfiguration {
    #[serde(default)]
    emails: Vec<String>,
}


/// Accounts that are provisioned as (already approved) administrators on first sign-in.
#[derive(Debug, Clone, Default)]
pub struct AdministratorsConfiguration {
    /// Lower-cased administrator e-mail addresses.
    pub emails: Vec<String>,
}

impl Resolve for UnresolvedAdministratorsConfiguration {
    type Resolved = AdministratorsConfiguration;

    fn resolve(self) -> Self::Resolved {
        let emails = self
            .emails
            .into_iter()
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();

        Self::Resolved { emails }
    }
}

impl AdministratorsConfiguration {
    pub fn is_administrator_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();

        self.emails.iter().any(|admin_email| admin_email == &email)
    }
}
