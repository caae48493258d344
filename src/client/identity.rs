use serde::{Deserialize, Serialize};

/// The part of the signed-in user the page needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub profile_image_url: String,
}

/// Session status as reported by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdentitySession {
    #[default]
    Unloaded,
    SignedOut,
    SignedIn(SessionUser),
}

impl IdentitySession {
    /// Builds a session from the provider's `{isLoaded, isSignedIn, user}`
    /// snapshot. A signed-in flag without a user counts as signed out.
    pub fn from_parts(is_loaded: bool, is_signed_in: bool, user: Option<SessionUser>) -> Self {
        match (is_loaded, is_signed_in, user) {
            (false, _, _) => IdentitySession::Unloaded,
            (true, true, Some(user)) => IdentitySession::SignedIn(user),
            (true, _, _) => IdentitySession::SignedOut,
        }
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(self, IdentitySession::Unloaded)
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, IdentitySession::SignedIn(_))
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            IdentitySession::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}
