use crate::domain::user::User;

pub const BEARER_PREFIX: &str = "Bearer ";
pub const TOKEN_TYPE: &str = "bearer";
pub const TOKEN_TTL_SECS: u64 = 3600;

/// Issues tokens on login and resolves presented tokens to an identity.
pub trait TokenAuthority: Send + Sync {
    fn issue_token(&self, user: &User) -> String;
    /// Returns the identity the token stands for, if it is valid.
    fn validate(&self, token: &str) -> Option<String>;
}

/// One shared secret for every caller, all mapped to the same identity.
#[derive(Debug, Clone)]
pub struct StaticTokenAuthority {
    token: String,
    identity: String,
}

impl StaticTokenAuthority {
    pub fn new(token: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            identity: identity.into(),
        }
    }
}

impl TokenAuthority for StaticTokenAuthority {
    fn issue_token(&self, _user: &User) -> String {
        self.token.clone()
    }

    fn validate(&self, token: &str) -> Option<String> {
        (token == self.token).then(|| self.identity.clone())
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
/// The prefix is case-sensitive; the remainder is trimmed.
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix(BEARER_PREFIX).map(str::trim)
}
