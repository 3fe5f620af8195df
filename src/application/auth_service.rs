use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{LoginRequest, LoginResponse, UserProfile, normalize_email};
use crate::infrastructure::security::{TOKEN_TTL_SECS, TOKEN_TYPE, TokenAuthority, extract_bearer};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument, trace, warn};

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    tokens: Arc<dyn TokenAuthority>,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>, tokens: Arc<dyn TokenAuthority>) -> Self {
        Self {
            user_repository,
            tokens,
        }
    }

    /// Unknown emails and wrong passwords fail the same way.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse> {
        trace!("Starting login");
        let email = normalize_email(&req.email);

        let user = self
            .user_repository
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!(email = %email, "User not found during login");
                DomainError::InvalidCredentials
            })?;

        if user.password != req.password {
            warn!(email = %email, "Invalid password during login");
            return Err(DomainError::InvalidCredentials.into());
        }

        let access_token = self.tokens.issue_token(&user);
        info!(email = %email, "Login successful");

        Ok(LoginResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: TOKEN_TTL_SECS,
            user: UserProfile {
                email,
                ..UserProfile::from(&user)
            },
        })
    }

    /// Resolves an `Authorization` header value to the caller's identity.
    #[instrument(skip_all)]
    pub fn authorize(&self, authorization: Option<&str>) -> Result<String, DomainError> {
        let Some(token) = extract_bearer(authorization) else {
            debug!("Missing or malformed bearer header");
            return Err(DomainError::Unauthorized);
        };
        self.tokens.validate(token).ok_or_else(|| {
            debug!("Bearer token rejected");
            DomainError::Unauthorized
        })
    }
}
