use crate::domain::repository::UserRepository;
use crate::domain::user::{User, normalize_email};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

/// Users keyed by normalized email. Populated only at construction.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        let storage = users
            .into_iter()
            .map(|mut user| {
                user.email = normalize_email(&user.email);
                (user.email.clone(), user)
            })
            .collect();
        Self {
            storage: Arc::new(RwLock::new(storage)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self), fields(email = email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        trace!("Acquiring read lock for user storage");
        let storage = self.storage.read().await;
        let user = storage.get(&normalize_email(email)).cloned();
        match &user {
            Some(u) => debug!(email = %u.email, "User found in storage"),
            None => trace!(email = email, "User not found in storage"),
        }
        Ok(user)
    }
}
