use crate::domain::models::{Place, Review};
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PlaceRepository: Send + Sync {
    async fn all_places(&self) -> Result<Vec<Place>>;
    async fn find_place(&self, id: &str) -> Result<Option<Place>>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reviews of one place, in insertion order.
    async fn reviews_for(&self, place_id: &str) -> Result<Vec<Review>>;
    /// Fails with `DomainError::DuplicateReviewId` if the id is taken.
    async fn append_review(&self, review: Review) -> Result<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
}
