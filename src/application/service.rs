use crate::domain::error::DomainError;
use crate::domain::models::{NewReview, PlaceView, Review};
use crate::domain::repository::{PlaceRepository, ReviewRepository};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const REVIEW_ID_LEN: usize = 8;
const REVIEW_ID_ATTEMPTS: usize = 5;

pub struct ListingService<S: PlaceRepository + ReviewRepository> {
    store: Arc<S>,
}

impl<S: PlaceRepository + ReviewRepository> ListingService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All places in store order, optionally capped by price.
    #[instrument(skip(self))]
    pub async fn list_places(&self, max_price: Option<f64>) -> Result<Vec<PlaceView>> {
        let mut views = Vec::new();
        for place in self.store.all_places().await? {
            if max_price.is_some_and(|max| f64::from(place.price) > max) {
                continue;
            }
            let reviews = self.store.reviews_for(&place.id).await?;
            views.push(PlaceView::new(place, reviews));
        }
        debug!(count = views.len(), "Places listed");
        Ok(views)
    }

    #[instrument(skip(self))]
    pub async fn get_place(&self, id: &str) -> Result<PlaceView> {
        let place = self
            .store
            .find_place(id)
            .await?
            .ok_or(DomainError::PlaceNotFound)?;
        let reviews = self.store.reviews_for(&place.id).await?;
        Ok(PlaceView::new(place, reviews))
    }

    #[instrument(skip(self, input), fields(place_id = %input.place_id, rating = input.rating))]
    pub async fn add_review(&self, author: &str, input: NewReview) -> Result<Review> {
        if self.store.find_place(&input.place_id).await?.is_none() {
            warn!("Review targets unknown place");
            return Err(DomainError::PlaceNotFound.into());
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            let review = Review {
                id: short_id(),
                place_id: input.place_id.clone(),
                user: author.to_string(),
                rating: input.rating,
                comment: input.comment.clone(),
                created_at: Some(Utc::now().timestamp()),
            };
            match self.store.append_review(review.clone()).await {
                Ok(()) => {
                    info!(review_id = %review.id, "Review created");
                    return Ok(review);
                }
                Err(e)
                    if attempt < REVIEW_ID_ATTEMPTS
                        && matches!(
                            e.downcast_ref::<DomainError>(),
                            Some(DomainError::DuplicateReviewId(_))
                        ) =>
                {
                    debug!(review_id = %review.id, attempt, "Review id collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(REVIEW_ID_LEN);
    id
}
