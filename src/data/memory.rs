use crate::domain::error::DomainError;
use crate::domain::models::{Place, Review};
use crate::domain::repository::{PlaceRepository, ReviewRepository};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

/// Append-only review log with a per-place index of positions.
#[derive(Default)]
struct ReviewLog {
    entries: Vec<Review>,
    by_place: HashMap<String, Vec<usize>>,
    ids: HashSet<String>,
}

impl ReviewLog {
    fn push(&mut self, review: Review) {
        self.ids.insert(review.id.clone());
        self.by_place
            .entry(review.place_id.clone())
            .or_default()
            .push(self.entries.len());
        self.entries.push(review);
    }
}

/// Places are fixed at construction; reviews can only be appended.
#[derive(Clone)]
pub struct InMemoryListingStore {
    places: Arc<Vec<Place>>,
    reviews: Arc<RwLock<ReviewLog>>,
}

impl InMemoryListingStore {
    pub fn new(places: Vec<Place>, reviews: Vec<Review>) -> Self {
        let mut log = ReviewLog::default();
        for review in reviews {
            log.push(review);
        }
        Self {
            places: Arc::new(places),
            reviews: Arc::new(RwLock::new(log)),
        }
    }

    pub async fn review_count(&self) -> usize {
        self.reviews.read().await.entries.len()
    }
}

impl Default for InMemoryListingStore {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[async_trait]
impl PlaceRepository for InMemoryListingStore {
    async fn all_places(&self) -> Result<Vec<Place>> {
        Ok(self.places.as_ref().clone())
    }

    #[instrument(skip(self))]
    async fn find_place(&self, id: &str) -> Result<Option<Place>> {
        let place = self.places.iter().find(|p| p.id == id).cloned();
        if place.is_none() {
            trace!(place_id = id, "Place not found in storage");
        }
        Ok(place)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryListingStore {
    async fn reviews_for(&self, place_id: &str) -> Result<Vec<Review>> {
        let log = self.reviews.read().await;
        let reviews = log
            .by_place
            .get(place_id)
            .map(|positions| positions.iter().map(|&i| log.entries[i].clone()).collect())
            .unwrap_or_default();
        Ok(reviews)
    }

    #[instrument(skip(self), fields(review_id = %review.id, place_id = %review.place_id))]
    async fn append_review(&self, review: Review) -> Result<()> {
        trace!("Acquiring write lock for review storage");
        let mut log = self.reviews.write().await;
        if log.ids.contains(&review.id) {
            return Err(DomainError::DuplicateReviewId(review.id).into());
        }
        log.push(review);
        debug!(total = log.entries.len(), "Review appended to memory storage");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str) -> Place {
        Place {
            id: id.to_string(),
            title: format!("Place {}", id),
            price: 100,
            description: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            host: "host".to_string(),
            country: None,
            city: None,
            amenities: Vec::new(),
            images: Vec::new(),
        }
    }

    fn review(id: &str, place_id: &str) -> Review {
        Review {
            id: id.to_string(),
            place_id: place_id.to_string(),
            user: "someone".to_string(),
            rating: 5,
            comment: "fine".to_string(),
            created_at: None,
        }
    }

    fn store() -> InMemoryListingStore {
        InMemoryListingStore::new(
            vec![place("a1"), place("b2")],
            vec![review("r1", "a1"), review("r2", "b2"), review("r3", "a1")],
        )
    }

    #[tokio::test]
    async fn test_all_places_preserves_order() {
        let ids: Vec<_> = store()
            .all_places()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["a1", "b2"]);
    }

    #[tokio::test]
    async fn test_find_place() {
        let store = store();
        assert_eq!(store.find_place("b2").await.unwrap().unwrap().id, "b2");
        assert!(store.find_place("zz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reviews_for_returns_insertion_order() {
        let store = store();
        store.append_review(review("r4", "a1")).await.unwrap();

        let ids: Vec<_> = store
            .reviews_for("a1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["r1", "r3", "r4"]);
    }

    #[tokio::test]
    async fn test_reviews_for_unknown_place_is_empty() {
        assert!(store().reviews_for("zz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_review_rejects_duplicate_id() {
        let store = store();
        let err = store.append_review(review("r1", "b2")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::DuplicateReviewId(id)) if id == "r1"
        ));
        assert_eq!(store.review_count().await, 3);
    }

    #[tokio::test]
    async fn test_concurrent_appends() {
        let store = store();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.append_review(review(&format!("n{}", i), "b2")).await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(store.review_count().await, 13);
        assert_eq!(store.reviews_for("b2").await.unwrap().len(), 11);
    }
}
