use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_RATING: i64 = 5;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Place {
    pub id: String,
    pub title: String,
    pub price: u32,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub host: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Review {
    pub id: String,
    pub place_id: String,
    pub user: String,
    pub rating: i64,
    pub comment: String,
    /// Unix timestamp, only present on reviews created at runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// A place as returned by the API: every place field plus its reviews.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceView {
    #[serde(flatten)]
    pub place: Place,
    pub reviews: Vec<Review>,
}

impl PlaceView {
    /// Keeps only the reviews that belong to `place`, in the order given.
    pub fn new(place: Place, reviews: impl IntoIterator<Item = Review>) -> Self {
        let reviews = reviews
            .into_iter()
            .filter(|r| r.place_id == place.id)
            .collect();
        Self { place, reviews }
    }
}

/// Validated input of `POST /reviews`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub place_id: String,
    pub comment: String,
    pub rating: i64,
}

impl NewReview {
    /// Reads a review payload. Anything that is not a JSON object is treated
    /// as an empty object. `text` is accepted in place of an empty `comment`.
    pub fn from_json(body: &Value) -> Result<Self, DomainError> {
        let empty = serde_json::Map::new();
        let fields = body.as_object().unwrap_or(&empty);

        let non_empty = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let place_id = fields.get("place_id").and_then(place_key);
        let comment = non_empty("comment").or_else(|| non_empty("text"));
        let (Some(place_id), Some(comment)) = (place_id, comment) else {
            return Err(DomainError::Validation(
                "place_id and comment are required".to_string(),
            ));
        };

        let rating = match fields.get("rating") {
            None | Some(Value::Null) => DEFAULT_RATING,
            Some(value) => whole_number(value).ok_or_else(|| {
                DomainError::Validation("rating must be an integer".to_string())
            })?,
        };

        Ok(Self {
            place_id,
            comment,
            rating,
        })
    }
}

/// Lookup key for a `place_id` value. Empty, zero, `false` and empty
/// containers count as missing; other non-strings are looked up by their
/// JSON text.
fn place_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(items) if !items.is_empty() => Some(value.to_string()),
        Value::Object(map) if !map.is_empty() => Some(value.to_string()),
        _ => None,
    }
}

/// Integers, integral floats and strings holding either.
fn whole_number(value: &Value) -> Option<i64> {
    let integral = |f: f64| {
        (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
    };
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn place(id: &str) -> Place {
        Place {
            id: id.to_string(),
            title: "Cabin".to_string(),
            price: 100,
            description: "Quiet".to_string(),
            latitude: 1.5,
            longitude: -2.5,
            host: "Ana".to_string(),
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
            user: "lena".to_string(),
            rating: 4,
            comment: "Nice".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_place_view_keeps_only_matching_reviews_in_order() {
        let view = PlaceView::new(
            place("a1"),
            vec![review("r1", "a1"), review("r9", "b2"), review("r2", "a1")],
        );
        let ids: Vec<_> = view.reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2"]);
    }

    #[test]
    fn test_place_view_serializes_missing_optionals() {
        let value = serde_json::to_value(PlaceView::new(place("a1"), Vec::new())).unwrap();
        assert_eq!(value["country"], Value::Null);
        assert_eq!(value["city"], Value::Null);
        assert_eq!(value["amenities"], json!([]));
        assert_eq!(value["images"], json!([]));
        assert_eq!(value["reviews"], json!([]));
        assert_eq!(value["price"], json!(100));
    }

    #[test]
    fn test_place_deserializes_without_optional_fields() {
        let place: Place = serde_json::from_value(json!({
            "id": "x", "title": "t", "price": 1, "description": "d",
            "latitude": 0.0, "longitude": 0.0, "host": "h"
        }))
        .unwrap();
        assert!(place.country.is_none());
        assert!(place.amenities.is_empty());
    }

    #[test]
    fn test_seed_review_omits_created_at() {
        let value = serde_json::to_value(review("r1", "a1")).unwrap();
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_new_review_defaults_rating() {
        let review = NewReview::from_json(&json!({"place_id": "a1", "comment": "Great!"})).unwrap();
        assert_eq!(review.rating, DEFAULT_RATING);
        assert_eq!(review.comment, "Great!");
    }

    #[test]
    fn test_new_review_null_rating_defaults() {
        let review =
            NewReview::from_json(&json!({"place_id": "a1", "comment": "ok", "rating": null}))
                .unwrap();
        assert_eq!(review.rating, DEFAULT_RATING);
    }

    #[test]
    fn test_new_review_accepts_text_alias() {
        let review = NewReview::from_json(&json!({"place_id": "a1", "text": "Legacy"})).unwrap();
        assert_eq!(review.comment, "Legacy");
    }

    #[test]
    fn test_new_review_empty_comment_falls_back_to_text() {
        let review =
            NewReview::from_json(&json!({"place_id": "a1", "comment": "", "text": "Fallback"}))
                .unwrap();
        assert_eq!(review.comment, "Fallback");
    }

    #[test]
    fn test_new_review_rating_range_unchecked() {
        let review =
            NewReview::from_json(&json!({"place_id": "a1", "comment": "x", "rating": 42}))
                .unwrap();
        assert_eq!(review.rating, 42);
    }

    #[test]
    fn test_new_review_requires_place_and_comment() {
        for body in [
            json!({}),
            json!({"place_id": "a1"}),
            json!({"comment": "x"}),
            json!({"place_id": "", "comment": "x"}),
            json!({"place_id": 0, "comment": "x"}),
            json!({"place_id": false, "comment": "x"}),
            json!({"place_id": [], "comment": "x"}),
            json!([1, 2, 3]),
            Value::Null,
        ] {
            let err = NewReview::from_json(&body).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "body: {body}");
        }
    }

    #[test]
    fn test_new_review_rejects_non_integer_rating() {
        for rating in [json!("five"), json!(4.5), json!("4.5"), json!(true), json!([5])] {
            let err = NewReview::from_json(&json!({"place_id": "a1", "comment": "x", "rating": rating}))
                .unwrap_err();
            assert_eq!(err.to_string(), "Validation error: rating must be an integer");
        }
    }

    #[test]
    fn test_new_review_coerces_whole_number_ratings() {
        for (rating, expected) in [
            (json!("5"), 5),
            (json!(" 3 "), 3),
            (json!(4.0), 4),
            (json!("2.0"), 2),
            (json!(-1), -1),
        ] {
            let review =
                NewReview::from_json(&json!({"place_id": "a1", "comment": "x", "rating": rating}))
                    .unwrap();
            assert_eq!(review.rating, expected);
        }
    }

    #[test]
    fn test_new_review_non_string_place_id_is_kept_as_key() {
        let review = NewReview::from_json(&json!({"place_id": 7, "comment": "x"})).unwrap();
        assert_eq!(review.place_id, "7");

        let review = NewReview::from_json(&json!({"place_id": true, "comment": "x"})).unwrap();
        assert_eq!(review.place_id, "true");
    }
}
