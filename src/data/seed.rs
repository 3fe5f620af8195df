//! Demo dataset loaded at startup.

use crate::data::memory::InMemoryListingStore;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::models::{Place, Review};
use crate::domain::user::User;

pub const DEMO_EMAIL: &str = "demo@hbnb.io";
pub const DEMO_PASSWORD: &str = "secret";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn place(
    id: &str,
    title: &str,
    price: u32,
    description: &str,
    (latitude, longitude): (f64, f64),
    host: &str,
    (country, city): (&str, &str),
    amenities: &[&str],
    images: &[&str],
) -> Place {
    Place {
        id: id.to_string(),
        title: title.to_string(),
        price,
        description: description.to_string(),
        latitude,
        longitude,
        host: host.to_string(),
        country: Some(country.to_string()),
        city: Some(city.to_string()),
        amenities: strings(amenities),
        images: strings(images),
    }
}

fn review(id: &str, place_id: &str, user: &str, rating: i64, comment: &str) -> Review {
    Review {
        id: id.to_string(),
        place_id: place_id.to_string(),
        user: user.to_string(),
        rating,
        comment: comment.to_string(),
        created_at: None,
    }
}

pub fn places() -> Vec<Place> {
    vec![
        place(
            "c3",
            "Desert Eco ",
            150,
            "Sustainable dome in the heart of the desert.",
            (24.7743, 46.7386),
            "Salma",
            ("SA", "AlUla"),
            &["Solar power", "AC", "Star view"],
            &["images/sample4.jpg"],
        ),
        place(
            "d4",
            "Lakeside A-Frame",
            180,
            "A modern cabin on the lake edge.",
            (44.3148, -85.6024),
            "Khaled",
            ("US", "Michigan"),
            &["Fireplace", "WiFi", "Canoe"],
            &["images/sample3.jpg"],
        ),
        place(
            "e5",
            "Tropical Treehouse",
            210,
            "Live among the trees in this tropical escape.",
            (8.7832, -55.4915),
            "Fatima",
            ("BR", "Manaus"),
            &["Outdoor shower", "Breakfast included"],
            &["images/sample2.jpg"],
        ),
        place(
            "f6",
            "Scandinavian Loft",
            130,
            "Minimalist loft in a Nordic city.",
            (59.3293, 18.0686),
            "Sven",
            ("SE", "Stockholm"),
            &["Sauna", "Fast WiFi", "City view"],
            &["images/sample1.jpg"],
        ),
    ]
}

pub fn reviews() -> Vec<Review> {
    vec![
        review("r3", "c3", "salem", 5, "Magical dome in the desert!"),
        review("r4", "d4", "lena", 4, "Very peaceful by the lake."),
        review("r5", "e5", "ahmad", 5, "The treehouse was dreamy!"),
        review("r6", "f6", "sara", 3, "Loved the Scandinavian design."),
        review("r7", "c3", "noura", 4, "A quiet and eco-friendly escape."),
        review("r8", "c3", "jake", 5, "Stargazing at night was unforgettable."),
        review("r9", "d4", "reem", 5, "Woke up to birds and lake mist — perfect!"),
        review("r10", "d4", "mohammed", 4, "Comfortable and very scenic."),
        review("r11", "e5", "laura", 5, "Nature all around — felt alive!"),
        review("r12", "e5", "ali", 4, "Clean, cozy, and surrounded by trees."),
        review("r13", "f6", "emily", 4, "Minimalist but super functional."),
        review("r14", "f6", "abdullah", 5, "A hidden gem in Stockholm!"),
    ]
}

pub fn users() -> Vec<User> {
    vec![User {
        email: DEMO_EMAIL.to_string(),
        password: DEMO_PASSWORD.to_string(),
        first_name: "maram".to_string(),
        last_name: String::new(),
    }]
}

pub fn listing_store() -> InMemoryListingStore {
    InMemoryListingStore::new(places(), reviews())
}

pub fn user_repository() -> InMemoryUserRepository {
    InMemoryUserRepository::new(users())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let place_ids: HashSet<_> = places().into_iter().map(|p| p.id).collect();
        assert_eq!(place_ids.len(), 4);

        let review_ids: HashSet<_> = reviews().into_iter().map(|r| r.id).collect();
        assert_eq!(review_ids.len(), 12);
    }

    #[test]
    fn test_seed_comments_are_verbatim() {
        let reviews = reviews();
        let comment = |id: &str| {
            reviews
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.comment.as_str())
        };
        assert_eq!(comment("r9"), Some("Woke up to birds and lake mist — perfect!"));
        assert_eq!(comment("r11"), Some("Nature all around — felt alive!"));
    }

    #[test]
    fn test_every_seed_review_references_a_place() {
        let place_ids: HashSet<_> = places().into_iter().map(|p| p.id).collect();
        assert!(reviews().iter().all(|r| place_ids.contains(&r.place_id)));
    }
}
