pub mod domain {
    pub mod error;
    pub mod models;
    pub mod repository;
    pub mod user;
}

pub mod data {
    pub mod memory;
    pub mod seed;
    pub mod user_repository;
}

pub mod application {
    pub mod auth_service;
    pub mod service;
}

pub mod infrastructure {
    pub mod config;
    pub mod logging;
    pub mod security;
}

pub mod presentation {
    pub mod auth;
    pub mod handlers;
    pub mod middleware;
    pub mod routes;
}
