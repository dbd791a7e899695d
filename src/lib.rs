//! Content API for a food and travel blog.
//!
//! Posts, authors, categories and pages live in a headless CMS; this crate
//! reads them per request, filters posts for search, counts recipe-idea
//! votes and validates form submissions before writing them back.

pub mod app;
pub mod config;
pub mod demo_seeder;
pub mod error;
pub mod forms;
pub mod store;
pub mod votes;
pub mod models {
    pub mod content;
    pub mod forms;
    pub mod search;
}
pub mod search {
    pub mod engine;
}
pub mod rendering {
    pub mod markdown;
}
pub mod api {
    pub mod content;
    pub mod errors;
    pub mod extract;
    pub mod forms;
    pub mod recipe_ideas;
    pub mod search;
}
