//! Database repositories.

pub mod drinks;

pub use drinks::DrinksRepository;
