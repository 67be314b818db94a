//! Named movie lists and their file-backed store.

mod store;
mod types;

pub use store::{ListError, ListStore};
pub use types::{Movie, MovieList};
