//! Blog resources.

pub mod posts;

pub use posts::PostResource;
