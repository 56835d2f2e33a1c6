//! Core types for Mercado.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod slug;
pub mod status;

pub use id::*;
pub use money::{MoneyError, validate_money_input};
pub use slug::{Slug, SlugError};
pub use status::*;
