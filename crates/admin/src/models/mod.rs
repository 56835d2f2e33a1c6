//! Domain models for the admin panel.
//!
//! Plain persisted records; the schema they live in is owned by the hosting
//! application's persistence layer. Each record implements
//! [`crate::query::FieldAccess`] for the columns its screens reference.

pub mod blog;
pub mod shop;

pub use blog::{Author, Category, Comment, CommentableRef, Post};
pub use shop::{
    Address, Brand, Customer, Gender, MediaItem, Order, OrderItem, Payment, Product, ShopCategory,
};
