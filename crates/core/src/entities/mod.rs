//! Backend records as the console sees them.
//!
//! Every record is created, mutated, and deleted on the backend. These types
//! only mirror the JSON the admin endpoints return, with lenient defaults so
//! a partially populated record never fails a whole list.

pub mod cart;
pub mod comment;
pub mod dashboard;
mod lenient;
pub mod notification;
pub mod product;

pub use cart::{Cart, CartItem};
pub use comment::{Comment, CommentAuthor, CommentProduct, Reply};
pub use dashboard::{DashboardSnapshot, DashboardUser};
pub use notification::{Notification, NotificationDraft};
pub use product::{PRODUCT_CATEGORIES, Product, canonical_category};
