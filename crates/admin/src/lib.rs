//! Shopdesk Admin library.
//!
//! Everything the console needs short of a user interface:
//! - [`backend`] - Typed client for the store backend's admin REST API
//! - [`session`] - The persisted admin token and authentication gate
//! - [`state`] - In-memory view state of the last fetched collections
//! - [`console`] - Screen operations that tie the three together
//! - [`notices`] - Success/failure messages emitted by every operation
//! - [`forms`] - Client-side checks on product and reply input
//!
//! # Security
//!
//! The admin token grants full write access to the catalog and to customer
//! carts. It is held as a [`secrecy::SecretString`], redacted from `Debug`,
//! and persisted to a file readable only by the current user.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod console;
pub mod forms;
pub mod notices;
pub mod session;
pub mod state;

pub use backend::{BackendClient, BackendError, ImageUpload, ProductForm};
pub use config::{AdminConfig, ConfigError, SentryConfig};
pub use console::{Console, ConsoleError, MutationOutcome, NotificationDelivery};
pub use forms::{FormError, ProductDraft};
pub use notices::{Notice, NoticeLevel, NoticeLog, NoticeSink, TracingNotices};
pub use session::{AuthGate, SessionError, SessionStore};
pub use state::{Collection, FetchTicket, Selection, ViewState};
