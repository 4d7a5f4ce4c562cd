//! Client library for the event-ticketing vendor dashboard backend.
//!
//! The crate centers on three pieces:
//!
//! - [`ApiClient`], the authenticated request engine. It owns the token
//!   pair, keeps it in step with a pluggable [`storage::TokenStore`], and
//!   transparently refreshes an expired access token once per request,
//!   sharing a single in-flight refresh across concurrent callers.
//! - [`Session`], the application-facing session: bootstrap from stored
//!   tokens with retry, login, logout, and the current-user snapshot.
//! - Typed endpoint methods on [`ApiClient`] covering events, ticket
//!   types, media, counter sales, gate scans, statistics and CSV export.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ticketkit_core::storage::MemoryTokenStore;
//! use ticketkit_core::{ApiClient, Config, Session};
//!
//! # async fn run() -> ticketkit_core::Result<()> {
//! let client = Arc::new(ApiClient::new(
//!     &Config::from_env(),
//!     Arc::new(MemoryTokenStore::new()),
//! )?);
//! let session = Session::new(Arc::clone(&client));
//! session.initialize().await;
//! # Ok(())
//! # }
//! ```

mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod retry;
pub mod session;
pub mod storage;
pub mod types;

pub use api::MediaFile;
pub use client::ApiClient;
pub use config::Config;
pub use error::{Result, TicketKitError};
pub use session::{Session, SessionEvents};
