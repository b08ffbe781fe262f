//! Client core for the Pati pet-care platform.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The mobile host executes the
//! actual HTTP round-trip; everything else (auth session, validation,
//! backend-to-client mapping, list screen state) lives here and is
//! deterministic.
//!
//! # Design
//! - `ApiClient` holds the base URL and a shared `SessionProvider`; the
//!   session token is attached to every request it builds.
//! - Domain services (`client.pets()`, `client.medical()`, ...) split each
//!   operation into `build_*` and `parse_*`.
//! - Reads degrade to empty / `None`; writes return `Result<_, ApiError>`.
//! - Backend JSON is translated in one place (`mapper`); nothing else
//!   knows backend field names.
//! - For hosts that prefer one call per operation, `ApiClient::get` and
//!   friends run a request through a `Transport` and wrap the outcome in an
//!   `ApiResponse { data, error }` envelope.

pub mod client;
pub mod config;
pub mod deeplink;
pub mod error;
pub mod feed;
pub mod http;
pub mod mapper;
pub mod screen;
pub mod services;
pub mod session;
pub mod stats;
pub mod types;
pub mod validation;

pub use client::{ApiClient, ApiResponse};
pub use config::ClientConfig;
pub use error::ApiError;
pub use feed::{build_feed, FeedItem};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use screen::{Applied, FormState, ListScreen, LoadTicket, ViewState};
pub use session::{MemoryStore, Session, SessionProvider, SessionStore};
pub use stats::{ProfileData, ProfileStats};
pub use types::*;
pub use validation::{FieldError, ValidationErrors};
