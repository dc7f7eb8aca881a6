//! # lpoll HTTP long poll
//!
//! HTTP transport for [`lpoll_core`]: an [`axum`] router exposing
//! long-poll and publish endpoints over a shared [`Hub`](lpoll_core::Hub).
//!
//! | Endpoint                | Method | Success                  | Other                         |
//! |-------------------------|--------|--------------------------|-------------------------------|
//! | `/poll/{client_id}`     | GET    | 200 `{message, time}`    | 204 on timeout or eviction    |
//! | `/publish/{client_id}`  | POST   | 200                      | 404 unknown, 503 full, 400 bad|
//!
//! Request validation lives here; the core only ever sees a non-empty
//! [`ClientId`](lpoll_core::ClientId) and a non-empty message.

pub mod error;
pub mod server;

pub use server::{HttpServerBuilder, HttpServerState, router, serve};
