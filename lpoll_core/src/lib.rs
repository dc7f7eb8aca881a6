//! # lpoll core
//!
//! Long-poll pub/sub fan-out with a single pending event per client.
//!
//! ```text
//!   poll(id) ──► ClientRegistry::get_or_create ──► Mailbox::take_or_wait_until
//!                                                        ▲
//!   publish(id, msg) ──► ClientRegistry::lookup ──► Mailbox::try_deposit
//!
//!   Janitor ──(every sweep_interval)──► ClientRegistry::sweep ──► Mailbox::close
//! ```
//!
//! A client exists in the registry from its first poll until the janitor
//! evicts it for inactivity. Each client holds at most one pending
//! [`Event`]; a publish that finds the slot occupied is dropped rather than
//! queued, and a publish never waits.

extern crate alloc;

pub mod client_id;
pub mod config;
pub mod event;
pub mod hub;
pub mod janitor;
pub mod mailbox;
pub mod metrics;
pub mod poll;
pub mod publish;
pub mod registry;

pub use client_id::ClientId;
pub use config::HubConfig;
pub use event::Event;
pub use hub::Hub;
pub use janitor::Janitor;
pub use poll::PollOutcome;
pub use publish::PublishOutcome;
pub use registry::ClientRegistry;

/// Default long-poll wait (30 seconds).
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

/// Default inactivity window before a client is evicted (1 minute).
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 60;

/// Default janitor cadence (1 minute).
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
