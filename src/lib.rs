//! Log-driven brute-force detection and IP mitigation service.
//!
//! Three independent components make up the core: a stateless
//! `LogScanner` that flags IPs with repeated authentication failures, a
//! file-backed `Blocklist`, and a sliding-window `RateLimiter`. The
//! `ProtectionService` composes them and the `api` module exposes the
//! operations over HTTP.

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod service;
pub mod utils;
