//! # Application Layer Network Protocols
//!
//! Application layer (OSI Layer 7) protocols built on the core network
//! traits. Each protocol works with any type implementing
//! [`Connection`](crate::network::Connection), uses fixed-size buffers and
//! reports failures through [`Error`](crate::network::error::Error).
//!
//! - **[`http`]**: a blocking HTTP/1.1 GET reader

/// HTTP client implementation.
///
/// Provides a minimal HTTP/1.1 GET client for embedded systems with an idle
/// timeout and `Connection: close` semantics.
pub mod http;
