//! HTTP/1.1 protocol implementation for embedded systems.
//!
//! This module provides a lightweight, blocking HTTP GET client designed for
//! `no_std` environments. Each [`Client`] owns one connection for exactly one
//! request/response exchange and closes it afterwards, whatever the outcome.
//!
//! # Features
//!
//! - Minimal request: `Host` and `Connection: close` headers only
//! - Two-state response reader (header scan, body)
//! - Idle timeout reset on every received byte
//! - Caller-supplied fixed-capacity body buffer
//!
//! # Usage
//!
//! ```rust,no_run
//! use heapless::Vec;
//! use libowm::network::application::http::Client;
//! use libowm::time::Clock;
//! # use libowm::network::{Close, Connection, Read, Write};
//! # struct MockConnection;
//! # impl Connection for MockConnection {
//! #     fn is_connected(&self) -> bool { false }
//! # }
//! # impl Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct Ticks(u64);
//! # impl Clock for Ticks {
//! #     fn now_ms(&self) -> u64 { self.0 }
//! #     fn delay_ms(&mut self, ms: u32) { self.0 += u64::from(ms) }
//! # }
//!
//! let connection = MockConnection;
//! let mut clock = Ticks(0);
//! let mut body: Vec<u8, 2048> = Vec::new();
//!
//! let client = Client::new(connection, 10_000);
//! let response = client.get("api.openweathermap.org", "/data/2.5/weather?lat=0&lon=0&appid=KEY", &mut clock, &mut body);
//! // response.map(|r| r.body) holds the JSON document on success
//! ```

/// HTTP client implementation and supporting types.
///
/// Contains the main [`Client`](client::Client) struct, the
/// [`ResponseScanner`](client::ResponseScanner) state machine and the
/// [`Response`](client::Response) view.
pub mod client;

pub use client::{Client, Response, ResponseScanner, State};
