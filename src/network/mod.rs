//! A network abstraction layer for embedded systems
//!
//! The platform owns the actual socket (a WiFi module's TCP stack, a TLS
//! session, an `std` socket on a host). This module only describes what the
//! weather client needs from it: a byte stream that can be read, written,
//! polled for liveness and closed, plus a connector that opens such a stream
//! to a host.
//!

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Protocol-specific client implementations
pub mod application;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Connect, Connection, Read, Scheme, Write};
}

/// Port used for plain HTTP.
pub const HTTP_PORT: u16 = 80;
/// Port used for HTTPS.
pub const HTTPS_PORT: u16 = 443;

/// Transport selection for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Plain TCP on port 80.
    #[default]
    Http,
    /// TLS on port 443.
    Https,
}

impl Scheme {
    /// The default port for this scheme.
    pub fn port(self) -> u16 {
        match self {
            Scheme::Http => HTTP_PORT,
            Scheme::Https => HTTPS_PORT,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Scheme {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Scheme::Http => defmt::write!(f, "http"),
            Scheme::Https => defmt::write!(f, "https"),
        }
    }
}

// Core synchronous traits
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read whatever data is currently available.
    ///
    /// Returns `Ok(0)` when nothing is buffered right now; use
    /// [`Connection::is_connected`] to tell "no data yet" from end of stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A synchronous connection
pub trait Connection: Read + Write + Close {
    /// Whether the peer still holds the connection open.
    ///
    /// Data may remain readable after this turns `false`.
    fn is_connected(&self) -> bool;
}

/// A synchronous connector (client)
pub trait Connect {
    /// Associated connection type
    type Connection: Connection;
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Open a connection to `host` using the given scheme's transport.
    fn connect(&mut self, host: &str, scheme: Scheme) -> Result<Self::Connection, Self::Error>;
}
