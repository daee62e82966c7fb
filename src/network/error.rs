//! Common error types for network operations

/// A common error type for network operations.
///
/// This enum defines the errors that can occur while talking to a remote
/// host over a [`Connection`](super::Connection). It is designed to be simple
/// and portable for `no_std` environments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// An operation was attempted on a connection that is not open.
    NotOpen,
    /// An error occurred during a write operation.
    WriteError,
    /// An error occurred during a read operation.
    ReadError,
    /// A connection attempt was refused.
    ConnectionRefused,
    /// No data arrived within the configured timeout.
    Timeout,
    /// The connection was closed before any response arrived.
    ConnectionClosed,
    /// An invalid address was provided.
    InvalidAddress,
    /// The peer sent something that is not a valid HTTP response.
    ProtocolError,
    /// A fixed-size buffer was too small for the data.
    BufferOverflow,
    /// The response carried a status code other than `200`.
    UnexpectedStatus(u16),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::NotOpen => f.write_str("connection not open"),
            Error::WriteError => f.write_str("write failed"),
            Error::ReadError => f.write_str("read failed"),
            Error::ConnectionRefused => f.write_str("connection refused"),
            Error::Timeout => f.write_str("timed out"),
            Error::ConnectionClosed => f.write_str("connection closed"),
            Error::InvalidAddress => f.write_str("invalid address"),
            Error::ProtocolError => f.write_str("malformed response"),
            Error::BufferOverflow => f.write_str("buffer overflow"),
            Error::UnexpectedStatus(code) => write!(f, "unexpected status {}", code),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NotOpen => defmt::write!(f, "NotOpen"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::ConnectionRefused => defmt::write!(f, "ConnectionRefused"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::ConnectionClosed => defmt::write!(f, "ConnectionClosed"),
            Error::InvalidAddress => defmt::write!(f, "InvalidAddress"),
            Error::ProtocolError => defmt::write!(f, "ProtocolError"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
            Error::UnexpectedStatus(code) => defmt::write!(f, "UnexpectedStatus({})", code),
        }
    }
}
