//! Error type of the weather client.

use crate::network::error::Error as NetworkError;

/// Why a weather API call failed.
///
/// The `Display` text is the short message an application would print on a
/// serial console, e.g. `HTTP Error: 404`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The transport could not open a connection to the API host.
    ConnectionFailed,
    /// No response byte arrived within the configured timeout.
    Timeout,
    /// The API answered with a status other than `200`.
    Http(u16),
    /// The body was not the JSON document expected for the endpoint.
    Json,
    /// Geocoding returned no match for the requested place.
    LocationNotFound,
    /// The body was valid JSON of the wrong shape (object instead of array).
    InvalidResponse,
    /// The body did not fit into the response buffer.
    ResponseTooLarge,
    /// The request path did not fit into its fixed buffer.
    RequestTooLarge,
    /// Any other transport failure.
    Network(NetworkError),
}

impl From<NetworkError> for Error {
    fn from(error: NetworkError) -> Self {
        match error {
            NetworkError::Timeout => Error::Timeout,
            NetworkError::UnexpectedStatus(code) => Error::Http(code),
            NetworkError::BufferOverflow => Error::ResponseTooLarge,
            NetworkError::ConnectionRefused | NetworkError::InvalidAddress => {
                Error::ConnectionFailed
            }
            other => Error::Network(other),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::ConnectionFailed => f.write_str("Connection failed"),
            Error::Timeout => f.write_str("Response timeout"),
            Error::Http(code) => write!(f, "HTTP Error: {}", code),
            Error::Json => f.write_str("JSON parse error"),
            Error::LocationNotFound => f.write_str("Location not found"),
            Error::InvalidResponse => f.write_str("Invalid response format"),
            Error::ResponseTooLarge => f.write_str("Response too large"),
            Error::RequestTooLarge => f.write_str("Request path too long"),
            Error::Network(error) => write!(f, "Network error: {}", error),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::ConnectionFailed => defmt::write!(f, "Connection failed"),
            Error::Timeout => defmt::write!(f, "Response timeout"),
            Error::Http(code) => defmt::write!(f, "HTTP Error: {}", code),
            Error::Json => defmt::write!(f, "JSON parse error"),
            Error::LocationNotFound => defmt::write!(f, "Location not found"),
            Error::InvalidResponse => defmt::write!(f, "Invalid response format"),
            Error::ResponseTooLarge => defmt::write!(f, "Response too large"),
            Error::RequestTooLarge => defmt::write!(f, "Request path too long"),
            Error::Network(error) => defmt::write!(f, "Network error: {}", error),
        }
    }
}
