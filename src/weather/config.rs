//! Client configuration.

pub use crate::network::Scheme;
use crate::weather::types::truncate;
use heapless::String;

/// Host serving every OpenWeatherMap endpoint used by this crate.
pub const API_HOST: &str = "api.openweathermap.org";

/// Default lifetime of a cached current-weather result.
pub const DEFAULT_CACHE_DURATION_MS: u32 = 60_000;

/// Default idle timeout for a single request.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// Language the API answers in when no `lang` parameter is sent.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Maximum length of an API key.
pub const API_KEY_LEN: usize = 48;
/// Maximum length of a language code (`zh_cn`, `pt_br`, ...).
pub const LANGUAGE_LEN: usize = 8;
/// Maximum length of the API host name.
pub const HOST_LEN: usize = 64;

/// Unit system for temperatures and wind speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    /// Kelvin, meter/sec. The API default; no `units` parameter is sent.
    Standard,
    /// Celsius, meter/sec.
    #[default]
    Metric,
    /// Fahrenheit, miles/hour.
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter, `None` for [`Units::Standard`].
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            Units::Standard => None,
            Units::Metric => Some("metric"),
            Units::Imperial => Some("imperial"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Units {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Units::Standard => defmt::write!(f, "standard"),
            Units::Metric => defmt::write!(f, "metric"),
            Units::Imperial => defmt::write!(f, "imperial"),
        }
    }
}

/// Settings of an [`OpenWeatherMap`](super::OpenWeatherMap) client.
///
/// Over-long strings are truncated to their fixed capacities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API key sent as `appid`.
    pub api_key: String<API_KEY_LEN>,
    /// Unit system.
    pub units: Units,
    /// Language code for textual descriptions.
    pub language: String<LANGUAGE_LEN>,
    /// Emit diagnostics through the `defmt`/`log` backends.
    pub debug: bool,
    /// Lifetime of the current-weather cache; `0` disables it.
    pub cache_duration_ms: u32,
    /// Idle timeout while waiting for response bytes.
    pub timeout_ms: u32,
    /// Plain HTTP or HTTPS.
    pub scheme: Scheme,
    /// API host name.
    pub host: String<HOST_LEN>,
}

impl Config {
    /// Configuration with the given key and default settings: metric units,
    /// English, no debug output, 60 s cache, 10 s timeout, plain HTTP.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: truncate(api_key),
            units: Units::default(),
            language: truncate(DEFAULT_LANGUAGE),
            debug: false,
            cache_duration_ms: DEFAULT_CACHE_DURATION_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            scheme: Scheme::Http,
            host: truncate(API_HOST),
        }
    }

    /// Sets the unit system.
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Sets the description language.
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = truncate(language);
        self
    }

    /// Enables or disables diagnostics.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the cache lifetime; `0` disables caching.
    pub fn with_cache_duration(mut self, duration_ms: u32) -> Self {
        self.cache_duration_ms = duration_ms;
        self
    }

    /// Sets the request idle timeout.
    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Selects plain HTTP or HTTPS.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Overrides the API host.
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = truncate(host);
        self
    }

    /// Language code to send, `None` when the API default applies.
    pub fn language_param(&self) -> Option<&str> {
        match self.language.as_str() {
            "" | DEFAULT_LANGUAGE => None,
            lang => Some(lang),
        }
    }
}
