//! OpenWeatherMap API client.
//!
//! [`OpenWeatherMap`] wraps the geocoding, current weather, 5-day forecast and
//! air pollution endpoints on top of the blocking HTTP reader in
//! [`network::application::http`](crate::network::application::http). All
//! results are fixed-capacity values; nothing is allocated.
//!
//! ```rust,no_run
//! # use libowm::network::{Close, Connect, Connection, Read, Scheme, Write};
//! # use libowm::time::Clock;
//! # struct Wifi;
//! # struct Socket;
//! # impl Connection for Socket { fn is_connected(&self) -> bool { false } }
//! # impl Read for Socket {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, ()> { Ok(0) }
//! # }
//! # impl Write for Socket {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, ()> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), ()> { Ok(()) }
//! # }
//! # impl Close for Socket {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), ()> { Ok(()) }
//! # }
//! # impl Connect for Wifi {
//! #     type Connection = Socket;
//! #     type Error = ();
//! #     fn connect(&mut self, _host: &str, _scheme: Scheme) -> Result<Socket, ()> { Ok(Socket) }
//! # }
//! # struct Millis(u64);
//! # impl Clock for Millis {
//! #     fn now_ms(&self) -> u64 { self.0 }
//! #     fn delay_ms(&mut self, ms: u32) { self.0 += u64::from(ms) }
//! # }
//! use libowm::weather::{Config, OpenWeatherMap, Units};
//!
//! let config = Config::new("YOUR_API_KEY").with_units(Units::Metric);
//! let mut owm: OpenWeatherMap<_, _> = OpenWeatherMap::new(Wifi, Millis(0), config);
//!
//! match owm.current_weather_by_city("London", Some("GB")) {
//!     Ok(weather) => { let _ = weather.main.temp; }
//!     Err(error) => { let _ = (error, owm.last_http_code()); }
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod query;
pub mod types;

pub use cache::{CACHE_TOLERANCE_DEG, WeatherCache};
pub use client::{DEFAULT_RESPONSE_CAPACITY, OpenWeatherMap};
pub use config::{Config, Units};
pub use error::Error;
pub use types::{
    AirComponents, AirPollution, AirQuality, Bounded, CurrentWeather, Forecast, ForecastItem,
    GeoLocation, MainData, WeatherCondition, Wind, aqi_description,
};
