//! The [`OpenWeatherMap`] client.

use crate::network::Connect;
use crate::network::application::http::Client;
use crate::network::error::Error as NetworkError;
use crate::time::Clock;
use crate::weather::cache::WeatherCache;
use crate::weather::config::{Config, Units};
use crate::weather::decode;
use crate::weather::error::Error;
use crate::weather::query::{self, Path};
use crate::weather::types::{
    AirPollution, Bounded, CurrentWeather, Forecast, GeoLocation, MAX_GEO_RESULTS, truncate,
};
use heapless::Vec;

/// Default size of the response buffer, enough for a full 40-step forecast.
pub const DEFAULT_RESPONSE_CAPACITY: usize = 24 * 1024;

/// Blocking OpenWeatherMap client.
///
/// Every request opens a fresh connection through the connector, sends one
/// `GET`, reads the whole response into an internal buffer of `BUF` bytes
/// and closes the connection again. Calls take `&mut self`, so one client
/// serves one request at a time.
///
/// Each call returns its outcome and also records it: [`last_error`] holds
/// the error of the most recent call (`None` after a success) and
/// [`last_http_code`] the status code it received.
///
/// [`last_error`]: OpenWeatherMap::last_error
/// [`last_http_code`]: OpenWeatherMap::last_http_code
pub struct OpenWeatherMap<N: Connect, K: Clock, const BUF: usize = DEFAULT_RESPONSE_CAPACITY> {
    connector: N,
    clock: K,
    config: Config,
    buffer: Vec<u8, BUF>,
    cache: WeatherCache<CurrentWeather>,
    last_http_code: u16,
    last_error: Option<Error>,
}

impl<N: Connect, K: Clock, const BUF: usize> OpenWeatherMap<N, K, BUF> {
    /// Creates a client. No connection is opened until the first request.
    pub fn new(connector: N, clock: K, config: Config) -> Self {
        let cache = WeatherCache::new(config.cache_duration_ms);
        Self {
            connector,
            clock,
            config,
            buffer: Vec::new(),
            cache,
            last_http_code: 0,
            last_error: None,
        }
    }

    /// Current settings.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Changes the unit system. Drops the cached weather, which was
    /// fetched in the old units.
    pub fn set_units(&mut self, units: Units) {
        if self.config.units != units {
            self.cache.clear();
        }
        self.config.units = units;
    }

    /// Changes the description language. Drops the cached weather.
    pub fn set_language(&mut self, language: &str) {
        let language = truncate(language);
        if self.config.language != language {
            self.cache.clear();
        }
        self.config.language = language;
    }

    /// Enables or disables diagnostics.
    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    /// Changes the lifetime of the current-weather cache; `0` disables it.
    pub fn set_cache_duration(&mut self, duration_ms: u32) {
        self.config.cache_duration_ms = duration_ms;
        self.cache.set_duration(duration_ms);
    }

    /// Changes the idle timeout of later requests.
    pub fn set_timeout(&mut self, timeout_ms: u32) {
        self.config.timeout_ms = timeout_ms;
    }

    /// Forgets the cached current weather.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Status code of the most recent request, `0` if none was received.
    pub fn last_http_code(&self) -> u16 {
        self.last_http_code
    }

    /// Error of the most recent call, `None` if it succeeded.
    pub fn last_error(&self) -> Option<Error> {
        self.last_error
    }

    /// The connector used to open connections.
    pub fn connector(&self) -> &N {
        &self.connector
    }

    /// Mutable access to the connector, e.g. to reconfigure TLS.
    pub fn connector_mut(&mut self) -> &mut N {
        &mut self.connector
    }

    // --- Geocoding ---

    /// Resolves a city name to up to `limit` places (clamped to `1..=5`).
    ///
    /// `state` only narrows results for US cities. An empty list is a
    /// successful answer.
    pub fn coordinates_by_name(
        &mut self,
        city: &str,
        country: Option<&str>,
        state: Option<&str>,
        limit: usize,
    ) -> Result<Bounded<GeoLocation, MAX_GEO_RESULTS>, Error> {
        let limit = query::clamp_geo_limit(limit);
        let path = query::direct_geocoding(&self.config, city, country, state, limit);
        self.call(path, |body| {
            let mut found = decode::geo_locations::<MAX_GEO_RESULTS>(body)?;
            found.truncate(limit);
            Ok(found)
        })
    }

    /// Resolves a zip or post code. The result has no `state`.
    pub fn coordinates_by_zip(&mut self, zip: &str, country: &str) -> Result<GeoLocation, Error> {
        let path = query::zip_geocoding(&self.config, zip, country);
        self.call(path, decode::geo_location)
    }

    /// Names the places at the given coordinates, up to `limit` (clamped to
    /// `1..=5`).
    pub fn location_by_coordinates(
        &mut self,
        lat: f32,
        lon: f32,
        limit: usize,
    ) -> Result<Bounded<GeoLocation, MAX_GEO_RESULTS>, Error> {
        let limit = query::clamp_geo_limit(limit);
        let path = query::reverse_geocoding(&self.config, lat, lon, limit);
        self.call(path, |body| {
            let mut found = decode::geo_locations::<MAX_GEO_RESULTS>(body)?;
            found.truncate(limit);
            Ok(found)
        })
    }

    // --- Weather ---

    /// Current weather at the given coordinates.
    ///
    /// A result fetched for coordinates within about 1 km is reused while it
    /// is younger than the configured cache duration; a cache hit sends no
    /// request.
    pub fn current_weather(&mut self, lat: f32, lon: f32) -> Result<CurrentWeather, Error> {
        if let Some(cached) = self.cache.lookup(lat, lon, self.clock.now_ms()) {
            let weather = cached.clone();
            if self.config.debug {
                debug!("owm: using cached weather");
            }
            self.last_error = None;
            return Ok(weather);
        }

        let path = query::current_weather(&self.config, lat, lon);
        let weather = self.call(path, decode::current_weather)?;
        let now = self.clock.now_ms();
        self.cache.store(lat, lon, now, weather.clone());
        Ok(weather)
    }

    /// Current weather for a city, resolved with a single-result geocoding
    /// request first.
    ///
    /// Fails with [`Error::LocationNotFound`] without a second request when
    /// the city is unknown.
    pub fn current_weather_by_city(
        &mut self,
        city: &str,
        country: Option<&str>,
    ) -> Result<CurrentWeather, Error> {
        let place = self.locate(city, country)?;
        self.current_weather(place.lat, place.lon)
    }

    /// 5-day forecast in 3-hour steps. `cnt` limits the number of steps
    /// (clamped to 40); `0` requests all of them.
    pub fn forecast(&mut self, lat: f32, lon: f32, cnt: usize) -> Result<Forecast, Error> {
        let cnt = query::clamp_forecast_count(cnt);
        let path = query::forecast(&self.config, lat, lon, cnt);
        self.call(path, |body| {
            let mut forecast = decode::forecast(body)?;
            if cnt > 0 {
                forecast.items.truncate(cnt);
            }
            Ok(forecast)
        })
    }

    /// Forecast for a city, resolved like [`current_weather_by_city`].
    ///
    /// [`current_weather_by_city`]: OpenWeatherMap::current_weather_by_city
    pub fn forecast_by_city(
        &mut self,
        city: &str,
        country: Option<&str>,
        cnt: usize,
    ) -> Result<Forecast, Error> {
        let place = self.locate(city, country)?;
        self.forecast(place.lat, place.lon, cnt)
    }

    // --- Air pollution ---

    /// Current air quality index and pollutant concentrations.
    pub fn air_pollution(&mut self, lat: f32, lon: f32) -> Result<AirPollution, Error> {
        let path = query::air_pollution(&self.config, lat, lon);
        self.call(path, decode::air_pollution)
    }

    /// Hourly air pollution forecast, keeping the first `M` hours.
    pub fn air_pollution_forecast<const M: usize>(
        &mut self,
        lat: f32,
        lon: f32,
    ) -> Result<Bounded<AirPollution, M>, Error> {
        let path = query::air_pollution_forecast(&self.config, lat, lon);
        self.call(path, decode::air_pollution_list::<M>)
    }

    /// Hourly air pollution between two unix timestamps, keeping the first
    /// `M` hours.
    pub fn air_pollution_history<const M: usize>(
        &mut self,
        lat: f32,
        lon: f32,
        start: u64,
        end: u64,
    ) -> Result<Bounded<AirPollution, M>, Error> {
        let path = query::air_pollution_history(&self.config, lat, lon, start, end);
        self.call(path, decode::air_pollution_list::<M>)
    }

    fn locate(&mut self, city: &str, country: Option<&str>) -> Result<GeoLocation, Error> {
        let found = self.coordinates_by_name(city, country, None, 1)?;
        let place = found.iter().next().cloned().ok_or(Error::LocationNotFound);
        self.record(place)
    }

    fn call<T>(
        &mut self,
        path: Result<Path, Error>,
        decode: impl FnOnce(&[u8]) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let result = match path {
            Ok(path) => self.fetch(&path).and_then(decode),
            Err(error) => {
                self.last_http_code = 0;
                Err(error)
            }
        };
        self.record(result)
    }

    /// Runs one `GET` and returns the body of a `200` response.
    fn fetch(&mut self, path: &str) -> Result<&[u8], Error> {
        self.last_http_code = 0;
        let debug = self.config.debug;

        if debug {
            debug!("owm: connecting to {}", self.config.host.as_str());
        }
        let connection = self
            .connector
            .connect(&self.config.host, self.config.scheme)
            .map_err(|_| Error::ConnectionFailed)?;

        if debug {
            debug!("owm: GET {}", without_key(path));
        }
        let client = Client::new(connection, self.config.timeout_ms);
        match client.get(&self.config.host, path, &mut self.clock, &mut self.buffer) {
            Ok(response) => {
                self.last_http_code = response.status_code;
                if debug {
                    debug!("owm: HTTP {}, {} bytes", response.status_code, response.body.len());
                }
                Ok(response.body)
            }
            Err(error) => {
                if let NetworkError::UnexpectedStatus(code) = error {
                    self.last_http_code = code;
                }
                Err(error.into())
            }
        }
    }

    fn record<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(error) => {
                self.last_error = Some(*error);
                if self.config.debug {
                    warn!("owm: {}", error);
                }
            }
        }
        result
    }
}

impl<N: Connect, K: Clock, const BUF: usize> core::fmt::Debug for OpenWeatherMap<N, K, BUF> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OpenWeatherMap")
            .field("host", &self.config.host)
            .field("units", &self.config.units)
            .field("last_http_code", &self.last_http_code)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

/// The request path up to the API key, for logging.
fn without_key(path: &str) -> &str {
    path.find("&appid=").map_or(path, |end| &path[..end])
}
