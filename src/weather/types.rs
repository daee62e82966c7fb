//! Fixed-capacity result types.
//!
//! Every struct is plain data with `Default` values of `0`, `0.0` and empty
//! strings, which is also what a field absent from the JSON response decodes
//! to. Text longer than a field's capacity is truncated.

use crate::weather::decode::text;
use core::fmt::Write as _;
use heapless::{String, Vec};
use serde::Deserialize;

/// Capacity of city names.
pub const CITY_NAME_LEN: usize = 64;
/// Capacity of ISO 3166 country codes.
pub const COUNTRY_LEN: usize = 8;
/// Capacity of state names.
pub const STATE_LEN: usize = 32;
/// Capacity of the condition group (`Rain`, `Clouds`, ...).
pub const CONDITION_MAIN_LEN: usize = 32;
/// Capacity of condition descriptions.
pub const DESCRIPTION_LEN: usize = 64;
/// Capacity of icon codes.
pub const ICON_LEN: usize = 8;
/// Capacity of forecast timestamps (`2026-01-08 12:00:00`).
pub const DT_TXT_LEN: usize = 20;
/// Capacity of an icon URL.
pub const ICON_URL_LEN: usize = 64;

/// Most results a geocoding request may return.
pub const MAX_GEO_RESULTS: usize = 5;
/// Most 3-hour steps a forecast may hold (5 days).
pub const MAX_FORECAST_ITEMS: usize = 40;

/// Copies `s` into a fixed-capacity string, dropping whole characters that
/// do not fit.
pub fn truncate<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// The first `N` elements of a JSON array plus the array's full length.
///
/// Elements beyond the capacity are skipped without being decoded, so a
/// short buffer never turns into an error; compare [`Bounded::total`] with
/// [`Bounded::len`] to detect truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounded<T, const N: usize> {
    items: Vec<T, N>,
    total: usize,
}

impl<T, const N: usize> Bounded<T, N> {
    /// An empty sequence.
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub(crate) fn from_parts(items: Vec<T, N>, total: usize) -> Self {
        Self { items, total }
    }

    /// The stored items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of elements the API returned.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether some returned elements were dropped.
    pub fn is_truncated(&self) -> bool {
        self.total > self.items.len()
    }

    /// Iterates over the stored items.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Keeps at most `len` items; `total` is unchanged.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Consumes the sequence, returning the stored items.
    pub fn into_items(self) -> Vec<T, N> {
        self.items
    }
}

impl<T, const N: usize> Default for Bounded<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> core::ops::Deref for Bounded<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Bounded<T, N> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A place resolved by the geocoding API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeoLocation {
    /// Place name.
    #[serde(deserialize_with = "text")]
    pub name: String<CITY_NAME_LEN>,
    /// ISO 3166 country code.
    #[serde(deserialize_with = "text")]
    pub country: String<COUNTRY_LEN>,
    /// State, where the API knows one.
    #[serde(deserialize_with = "text")]
    pub state: String<STATE_LEN>,
    /// Latitude in degrees.
    pub lat: f32,
    /// Longitude in degrees.
    pub lon: f32,
}

/// A weather condition (the first entry of the API's `weather` array).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherCondition {
    /// Condition id, e.g. `500` for light rain.
    pub id: i32,
    /// Condition group (`Rain`, `Snow`, `Clouds`, ...).
    #[serde(deserialize_with = "text")]
    pub main: String<CONDITION_MAIN_LEN>,
    /// Localised description.
    #[serde(deserialize_with = "text")]
    pub description: String<DESCRIPTION_LEN>,
    /// Icon code, e.g. `10d`.
    #[serde(deserialize_with = "text")]
    pub icon: String<ICON_LEN>,
}

impl WeatherCondition {
    /// URL of the 2x PNG rendering of this condition's icon.
    pub fn icon_url(&self) -> String<ICON_URL_LEN> {
        let mut url = String::new();
        // The icon code is at most ICON_LEN bytes, so this always fits.
        let _ = write!(url, "https://openweathermap.org/img/wn/{}@2x.png", self.icon);
        url
    }
}

/// Temperature, pressure and humidity block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MainData {
    /// Temperature.
    pub temp: f32,
    /// Perceived temperature.
    pub feels_like: f32,
    /// Minimum temperature currently observed.
    pub temp_min: f32,
    /// Maximum temperature currently observed.
    pub temp_max: f32,
    /// Atmospheric pressure (hPa).
    pub pressure: i32,
    /// Humidity (%).
    pub humidity: i32,
    /// Pressure at sea level (hPa).
    pub sea_level: i32,
    /// Pressure at ground level (hPa).
    pub grnd_level: i32,
}

/// Wind block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Wind {
    /// Wind speed.
    pub speed: f32,
    /// Direction (meteorological degrees).
    pub deg: i32,
    /// Gust speed.
    pub gust: f32,
}

/// Current conditions at a location.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "crate::weather::decode::wire::CurrentWeather")]
pub struct CurrentWeather {
    /// Latitude echoed by the API.
    pub lat: f32,
    /// Longitude echoed by the API.
    pub lon: f32,
    /// Primary condition.
    pub weather: WeatherCondition,
    /// Temperature block.
    pub main: MainData,
    /// Visibility (meters).
    pub visibility: i32,
    /// Wind block.
    pub wind: Wind,
    /// Cloudiness (%).
    pub clouds: i32,
    /// Rain volume over the last hour (mm).
    pub rain_1h: f32,
    /// Snow volume over the last hour (mm).
    pub snow_1h: f32,
    /// Time of data calculation (unix, UTC).
    pub dt: u64,
    /// ISO 3166 country code.
    pub country: String<COUNTRY_LEN>,
    /// Sunrise (unix, UTC).
    pub sunrise: u64,
    /// Sunset (unix, UTC).
    pub sunset: u64,
    /// Shift from UTC in seconds.
    pub timezone: i32,
    /// City name.
    pub name: String<CITY_NAME_LEN>,
}

/// Pollutant concentrations in μg/m³.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AirComponents {
    /// Carbon monoxide.
    pub co: f32,
    /// Nitrogen monoxide.
    pub no: f32,
    /// Nitrogen dioxide.
    pub no2: f32,
    /// Ozone.
    pub o3: f32,
    /// Sulphur dioxide.
    pub so2: f32,
    /// Fine particles.
    pub pm2_5: f32,
    /// Coarse particles.
    pub pm10: f32,
    /// Ammonia.
    pub nh3: f32,
}

/// Air quality at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(from = "crate::weather::decode::wire::AirPollution")]
pub struct AirPollution {
    /// Time of the measurement or prediction (unix, UTC).
    pub dt: u64,
    /// Air Quality Index, 1 (good) to 5 (very poor); 0 when absent.
    pub aqi: u8,
    /// Pollutant concentrations.
    pub components: AirComponents,
}

impl AirPollution {
    /// The index as an [`AirQuality`] level.
    pub fn air_quality(&self) -> Option<AirQuality> {
        AirQuality::from_index(self.aqi)
    }
}

/// Air Quality Index levels as defined by OpenWeatherMap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AirQuality {
    /// Index 1.
    Good = 1,
    /// Index 2.
    Fair = 2,
    /// Index 3.
    Moderate = 3,
    /// Index 4.
    Poor = 4,
    /// Index 5.
    VeryPoor = 5,
}

impl AirQuality {
    /// Level for an index in `1..=5`.
    pub fn from_index(aqi: u8) -> Option<Self> {
        match aqi {
            1 => Some(AirQuality::Good),
            2 => Some(AirQuality::Fair),
            3 => Some(AirQuality::Moderate),
            4 => Some(AirQuality::Poor),
            5 => Some(AirQuality::VeryPoor),
            _ => None,
        }
    }

    /// Human-readable name of the level.
    pub fn description(self) -> &'static str {
        match self {
            AirQuality::Good => "Good",
            AirQuality::Fair => "Fair",
            AirQuality::Moderate => "Moderate",
            AirQuality::Poor => "Poor",
            AirQuality::VeryPoor => "Very Poor",
        }
    }
}

/// Description of a raw index, `"Unknown"` outside `1..=5`.
pub fn aqi_description(aqi: u8) -> &'static str {
    AirQuality::from_index(aqi).map_or("Unknown", AirQuality::description)
}

/// One 3-hour step of the 5-day forecast.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "crate::weather::decode::wire::ForecastItem")]
pub struct ForecastItem {
    /// Forecasted time (unix, UTC).
    pub dt: u64,
    /// Temperature block.
    pub main: MainData,
    /// Primary condition.
    pub weather: WeatherCondition,
    /// Wind block.
    pub wind: Wind,
    /// Cloudiness (%).
    pub clouds: i32,
    /// Visibility (meters).
    pub visibility: i32,
    /// Probability of precipitation, 0 to 1.
    pub pop: f32,
    /// Rain volume over the 3 hours (mm).
    pub rain_3h: f32,
    /// Snow volume over the 3 hours (mm).
    pub snow_3h: f32,
    /// Forecasted time, `YYYY-MM-DD hh:mm:ss`.
    pub dt_txt: String<DT_TXT_LEN>,
}

/// 5-day / 3-hour forecast.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "crate::weather::decode::wire::Forecast")]
pub struct Forecast {
    /// Forecast steps, at most [`MAX_FORECAST_ITEMS`].
    pub items: Bounded<ForecastItem, MAX_FORECAST_ITEMS>,
    /// City name.
    pub city_name: String<CITY_NAME_LEN>,
    /// ISO 3166 country code.
    pub country: String<COUNTRY_LEN>,
    /// City latitude.
    pub lat: f32,
    /// City longitude.
    pub lon: f32,
    /// Shift from UTC in seconds.
    pub timezone: i32,
    /// Sunrise (unix, UTC).
    pub sunrise: u64,
    /// Sunset (unix, UTC).
    pub sunset: u64,
}
