//! JSON body decoding.
//!
//! Responses are decoded with `serde-json-core` straight out of the response
//! buffer. Every key is optional: a missing key leaves the field at its
//! default. Unknown keys are skipped, and array elements beyond a
//! destination's capacity are skipped without being decoded.
//!
//! Strings holding escape sequences are unescaped through a small stack
//! buffer of [`UNESCAPE_LEN`] bytes. A longer escaped string is kept as it
//! appears on the wire instead of failing the whole body.

use crate::weather::error::Error;
use crate::weather::types::{AirPollution, Bounded, CurrentWeather, Forecast, GeoLocation};
use core::fmt;
use core::marker::PhantomData;
use heapless::{String, Vec};
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, SeqAccess, Visitor};

/// Room for one unescaped JSON string.
pub const UNESCAPE_LEN: usize = 128;

/// Decodes a `/data/2.5/weather` body.
pub fn current_weather(body: &[u8]) -> Result<CurrentWeather, Error> {
    parse(body)
}

/// Decodes a `/data/2.5/forecast` body.
pub fn forecast(body: &[u8]) -> Result<Forecast, Error> {
    parse(body)
}

/// Decodes a `/data/2.5/air_pollution` body; an empty `list` yields zeroes.
pub fn air_pollution(body: &[u8]) -> Result<AirPollution, Error> {
    parse::<wire::AirPollutionNow>(body).map(|now| now.list)
}

/// Decodes an air pollution forecast or history body, keeping the first `M`
/// entries.
pub fn air_pollution_list<const M: usize>(body: &[u8]) -> Result<Bounded<AirPollution, M>, Error> {
    parse::<wire::AirPollutionList<M>>(body).map(|list| list.list)
}

/// Decodes a direct or reverse geocoding body, which must be a JSON array.
pub fn geo_locations<const M: usize>(body: &[u8]) -> Result<Bounded<GeoLocation, M>, Error> {
    match body.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'[') => parse(body),
        Some(b'{') => Err(Error::InvalidResponse),
        _ => Err(Error::Json),
    }
}

/// Decodes a zip-code geocoding body (a single object).
pub fn geo_location(body: &[u8]) -> Result<GeoLocation, Error> {
    parse(body)
}

fn parse<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T, Error> {
    let mut scratch = [0u8; UNESCAPE_LEN];
    match serde_json_core::from_slice_escaped(body, &mut scratch) {
        Ok((value, _)) => Ok(value),
        Err(serde_json_core::de::Error::EscapedStringIsTooLong) => {
            serde_json_core::from_slice(body)
                .map(|(value, _)| value)
                .map_err(|_| Error::Json)
        }
        Err(_) => Err(Error::Json),
    }
}

/// Deserializes a JSON string into a fixed-capacity string, truncating.
pub(crate) fn text<'de, D, const N: usize>(deserializer: D) -> Result<String<N>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor<const N: usize>;

    impl<'de, const N: usize> Visitor<'de> for TextVisitor<N> {
        type Value = String<N>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(crate::weather::types::truncate(v))
        }
    }

    deserializer.deserialize_str(TextVisitor::<N>)
}

/// Deserializes the first element of a JSON array, skipping the rest.
pub(crate) fn first_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    struct FirstVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de> + Default> Visitor<'de> for FirstVisitor<T> {
        type Value = T;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an array")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<T, A::Error> {
            let first = seq.next_element::<T>()?.unwrap_or_default();
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(first)
        }
    }

    deserializer.deserialize_seq(FirstVisitor(PhantomData))
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for Bounded<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BoundedVisitor<T, const N: usize>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>, const N: usize> Visitor<'de> for BoundedVisitor<T, N> {
            type Value = Bounded<T, N>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut items: Vec<T, N> = Vec::new();
                while !items.is_full() {
                    match seq.next_element::<T>()? {
                        Some(item) => {
                            if items.push(item).is_err() {
                                return Err(de::Error::invalid_length(N + 1, &self));
                            }
                        }
                        None => {
                            let total = items.len();
                            return Ok(Bounded::from_parts(items, total));
                        }
                    }
                }

                let mut total = items.len();
                while seq.next_element::<IgnoredAny>()?.is_some() {
                    total += 1;
                }
                Ok(Bounded::from_parts(items, total))
            }
        }

        deserializer.deserialize_seq(BoundedVisitor(PhantomData))
    }
}

/// Shapes of the API documents, flattened into the public types.
pub(crate) mod wire {
    use super::{first_or_default, text};
    use crate::weather::types::{
        self, AirComponents, Bounded, CITY_NAME_LEN, COUNTRY_LEN, DT_TXT_LEN, MAX_FORECAST_ITEMS,
        MainData, WeatherCondition, Wind,
    };
    use heapless::String;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Coord {
        pub lat: f32,
        pub lon: f32,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Clouds {
        pub all: i32,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Volume {
        #[serde(rename = "1h")]
        pub one_hour: f32,
        #[serde(rename = "3h")]
        pub three_hours: f32,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Sys {
        #[serde(deserialize_with = "text")]
        pub country: String<COUNTRY_LEN>,
        pub sunrise: u64,
        pub sunset: u64,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct CurrentWeather {
        pub coord: Coord,
        #[serde(deserialize_with = "first_or_default")]
        pub weather: WeatherCondition,
        pub main: MainData,
        pub visibility: i32,
        pub wind: Wind,
        pub clouds: Clouds,
        pub rain: Volume,
        pub snow: Volume,
        pub dt: u64,
        pub sys: Sys,
        pub timezone: i32,
        #[serde(deserialize_with = "text")]
        pub name: String<CITY_NAME_LEN>,
    }

    impl From<CurrentWeather> for types::CurrentWeather {
        fn from(wire: CurrentWeather) -> Self {
            Self {
                lat: wire.coord.lat,
                lon: wire.coord.lon,
                weather: wire.weather,
                main: wire.main,
                visibility: wire.visibility,
                wind: wire.wind,
                clouds: wire.clouds.all,
                rain_1h: wire.rain.one_hour,
                snow_1h: wire.snow.one_hour,
                dt: wire.dt,
                country: wire.sys.country,
                sunrise: wire.sys.sunrise,
                sunset: wire.sys.sunset,
                timezone: wire.timezone,
                name: wire.name,
            }
        }
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct ForecastItem {
        pub dt: u64,
        pub main: MainData,
        #[serde(deserialize_with = "first_or_default")]
        pub weather: WeatherCondition,
        pub wind: Wind,
        pub clouds: Clouds,
        pub visibility: i32,
        pub pop: f32,
        pub rain: Volume,
        pub snow: Volume,
        #[serde(deserialize_with = "text")]
        pub dt_txt: String<DT_TXT_LEN>,
    }

    impl From<ForecastItem> for types::ForecastItem {
        fn from(wire: ForecastItem) -> Self {
            Self {
                dt: wire.dt,
                main: wire.main,
                weather: wire.weather,
                wind: wire.wind,
                clouds: wire.clouds.all,
                visibility: wire.visibility,
                pop: wire.pop,
                rain_3h: wire.rain.three_hours,
                snow_3h: wire.snow.three_hours,
                dt_txt: wire.dt_txt,
            }
        }
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct City {
        #[serde(deserialize_with = "text")]
        pub name: String<CITY_NAME_LEN>,
        #[serde(deserialize_with = "text")]
        pub country: String<COUNTRY_LEN>,
        pub coord: Coord,
        pub timezone: i32,
        pub sunrise: u64,
        pub sunset: u64,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Forecast {
        pub cnt: usize,
        pub list: Bounded<types::ForecastItem, MAX_FORECAST_ITEMS>,
        pub city: City,
    }

    impl From<Forecast> for types::Forecast {
        fn from(wire: Forecast) -> Self {
            let mut items = wire.list;
            // `cnt` is the number of steps the API meant to send.
            if wire.cnt > 0 {
                items.truncate(wire.cnt);
            }
            Self {
                items,
                city_name: wire.city.name,
                country: wire.city.country,
                lat: wire.city.coord.lat,
                lon: wire.city.coord.lon,
                timezone: wire.city.timezone,
                sunrise: wire.city.sunrise,
                sunset: wire.city.sunset,
            }
        }
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Aqi {
        pub aqi: u8,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct AirPollution {
        pub dt: u64,
        pub main: Aqi,
        pub components: AirComponents,
    }

    impl From<AirPollution> for types::AirPollution {
        fn from(wire: AirPollution) -> Self {
            Self {
                dt: wire.dt,
                aqi: wire.main.aqi,
                components: wire.components,
            }
        }
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct AirPollutionNow {
        #[serde(deserialize_with = "first_or_default")]
        pub list: types::AirPollution,
    }

    #[derive(Debug, Deserialize)]
    pub struct AirPollutionList<const M: usize> {
        #[serde(default)]
        pub list: Bounded<types::AirPollution, M>,
    }
}
