//! Request path construction.
//!
//! Coordinates are written with four decimals, optional parameters only when
//! they differ from the API defaults, and the API key always last.

use crate::weather::config::Config;
use crate::weather::error::Error;
use crate::weather::types::{MAX_FORECAST_ITEMS, MAX_GEO_RESULTS};
use core::fmt::Write as _;
use heapless::String;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Capacity of a request path including its query string.
pub const PATH_CAPACITY: usize = 320;

/// A request path with query string.
pub type Path = String<PATH_CAPACITY>;

/// Bytes escaped inside a query value. `,` stays literal: the API uses it to
/// separate city, state and country.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Clamps a geocoding result count to `1..=MAX_GEO_RESULTS`.
pub fn clamp_geo_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_GEO_RESULTS)
}

/// Clamps a forecast step count to `MAX_FORECAST_ITEMS`; `0` means "all".
pub fn clamp_forecast_count(cnt: usize) -> usize {
    cnt.min(MAX_FORECAST_ITEMS)
}

/// `/geo/1.0/direct?q=<city[,state][,country]>&limit=<n>&appid=<key>`
pub fn direct_geocoding(
    config: &Config,
    city: &str,
    country: Option<&str>,
    state: Option<&str>,
    limit: usize,
) -> Result<Path, Error> {
    let mut path = Path::new();
    push(&mut path, format_args!("/geo/1.0/direct?q={}", encode(city)))?;
    for part in [state, country].into_iter().flatten() {
        if !part.is_empty() {
            push(&mut path, format_args!(",{}", encode(part)))?;
        }
    }
    push(&mut path, format_args!("&limit={}", clamp_geo_limit(limit)))?;
    finish(path, config)
}

/// `/geo/1.0/zip?zip=<zip>,<country>&appid=<key>`
pub fn zip_geocoding(config: &Config, zip: &str, country: &str) -> Result<Path, Error> {
    let mut path = Path::new();
    push(
        &mut path,
        format_args!("/geo/1.0/zip?zip={},{}", encode(zip), encode(country)),
    )?;
    finish(path, config)
}

/// `/geo/1.0/reverse?lat=<lat>&lon=<lon>&limit=<n>&appid=<key>`
pub fn reverse_geocoding(config: &Config, lat: f32, lon: f32, limit: usize) -> Result<Path, Error> {
    let mut path = Path::new();
    push(
        &mut path,
        format_args!(
            "/geo/1.0/reverse?lat={:.4}&lon={:.4}&limit={}",
            lat,
            lon,
            clamp_geo_limit(limit)
        ),
    )?;
    finish(path, config)
}

/// `/data/2.5/weather?lat=<lat>&lon=<lon>[&units=..][&lang=..]&appid=<key>`
pub fn current_weather(config: &Config, lat: f32, lon: f32) -> Result<Path, Error> {
    let mut path = Path::new();
    push(
        &mut path,
        format_args!("/data/2.5/weather?lat={:.4}&lon={:.4}", lat, lon),
    )?;
    push_locale(&mut path, config)?;
    finish(path, config)
}

/// `/data/2.5/forecast?lat=..&lon=..[&units=..][&lang=..][&cnt=<n>]&appid=<key>`
pub fn forecast(config: &Config, lat: f32, lon: f32, cnt: usize) -> Result<Path, Error> {
    let mut path = Path::new();
    push(
        &mut path,
        format_args!("/data/2.5/forecast?lat={:.4}&lon={:.4}", lat, lon),
    )?;
    push_locale(&mut path, config)?;
    let cnt = clamp_forecast_count(cnt);
    if cnt > 0 {
        push(&mut path, format_args!("&cnt={}", cnt))?;
    }
    finish(path, config)
}

/// `/data/2.5/air_pollution?lat=<lat>&lon=<lon>&appid=<key>`
pub fn air_pollution(config: &Config, lat: f32, lon: f32) -> Result<Path, Error> {
    air_pollution_path(config, "", lat, lon)
}

/// `/data/2.5/air_pollution/forecast?lat=<lat>&lon=<lon>&appid=<key>`
pub fn air_pollution_forecast(config: &Config, lat: f32, lon: f32) -> Result<Path, Error> {
    air_pollution_path(config, "/forecast", lat, lon)
}

/// `/data/2.5/air_pollution/history?lat=..&lon=..&start=<unix>&end=<unix>&appid=<key>`
pub fn air_pollution_history(
    config: &Config,
    lat: f32,
    lon: f32,
    start: u64,
    end: u64,
) -> Result<Path, Error> {
    let mut path = Path::new();
    push(
        &mut path,
        format_args!(
            "/data/2.5/air_pollution/history?lat={:.4}&lon={:.4}&start={}&end={}",
            lat, lon, start, end
        ),
    )?;
    finish(path, config)
}

fn air_pollution_path(config: &Config, suffix: &str, lat: f32, lon: f32) -> Result<Path, Error> {
    let mut path = Path::new();
    push(
        &mut path,
        format_args!("/data/2.5/air_pollution{}?lat={:.4}&lon={:.4}", suffix, lat, lon),
    )?;
    finish(path, config)
}

fn push_locale(path: &mut Path, config: &Config) -> Result<(), Error> {
    if let Some(units) = config.units.as_param() {
        push(path, format_args!("&units={}", units))?;
    }
    if let Some(lang) = config.language_param() {
        push(path, format_args!("&lang={}", encode(lang)))?;
    }
    Ok(())
}

fn finish(mut path: Path, config: &Config) -> Result<Path, Error> {
    push(&mut path, format_args!("&appid={}", encode(&config.api_key)))?;
    Ok(path)
}

fn push(path: &mut Path, args: core::fmt::Arguments<'_>) -> Result<(), Error> {
    path.write_fmt(args).map_err(|_| Error::RequestTooLarge)
}

fn encode(value: &str) -> percent_encoding::PercentEncode<'_> {
    utf8_percent_encode(value, QUERY_VALUE)
}
