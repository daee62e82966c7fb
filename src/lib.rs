//! # libowm - OpenWeatherMap client for embedded devices
//!
//! A small, blocking client for the OpenWeatherMap REST API that runs on
//! microcontrollers. It needs no allocator and no particular network stack:
//! the platform supplies a [`Connect`](network::Connect) implementation
//! (WiFi module, TLS session, host socket) and a [`Clock`](time::Clock).
//!
//! ## Features
//!
//! ### Weather API
//! - **Geocoding**: city name, zip code and reverse lookups
//! - **Current weather** with a single-slot, time-boxed cache
//! - **5-day forecast** in 3-hour steps
//! - **Air pollution**: current, hourly forecast and history
//!
//! ### Network
//! - Blocking HTTP/1.1 GET reader with idle timeouts, usable on its own
//! - Transport-agnostic `Read`/`Write`/`Close` traits
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libowm = "0.1.0"
//! ```
//!
//! See [`weather`] for a complete example.
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ESP32, ARM Cortex-M, RISC-V, etc.)
//! - Linux-based IoT devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support, including [`time::StdClock`]
//! - `defmt`: Emit diagnostics through `defmt` for embedded debugging
//! - `log`: Emit diagnostics through the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]
#![doc(html_root_url = "https://shishir-dey.github.io/libowm/")]

// This mod MUST go first, so that the others see its macros.
mod fmt;

/// Network abstraction layer: transport traits and the HTTP reader.
///
/// The weather client only needs a byte stream per request; this module
/// defines that contract and the HTTP/1.1 GET exchange on top of it.
pub mod network;

/// Millisecond clock used for timeouts and cache expiry.
pub mod time;

/// OpenWeatherMap endpoints, result types and the caching client.
pub mod weather;

pub use weather::{Config, Error, OpenWeatherMap, Units};
