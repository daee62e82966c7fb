use criterion::{criterion_group, criterion_main};

mod network;
mod weather;

criterion_group!(
    benches,
    network::application::http::client::bench_scan_response,
    network::application::http::client::bench_get,
    weather::decode::bench_decode_current_weather,
    weather::decode::bench_decode_forecast
);
criterion_main!(benches);
