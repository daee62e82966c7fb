use criterion::{Criterion, Throughput};
use libowm::weather::decode;

const WEATHER: &str = include_str!("../../tests/fixtures/weather_london.json");

const ITEM: &str = r#"{"dt":1736348400,"main":{"temp":8.9,"feels_like":6.1,"temp_min":8.9,"temp_max":9.3,"pressure":1003,"sea_level":1003,"grnd_level":998,"humidity":84,"temp_kf":-0.4},"weather":[{"id":500,"main":"Rain","description":"light rain","icon":"10d"}],"clouds":{"all":100},"wind":{"speed":5.1,"deg":225,"gust":11.2},"visibility":10000,"pop":0.62,"rain":{"3h":0.83},"sys":{"pod":"d"},"dt_txt":"2025-01-08 15:00:00"}"#;

/// A full 5-day forecast: 40 steps.
fn forecast_body() -> String {
    let items = vec![ITEM; 40].join(",");
    format!(
        r#"{{"cod":"200","message":0,"cnt":40,"list":[{items}],"city":{{"id":2643743,"name":"London","coord":{{"lat":51.5085,"lon":-0.1257}},"country":"GB","population":1000000,"timezone":0,"sunrise":1736323445,"sunset":1736352380}}}}"#
    )
}

pub fn bench_decode_current_weather(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_current_weather");
    group.throughput(Throughput::Bytes(WEATHER.len() as u64));
    group.bench_function("london", |b| {
        b.iter(|| decode::current_weather(WEATHER.as_bytes()).expect("Decode failed"))
    });
    group.finish();
}

pub fn bench_decode_forecast(c: &mut Criterion) {
    let body = forecast_body();
    let mut group = c.benchmark_group("decode_forecast");
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("forty_steps", |b| {
        b.iter(|| {
            let forecast = decode::forecast(body.as_bytes()).expect("Decode failed");
            assert_eq!(forecast.items.len(), 40);
            forecast
        })
    });
    group.finish();
}
