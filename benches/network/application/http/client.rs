use criterion::{BatchSize, Criterion, Throughput};
use heapless::Vec;
use libowm::network::application::http::{Client, ResponseScanner};
use libowm::network::error::Error;
use libowm::network::{Close, Connection, Read, Write};
use libowm::time::Clock;

const BODY: &str = include_str!("../../../../tests/fixtures/forecast_london.json");

fn response() -> std::vec::Vec<u8> {
    format!(
        "HTTP/1.1 200 OK\r\nServer: openresty\r\nContent-Type: application/json; charset=utf-8\r\n\
         Content-Length: {}\r\nConnection: close\r\nAccess-Control-Allow-Origin: *\r\n\r\n{BODY}",
        BODY.len()
    )
    .into_bytes()
}

/// Replays a canned response, then reports the peer as gone.
struct MemConnection {
    data: std::vec::Vec<u8>,
    pos: usize,
}

impl Read for MemConnection {
    type Error = Error;
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl Write for MemConnection {
    type Error = Error;
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for MemConnection {
    type Error = Error;
    fn close(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Connection for MemConnection {
    fn is_connected(&self) -> bool {
        self.pos < self.data.len()
    }
}

struct NoClock;

impl Clock for NoClock {
    fn now_ms(&self) -> u64 {
        0
    }

    fn delay_ms(&mut self, _ms: u32) {}
}

pub fn bench_scan_response(c: &mut Criterion) {
    let data = response();
    let mut group = c.benchmark_group("scan_response");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for chunk_size in [1usize, 64, 256] {
        group.bench_function(format!("chunks_of_{chunk_size}"), |b| {
            b.iter(|| {
                let mut scanner = ResponseScanner::new();
                let mut body: Vec<u8, 8192> = Vec::new();
                for chunk in data.chunks(chunk_size) {
                    scanner.feed(chunk, &mut body).expect("Body overflow");
                }
                body.len()
            })
        });
    }
    group.finish();
}

pub fn bench_get(c: &mut Criterion) {
    let data = response();
    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("get_forecast", |b| {
        b.iter_batched(
            || MemConnection {
                data: data.clone(),
                pos: 0,
            },
            |conn| {
                let mut body: Vec<u8, 8192> = Vec::new();
                let response = Client::new(conn, 1_000)
                    .get("api.openweathermap.org", "/data/2.5/forecast", &mut NoClock, &mut body)
                    .expect("Request failed");
                response.body.len()
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}
