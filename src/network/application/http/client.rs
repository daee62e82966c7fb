use crate::network::Connection;
use crate::network::error::Error;
use crate::time::Clock;
use core::fmt::Write as _;
use heapless::{String, Vec};

/// Sleep between two polls of an idle connection.
pub const POLL_INTERVAL_MS: u32 = 10;

const REQUEST_CAPACITY: usize = 512;
const MAX_LINE_LEN: usize = 128;
const CHUNK_SIZE: usize = 256;

/// Where the [`ResponseScanner`] is within a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Reading the status line and headers, one line at a time.
    HeaderScan,
    /// Past the blank line; everything is body.
    Body,
}

/// Incremental splitter of an HTTP/1.1 response into status code and body.
///
/// Bytes may be fed in chunks of any size; the result does not depend on
/// where the chunk boundaries fall.
#[derive(Debug)]
pub struct ResponseScanner {
    state: State,
    line: Vec<u8, MAX_LINE_LEN>,
    lines_seen: usize,
    status_code: u16,
}

impl ResponseScanner {
    pub fn new() -> Self {
        Self {
            state: State::HeaderScan,
            line: Vec::new(),
            lines_seen: 0,
            status_code: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Status code from the status line, `0` until one has been seen.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Consumes `data`, appending any body bytes to `body`.
    ///
    /// Only a `200` body has to fit: the body of any other status is kept as
    /// far as there is room and the rest is dropped, so the status survives.
    pub fn feed<const N: usize>(&mut self, data: &[u8], body: &mut Vec<u8, N>) -> Result<(), Error> {
        let mut rest = data;
        while self.state == State::HeaderScan {
            let Some((&byte, tail)) = rest.split_first() else {
                return Ok(());
            };
            rest = tail;
            self.scan_byte(byte);
        }
        if self.status_code != 200 {
            let room = body.capacity() - body.len();
            rest = &rest[..rest.len().min(room)];
        }
        body.extend_from_slice(rest)
            .map_err(|_| Error::BufferOverflow)
    }

    fn scan_byte(&mut self, byte: u8) {
        if byte != b'\n' {
            // Long header lines are cut short; only the status line and the
            // blank separator carry meaning here.
            let _ = self.line.push(byte);
            return;
        }

        if self.line.last() == Some(&b'\r') {
            self.line.pop();
        }
        if self.lines_seen == 0 {
            self.status_code = parse_status_line(&self.line);
        }
        if self.line.is_empty() {
            self.state = State::Body;
        }
        self.lines_seen += 1;
        self.line.clear();
    }
}

impl Default for ResponseScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// A successful (`200`) response whose body lives in the caller's buffer.
#[derive(Debug)]
pub struct Response<'b> {
    pub status_code: u16,
    pub body: &'b [u8],
}

/// Blocking HTTP/1.1 GET client for a single exchange.
///
/// The client owns the connection and closes it when [`Client::get`] returns,
/// on success and on every error path.
#[derive(Debug)]
pub struct Client<C: Connection> {
    connection: C,
    timeout_ms: u32,
}

impl<C: Connection> Client<C> {
    pub fn new(connection: C, timeout_ms: u32) -> Self {
        Self {
            connection,
            timeout_ms,
        }
    }

    /// Sends `GET path` to `host` and reads the response into `body`.
    ///
    /// `body` is cleared first. Any status other than `200` is reported as
    /// [`Error::UnexpectedStatus`] once the response has been drained.
    pub fn get<'b, K: Clock, const N: usize>(
        self,
        host: &str,
        path: &str,
        clock: &mut K,
        body: &'b mut Vec<u8, N>,
    ) -> Result<Response<'b>, Error> {
        let Self {
            mut connection,
            timeout_ms,
        } = self;

        body.clear();
        let outcome = exchange(&mut connection, host, path, timeout_ms, clock, body);
        // The peer has usually hung up already; a failing close changes
        // nothing for the caller.
        let _ = connection.close();

        let status_code = outcome?;
        if status_code != 200 {
            return Err(Error::UnexpectedStatus(status_code));
        }
        Ok(Response {
            status_code,
            body: body.as_slice(),
        })
    }
}

fn exchange<C: Connection, K: Clock, const N: usize>(
    connection: &mut C,
    host: &str,
    path: &str,
    timeout_ms: u32,
    clock: &mut K,
    body: &mut Vec<u8, N>,
) -> Result<u16, Error> {
    send_request(connection, host, path)?;

    let mut scanner = ResponseScanner::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    // --- Wait for the first byte ---
    let n = poll_read(connection, clock, timeout_ms, &mut chunk)?;
    if n == 0 {
        return Err(Error::ConnectionClosed);
    }
    scanner.feed(&chunk[..n], body)?;

    // --- Drain until the peer closes ---
    loop {
        let n = poll_read(connection, clock, timeout_ms, &mut chunk)?;
        if n == 0 {
            break;
        }
        scanner.feed(&chunk[..n], body)?;
    }

    if scanner.state() != State::Body {
        return Err(Error::ProtocolError);
    }
    Ok(scanner.status_code())
}

fn send_request<C: Connection>(connection: &mut C, host: &str, path: &str) -> Result<(), Error> {
    let mut request: String<REQUEST_CAPACITY> = String::new();
    write!(
        request,
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, host
    )
    .map_err(|_| Error::BufferOverflow)?;

    let mut pending = request.as_bytes();
    while !pending.is_empty() {
        match connection.write(pending) {
            Ok(0) => return Err(Error::WriteError),
            Ok(n) => pending = &pending[n..],
            Err(_) => return Err(Error::WriteError),
        }
    }
    connection.flush().map_err(|_| Error::WriteError)
}

/// Reads the next chunk, polling while the connection is idle.
///
/// Returns `Ok(0)` once the peer has closed and nothing is left to read. The
/// idle timer starts fresh on every call.
fn poll_read<C: Connection, K: Clock>(
    connection: &mut C,
    clock: &mut K,
    timeout_ms: u32,
    buf: &mut [u8],
) -> Result<usize, Error> {
    let started = clock.now_ms();
    loop {
        let n = connection.read(buf).map_err(|_| Error::ReadError)?;
        if n > 0 {
            return Ok(n);
        }
        if !connection.is_connected() {
            return Ok(0);
        }
        if clock.now_ms().saturating_sub(started) > u64::from(timeout_ms) {
            return Err(Error::Timeout);
        }
        clock.delay_ms(POLL_INTERVAL_MS);
    }
}

/// Extracts the three-digit code from `HTTP/1.1 200 OK`, or `0`.
fn parse_status_line(line: &[u8]) -> u16 {
    if !line.starts_with(b"HTTP/") {
        return 0;
    }
    let Some(space) = line.iter().position(|&b| b == b' ') else {
        return 0;
    };
    match line.get(space + 1..space + 4) {
        Some(digits) if digits.iter().all(u8::is_ascii_digit) => digits
            .iter()
            .fold(0u16, |code, &d| code * 10 + u16::from(d - b'0')),
        _ => 0,
    }
}
