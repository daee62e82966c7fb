#![allow(dead_code)]

use libowm::network::error::Error;
use libowm::network::{Close, Connect, Connection, Read, Scheme, Write};
use libowm::time::Clock;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// One step of a scripted peer.
#[derive(Debug, Clone)]
pub enum Step {
    /// Bytes handed out by the next reads, possibly across several calls.
    Data(Vec<u8>),
    /// This many empty reads while the peer stays connected.
    Idle(u32),
    /// Empty reads forever; the peer never closes.
    Hang,
}

/// What the test can observe about every connection a connector made.
#[derive(Debug, Default)]
pub struct Tally {
    pub connects: Cell<u32>,
    pub closes: Cell<u32>,
    pub hosts: RefCell<Vec<String>>,
    pub schemes: RefCell<Vec<Scheme>>,
    pub requests: RefCell<Vec<String>>,
}

impl Tally {
    /// Request targets (`/path?query`) in the order they were sent.
    pub fn paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|request| {
                let line = request.lines().next().unwrap_or_default();
                line.trim_start_matches("GET ")
                    .trim_end_matches(" HTTP/1.1")
                    .to_string()
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct ScriptedConnection {
    script: VecDeque<Step>,
    written: Vec<u8>,
    max_write: usize,
    tally: Rc<Tally>,
}

impl ScriptedConnection {
    pub fn new(script: Vec<Step>, tally: Rc<Tally>) -> Self {
        Self {
            script: script.into(),
            written: Vec::new(),
            max_write: usize::MAX,
            tally,
        }
    }

    /// Accepts at most `n` bytes per `write` call; `0` refuses every write.
    pub fn with_max_write(mut self, n: usize) -> Self {
        self.max_write = n;
        self
    }
}

impl Read for ScriptedConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.script.pop_front() {
                None => return Ok(0),
                Some(Step::Hang) => {
                    self.script.push_front(Step::Hang);
                    return Ok(0);
                }
                Some(Step::Idle(0)) => continue,
                Some(Step::Idle(n)) => {
                    self.script.push_front(Step::Idle(n - 1));
                    return Ok(0);
                }
                Some(Step::Data(mut data)) => {
                    if data.is_empty() {
                        continue;
                    }
                    let n = data.len().min(buf.len());
                    buf[..n].copy_from_slice(&data[..n]);
                    if n < data.len() {
                        self.script.push_front(Step::Data(data.split_off(n)));
                    }
                    return Ok(n);
                }
            }
        }
    }
}

impl Write for ScriptedConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.max_write);
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        let request = String::from_utf8_lossy(&self.written).into_owned();
        self.tally.requests.borrow_mut().push(request);
        self.written.clear();
        Ok(())
    }
}

impl Close for ScriptedConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        self.tally.closes.set(self.tally.closes.get() + 1);
        Ok(())
    }
}

impl Connection for ScriptedConnection {
    fn is_connected(&self) -> bool {
        !self.script.is_empty()
    }
}

/// Hands out one scripted connection per `connect`, failing once the
/// scripts run out.
#[derive(Debug)]
pub struct MockConnector {
    scripts: VecDeque<Vec<Step>>,
    pub tally: Rc<Tally>,
}

impl MockConnector {
    pub fn new(scripts: Vec<Vec<Step>>) -> Self {
        Self {
            scripts: scripts.into(),
            tally: Rc::new(Tally::default()),
        }
    }

    pub fn push(&mut self, script: Vec<Step>) {
        self.scripts.push_back(script);
    }
}

impl Connect for MockConnector {
    type Connection = ScriptedConnection;
    type Error = Error;

    fn connect(&mut self, host: &str, scheme: Scheme) -> Result<Self::Connection, Self::Error> {
        self.tally.connects.set(self.tally.connects.get() + 1);
        self.tally.hosts.borrow_mut().push(host.to_string());
        self.tally.schemes.borrow_mut().push(scheme);
        let script = self.scripts.pop_front().ok_or(Error::ConnectionRefused)?;
        Ok(ScriptedConnection::new(script, Rc::clone(&self.tally)))
    }
}

/// A clock that only moves when told to or when the code under test sleeps.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms));
    }
}

/// A complete response as a server would send it.
pub fn http_response(status: &str, body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 {status}\r\nServer: openresty\r\nContent-Type: application/json; charset=utf-8\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
    .into_bytes()
}

/// A script that delivers `status` and `body` in one piece and hangs up.
pub fn respond(status: &str, body: &str) -> Vec<Step> {
    vec![Step::Data(http_response(status, body))]
}

pub fn ok(body: &str) -> Vec<Step> {
    respond("200 OK", body)
}
