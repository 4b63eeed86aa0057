#![allow(dead_code)]

use std::io::{self, ErrorKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering::SeqCst};
use std::time::{Duration, Instant};
use parking_lot::Mutex;
use rand::{rngs::StdRng, SeedableRng};
use icmprobe::icmp::icmp4::{checksum, ECHO_REPLY};
use icmprobe::{Bind, Conn, Dialer, Error, Ping, Prober};

pub type OnWrite = Arc<dyn Fn(usize) -> io::Result<()> + Send + Sync>;
pub type OnRead  = Arc<dyn Fn(usize, &[u8]) -> io::Result<Vec<u8>> + Send + Sync>;

pub const TARGET: &str = "192.0.2.1";

#[derive(Clone, Default)]
pub struct Stats {
    pub dials:     Arc<AtomicUsize>,
    pub closes:    Arc<AtomicUsize>,
    pub addrs:     Arc<Mutex<Vec<String>>>,
    pub written:   Arc<Mutex<Vec<Vec<u8>>>>,
    pub deadlines: Arc<Mutex<Vec<Instant>>>,
}

/// In-memory transport. Write and read behaviour is scripted per
/// connection by operation index.
#[derive(Clone)]
pub struct MockDialer {
    pub stats: Stats,
    fail:      Option<ErrorKind>,
    write:     OnWrite,
    read:      OnRead,
}

pub struct MockConn {
    stats:  Stats,
    write:  OnWrite,
    read:   OnRead,
    writes: usize,
    reads:  usize,
    last:   Vec<u8>,
}

impl MockDialer {
    pub fn new() -> Self {
        Self {
            stats: Stats::default(),
            fail:  None,
            write: Arc::new(|_: usize| -> io::Result<()> { Ok(()) }),
            read:  Arc::new(|_: usize, req: &[u8]| -> io::Result<Vec<u8>> { Ok(reply(req)) }),
        }
    }

    pub fn fail(mut self, kind: ErrorKind) -> Self {
        self.fail = Some(kind);
        self
    }

    pub fn write(mut self, f: impl Fn(usize) -> io::Result<()> + Send + Sync + 'static) -> Self {
        self.write = Arc::new(f);
        self
    }

    pub fn read(mut self, f: impl Fn(usize, &[u8]) -> io::Result<Vec<u8>> + Send + Sync + 'static) -> Self {
        self.read = Arc::new(f);
        self
    }

    pub fn dials(&self) -> usize {
        self.stats.dials.load(SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.stats.closes.load(SeqCst)
    }

    pub fn written(&self) -> Vec<Vec<u8>> {
        self.stats.written.lock().clone()
    }
}

impl Dialer for MockDialer {
    type Conn = MockConn;

    fn dial(&mut self, addr: &str, _bind: &Bind, _timeout: Duration) -> Result<MockConn, Error> {
        self.stats.dials.fetch_add(1, SeqCst);
        self.stats.addrs.lock().push(addr.to_owned());

        if let Some(kind) = self.fail {
            return Err(Error::Dial(kind.into()));
        }

        Ok(MockConn {
            stats:  self.stats.clone(),
            write:  self.write.clone(),
            read:   self.read.clone(),
            writes: 0,
            reads:  0,
            last:   Vec::new(),
        })
    }
}

impl Conn for MockConn {
    fn set_deadline(&mut self, deadline: Instant) -> io::Result<()> {
        self.stats.deadlines.lock().push(deadline);
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.writes;
        self.writes += 1;
        (self.write)(n)?;
        self.last = buf.to_vec();
        self.stats.written.lock().push(buf.to_vec());
        Ok(buf.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reads;
        self.reads += 1;
        let data = (self.read)(n, &self.last)?;
        let len = data.len().min(buf.len());
        buf[..len].copy_from_slice(&data[..len]);
        Ok(len)
    }
}

impl Drop for MockConn {
    fn drop(&mut self) {
        self.stats.closes.fetch_add(1, SeqCst);
    }
}

pub fn prober(dialer: MockDialer) -> Prober<MockDialer, StdRng> {
    with(Ping::new(TARGET, 32, 1000), dialer)
}

pub fn with(ping: Ping, dialer: MockDialer) -> Prober<MockDialer, StdRng> {
    Prober::with(ping, dialer, StdRng::seed_from_u64(1))
}

pub fn closed() -> io::Error {
    ErrorKind::BrokenPipe.into()
}

/// Fails the first `n` calls across all connections.
pub fn first(n: usize, kind: ErrorKind) -> impl Fn(usize) -> io::Result<()> + Send + Sync {
    let calls = AtomicUsize::new(0);
    move |_| {
        if calls.fetch_add(1, SeqCst) < n {
            return Err(kind.into());
        }
        Ok(())
    }
}

/// Echo reply answering `request`.
pub fn reply(request: &[u8]) -> Vec<u8> {
    let mut pkt = request.to_vec();
    if pkt.len() >= 4 {
        pkt[0] = ECHO_REPLY;
        pkt[2..4].copy_from_slice(&[0, 0]);
        let cksum = checksum(&pkt).to_be_bytes();
        pkt[2..4].copy_from_slice(&cksum);
    }
    pkt
}
