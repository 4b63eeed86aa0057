use std::convert::TryFrom;
use std::io::{self, ErrorKind};
use std::time::{Duration, Instant};
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use crate::Bind;
use super::error::{Error, Op};
use super::packet::Packet;
use super::reply::is_reply;
use super::sock::RawDialer;
use super::transport::{Conn, Dialer};

#[derive(Clone, Debug)]
pub struct Ping {
    pub addr:   String,
    pub size:   usize,
    pub expiry: Duration,
    pub bind:   Bind,
    pub strict: bool,
}

/// Measures round-trip time to a single target, one echo at a time.
///
/// The connection is opened on the first probe and kept for the
/// following ones. A connection the OS closed underneath us is
/// re-established once per probe.
pub struct Prober<D: Dialer = RawDialer, R: Rng = StdRng> {
    addr:   String,
    bind:   Bind,
    expiry: Duration,
    strict: bool,
    packet: Packet,
    dialer: D,
    rng:    R,
    conn:   Option<D::Conn>,
}

const ATTEMPTS: usize = 2;

const MAX_REPLY: usize = 65535;

impl Ping {
    pub fn new(addr: &str, size: usize, timeout: u64) -> Self {
        Self {
            addr:   addr.to_owned(),
            size:   size,
            expiry: Duration::from_millis(timeout),
            bind:   Bind::default(),
            strict: false,
        }
    }
}

impl Prober {
    pub fn new(addr: &str, size: usize, timeout: u64) -> Self {
        Self::from(Ping::new(addr, size, timeout))
    }
}

impl From<Ping> for Prober {
    fn from(ping: Ping) -> Self {
        Self::with(ping, RawDialer, StdRng::from_entropy())
    }
}

impl<D: Dialer, R: Rng> Prober<D, R> {
    pub fn with(ping: Ping, dialer: D, mut rng: R) -> Self {
        let Ping { addr, size, expiry, bind, strict } = ping;
        let packet = Packet::build(size, &mut rng);
        Self { addr, bind, expiry, strict, packet, dialer, rng, conn: None }
    }

    /// Rebuild the echo request with a `size` byte payload and a fresh
    /// sequence number. An open connection is kept.
    pub fn set_payload_size(&mut self, size: usize) {
        self.packet = Packet::build(size, &mut self.rng);
    }

    /// Point the prober at `addr`. Any open connection belongs to the
    /// previous address and is closed.
    pub fn set_address(&mut self, addr: &str) {
        self.close();
        self.addr = addr.to_owned();
    }

    pub fn set_timeout(&mut self, timeout: u64) {
        self.expiry = Duration::from_millis(timeout);
    }

    /// Round-trip time in whole milliseconds, or -1 on failure.
    pub fn probe(&mut self) -> i64 {
        match self.send() {
            Ok(rtt) => i64::try_from(rtt.as_millis()).unwrap_or(i64::MAX),
            Err(e)  => {
                debug!("probe {} failed: {}", self.addr, e);
                -1
            }
        }
    }

    /// Send one echo request and wait for the reply.
    pub fn send(&mut self) -> Result<Duration, Error> {
        let mut attempt = 1;
        loop {
            match self.exchange() {
                Ok(rtt)                 => return Ok(rtt),
                Err(e) if e.is_closed() => {
                    self.close();
                    if attempt == ATTEMPTS {
                        return Err(e);
                    }
                    debug!("{}: {}, reconnecting", self.addr, e);
                    attempt += 1;
                }
                Err(e)                  => return Err(e),
            }
        }
    }

    /// Open the connection unless it is already open.
    pub fn connect(&mut self) -> Result<(), Error> {
        let conn = self.take_or_dial()?;
        self.conn = Some(conn);
        Ok(())
    }

    pub fn close(&mut self) {
        if self.conn.take().is_some() {
            debug!("closed connection to {}", self.addr);
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn packet(&self) -> &Packet {
        &self.packet
    }

    pub fn timeout(&self) -> Duration {
        self.expiry
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn exchange(&mut self) -> Result<Duration, Error> {
        let mut conn = self.take_or_dial()?;
        let result = roundtrip(&mut conn, &self.packet, self.expiry, self.strict);
        self.conn = Some(conn);
        result
    }

    fn take_or_dial(&mut self) -> Result<D::Conn, Error> {
        if let Some(conn) = self.conn.take() {
            return Ok(conn);
        }
        debug!("dialing {}", self.addr);
        self.dialer.dial(&self.addr, &self.bind, self.expiry)
    }
}

fn roundtrip<C: Conn>(conn: &mut C, packet: &Packet, expiry: Duration, strict: bool) -> Result<Duration, Error> {
    let sent = Instant::now();
    conn.set_deadline(sent + expiry).map_err(Error::io(Op::Deadline))?;

    let pkt = packet.bytes();
    let n = conn.write(pkt).map_err(Error::io(Op::Write))?;
    if n < pkt.len() {
        let short = io::Error::new(ErrorKind::WriteZero, "short write");
        return Err(Error::io(Op::Write)(short));
    }

    let mut buf = vec![0u8; MAX_REPLY];
    loop {
        let n = conn.read(&mut buf).map_err(Error::io(Op::Read))?;
        if !strict || is_reply(&buf[..n], packet) {
            return Ok(sent.elapsed());
        }
    }
}
