use std::io::{self, ErrorKind, Read, Write};
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::time::{Duration, Instant};
use log::debug;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use crate::Bind;
use super::error::Error;
use super::transport::{Conn, Dialer};

/// Dials raw ICMPv4 sockets through the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawDialer;

/// Connected raw ICMPv4 socket.
#[derive(Debug)]
pub struct RawConn {
    sock:     Socket,
    deadline: Option<Instant>,
}

impl Dialer for RawDialer {
    type Conn = RawConn;

    fn dial(&mut self, addr: &str, bind: &Bind, timeout: Duration) -> Result<RawConn, Error> {
        let dst = resolve(addr)?;

        let raw   = Type::RAW;
        let icmp4 = Protocol::ICMPV4;

        let sock = Socket::new(Domain::IPV4, raw, Some(icmp4)).map_err(Error::Dial)?;
        sock.bind(&bind.sa4().into()).map_err(Error::Dial)?;

        let sa = SockAddr::from(SocketAddr::new(dst.into(), 0));
        let connected = match timeout {
            t if t.is_zero() => sock.connect(&sa),
            t                => sock.connect_timeout(&sa, t),
        };
        connected.map_err(Error::Dial)?;

        debug!("connected to {} ({})", addr, dst);

        Ok(RawConn { sock, deadline: None })
    }
}

impl RawConn {
    fn remaining(&self) -> io::Result<Option<Duration>> {
        let deadline = match self.deadline {
            Some(deadline) => deadline,
            None           => return Ok(None),
        };

        match deadline.checked_duration_since(Instant::now()) {
            Some(left) if left >= MIN_TIMEOUT => Ok(Some(left)),
            _                                 => Err(ErrorKind::TimedOut.into()),
        }
    }
}

impl Conn for RawConn {
    fn set_deadline(&mut self, deadline: Instant) -> io::Result<()> {
        self.deadline = Some(deadline);
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sock.set_write_timeout(self.remaining()?)?;
        self.sock.write(buf).map_err(timeout)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.sock.set_read_timeout(self.remaining()?)?;
        self.sock.read(buf).map_err(timeout)
    }
}

fn resolve(addr: &str) -> Result<Ipv4Addr, Error> {
    if let Ok(ip) = addr.parse() {
        return Ok(ip);
    }

    (addr, 0).to_socket_addrs().map_err(Error::Dial)?.find_map(|sa| match sa {
        SocketAddr::V4(sa) => Some(*sa.ip()),
        SocketAddr::V6(_)  => None,
    }).ok_or_else(|| Error::Resolve(addr.to_owned()))
}

// expired socket timeouts surface as EAGAIN on unix
fn timeout(e: io::Error) -> io::Error {
    match e.kind() {
        ErrorKind::WouldBlock => ErrorKind::TimedOut.into(),
        _                     => e,
    }
}

// a zero timeval disables the socket timeout entirely
const MIN_TIMEOUT: Duration = Duration::from_micros(1);
