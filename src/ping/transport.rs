use std::io;
use std::time::{Duration, Instant};
use crate::Bind;
use super::error::Error;

/// Opens connections to a probe target.
pub trait Dialer {
    type Conn: Conn;

    /// Connect to `addr`, giving up after `timeout`.
    fn dial(&mut self, addr: &str, bind: &Bind, timeout: Duration) -> Result<Self::Conn, Error>;
}

/// An open transport. Dropping it closes the underlying socket.
pub trait Conn {
    /// Arm an absolute deadline covering every following write and read.
    fn set_deadline(&mut self, deadline: Instant) -> io::Result<()>;

    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}
