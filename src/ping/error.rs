use std::fmt;
use std::io::{self, ErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no IPv4 address for {0}")]
    Resolve(String),
    #[error("dial failed: {0}")]
    Dial(#[source] io::Error),
    #[error("{op} failed: {source}")]
    Io {
        op:     Op,
        #[source]
        source: io::Error,
    },
}

/// Transport operation that produced an I/O error.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Op {
    Deadline,
    Write,
    Read,
}

impl Error {
    pub(crate) fn io(op: Op) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io { op, source }
    }

    /// The socket was invalidated by the peer or the OS and a fresh
    /// connection may succeed.
    pub fn is_closed(&self) -> bool {
        match self {
            Self::Io { source, .. } => closed(source),
            _                       => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Io { source, .. } => matches!(source.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock),
            _                       => false,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deadline => write!(f, "deadline"),
            Self::Write    => write!(f, "write"),
            Self::Read     => write!(f, "read"),
        }
    }
}

fn closed(e: &io::Error) -> bool {
    match e.kind() {
        ErrorKind::BrokenPipe        => true,
        ErrorKind::ConnectionReset   => true,
        ErrorKind::ConnectionAborted => true,
        ErrorKind::NotConnected      => true,
        _                            => matches!(e.raw_os_error(), Some(libc::EBADF) | Some(libc::ESHUTDOWN)),
    }
}
