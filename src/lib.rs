#![allow(clippy::module_inception, clippy::redundant_field_names)]

pub use bind::Bind;

pub use ping::Error;
pub use ping::Packet;
pub use ping::Ping;
pub use ping::Prober;
pub use ping::SharedProber;

pub use ping::{Conn, Dialer};
pub use ping::{RawConn, RawDialer};

pub mod icmp;
pub mod ping;

mod bind;
