pub use error::{Error, Op};
pub use packet::Packet;
pub use ping::Ping;
pub use ping::Prober;
pub use shared::SharedProber;
pub use sock::{RawConn, RawDialer};
pub use transport::{Conn, Dialer};

mod error;
mod packet;
mod ping;
mod reply;
mod shared;
mod sock;
mod transport;
