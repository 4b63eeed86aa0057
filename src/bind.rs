use std::net::*;

/// Local source address for the raw socket.
#[derive(Clone, Debug, Default)]
pub struct Bind {
    sa4: Option<SocketAddrV4>,
}

impl Bind {
    pub fn sa4(&self) -> SocketAddr {
        SocketAddr::V4(self.sa4.unwrap_or_else(|| {
            let addr = Ipv4Addr::new(0, 0, 0, 0);
            let port = 0;
            SocketAddrV4::new(addr, port)
        }))
    }

    pub fn set(&mut self, addr: Ipv4Addr) {
        self.sa4 = Some(SocketAddrV4::new(addr, 0));
    }
}

impl From<Ipv4Addr> for Bind {
    fn from(addr: Ipv4Addr) -> Self {
        let mut bind = Self::default();
        bind.set(addr);
        bind
    }
}
