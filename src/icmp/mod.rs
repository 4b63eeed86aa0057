pub use echo::Echo;
pub use icmp4::IcmpV4Packet;

pub mod icmp4;

mod echo;
