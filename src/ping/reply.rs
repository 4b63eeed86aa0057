use std::convert::TryFrom;
use etherparse::{IpTrafficClass, Ipv4Header};
use log::trace;
use crate::icmp::IcmpV4Packet;
use super::packet::Packet;

/// Whether `pkt`, as read from a raw socket, is the echo reply to `probe`.
/// Raw IPv4 sockets may deliver the IP header in front of the ICMP message.
pub fn is_reply(pkt: &[u8], probe: &Packet) -> bool {
    let icmp = match strip(pkt) {
        Some(icmp) => icmp,
        None       => {
            trace!("skipping non-ICMP datagram");
            return false;
        }
    };

    match IcmpV4Packet::try_from(icmp) {
        Ok(IcmpV4Packet::EchoReply(echo)) if echo.id == probe.id() && echo.seq == probe.seq() => true,
        Ok(other) => {
            trace!("skipping {:?}", other);
            false
        }
        Err(e) => {
            trace!("skipping invalid datagram: {}", e);
            false
        }
    }
}

fn strip(pkt: &[u8]) -> Option<&[u8]> {
    match pkt.first() {
        Some(&b) if b >> 4 == 4 => match Ipv4Header::read_from_slice(pkt) {
            Ok((head, tail)) if head.protocol == ICMP4 => Some(tail),
            _                                          => None,
        },
        _ => Some(pkt),
    }
}

const ICMP4: u8 = IpTrafficClass::Icmp as u8;
