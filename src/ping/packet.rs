use rand::Rng;
use crate::icmp::icmp4::{self, checksum};

pub const IDENT: u16 = 1;

/// Echo request ready to be written to the wire: an 8 byte header
/// followed by a zero filled payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Packet {
    data: Vec<u8>,
}

impl Packet {
    /// Build an echo request with a sequence number drawn from `rng`.
    pub fn build<R: Rng>(size: usize, rng: &mut R) -> Self {
        Self::new(size, rng.gen_range(0..u16::MAX))
    }

    pub fn new(size: usize, seq: u16) -> Self {
        let mut data = vec![0u8; icmp4::HEADER_SIZE + size];

        data[0..2].copy_from_slice(&[icmp4::ECHO_REQUEST, 0]);
        data[2..4].copy_from_slice(&0u16.to_be_bytes());
        data[4..6].copy_from_slice(&IDENT.to_be_bytes());
        data[6..8].copy_from_slice(&seq.to_be_bytes());

        let cksum = checksum(&data).to_be_bytes();
        data[2..4].copy_from_slice(&cksum);

        Self { data }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn payload_size(&self) -> usize {
        self.data.len() - icmp4::HEADER_SIZE
    }

    pub fn id(&self) -> u16 {
        u16::from_be_bytes([self.data[4], self.data[5]])
    }

    pub fn seq(&self) -> u16 {
        u16::from_be_bytes([self.data[6], self.data[7]])
    }

    pub fn checksum(&self) -> u16 {
        u16::from_be_bytes([self.data[2], self.data[3]])
    }

    /// Whether the stored checksum matches the contents.
    pub fn is_valid(&self) -> bool {
        checksum(&self.data) == 0
    }
}
