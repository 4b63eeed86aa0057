use std::sync::Arc;
use std::time::Duration;
use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng};
use super::error::Error;
use super::ping::Prober;
use super::sock::RawDialer;
use super::transport::Dialer;

/// A `Prober` that can be cloned and used from several threads. Probes
/// from different callers are serialized.
pub struct SharedProber<D: Dialer = RawDialer, R: Rng = StdRng>(Arc<Mutex<Prober<D, R>>>);

impl<D: Dialer, R: Rng> SharedProber<D, R> {
    pub fn new(prober: Prober<D, R>) -> Self {
        Self(Arc::new(Mutex::new(prober)))
    }

    pub fn probe(&self) -> i64 {
        self.0.lock().probe()
    }

    pub fn send(&self) -> Result<Duration, Error> {
        self.0.lock().send()
    }

    pub fn set_payload_size(&self, size: usize) {
        self.0.lock().set_payload_size(size);
    }

    pub fn set_address(&self, addr: &str) {
        self.0.lock().set_address(addr);
    }

    pub fn close(&self) {
        self.0.lock().close();
    }
}

impl<D: Dialer, R: Rng> Clone for SharedProber<D, R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<D: Dialer, R: Rng> From<Prober<D, R>> for SharedProber<D, R> {
    fn from(prober: Prober<D, R>) -> Self {
        Self::new(prober)
    }
}
