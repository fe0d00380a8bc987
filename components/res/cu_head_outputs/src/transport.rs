use crate::state::HeadFrame;
use cu29::prelude::*;
use parking_lot::Mutex;

/// Where encoded head frames go once an output transmits them.
pub trait HeadTransport: Send + Sync {
    fn send(&self, frame: &[u8]) -> CuResult<()>;
}

/// Accepts everything and keeps nothing.
#[derive(Debug, Default)]
pub struct NullTransport;

impl HeadTransport for NullTransport {
    fn send(&self, _frame: &[u8]) -> CuResult<()> {
        Ok(())
    }
}

/// In-memory transport, handy for simulation and tests.
#[derive(Debug, Default)]
pub struct LoopbackTransport {
    frames: Mutex<Vec<Vec<u8>>>,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }

    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.frames.lock().clone()
    }

    /// Decodes the most recent frame, `None` if nothing was sent yet.
    pub fn decode_last(&self) -> CuResult<Option<HeadFrame>> {
        let frames = self.frames.lock();
        let Some(last) = frames.last() else {
            return Ok(None);
        };
        let (frame, _) = bincode::decode_from_slice(last, bincode::config::standard())
            .map_err(|e| CuError::new_with_cause("LoopbackTransport: Failed to decode frame", e))?;
        Ok(Some(frame))
    }
}

impl HeadTransport for LoopbackTransport {
    fn send(&self, frame: &[u8]) -> CuResult<()> {
        self.frames.lock().push(frame.to_vec());
        Ok(())
    }
}
