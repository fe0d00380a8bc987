use crate::state::{EyeGaze, FaceExpression, HeadFrame, HeadState, NeckPose};
use crate::transport::HeadTransport;
use cu29::prelude::*;
use parking_lot::Mutex;
use std::sync::Arc;

/// Config key for the expression shown before anyone sets one.
pub const INITIAL_FACE_KEY: &str = "initial_face";

/// An output that can be asked to send whatever state it currently holds.
pub trait HeadOutput: Send + Sync {
    fn name(&self) -> &str;

    fn transmit(&self) -> CuResult<()>;
}

struct Inner {
    state: HeadState,
    sequence: u64,
}

/// Neck, face and eye state behind one output.
/// Targets are set by whoever drives the head, `transmit` replays the latest ones.
pub struct FullHeadOutput {
    name: String,
    transport: Arc<dyn HeadTransport>,
    inner: Mutex<Inner>,
    sending: Mutex<()>,
}

impl FullHeadOutput {
    pub fn new(name: impl Into<String>, transport: Arc<dyn HeadTransport>) -> Self {
        Self {
            name: name.into(),
            transport,
            inner: Mutex::new(Inner {
                state: HeadState::default(),
                sequence: 0,
            }),
            sending: Mutex::new(()),
        }
    }

    pub fn from_config(
        name: impl Into<String>,
        config: Option<&ComponentConfig>,
        transport: Arc<dyn HeadTransport>,
    ) -> CuResult<Self> {
        let output = Self::new(name, transport);
        if let Some(face) = config.and_then(|cfg| cfg.get::<String>(INITIAL_FACE_KEY)) {
            if face.is_empty() {
                return Err(CuError::from(format!(
                    "FullHeadOutput: '{INITIAL_FACE_KEY}' cannot be empty"
                )));
            }
            output.set_face(FaceExpression::new(face, 0.0));
        }
        Ok(output)
    }

    pub fn set_neck(&self, neck: NeckPose) {
        self.inner.lock().state.neck = neck;
    }

    pub fn set_eyes(&self, eyes: EyeGaze) {
        self.inner.lock().state.eyes = eyes;
    }

    /// The intensity is clamped before it is stored.
    pub fn set_face(&self, face: FaceExpression) {
        self.inner.lock().state.face = face.clamped();
    }

    pub fn state(&self) -> HeadState {
        self.inner.lock().state.clone()
    }

    /// Number of frames successfully handed to the transport.
    pub fn transmitted(&self) -> u64 {
        self.inner.lock().sequence
    }
}

impl HeadOutput for FullHeadOutput {
    fn name(&self) -> &str {
        &self.name
    }

    fn transmit(&self) -> CuResult<()> {
        // Serializes transmits; state stays unlocked while the transport sends.
        let _sending = self.sending.lock();
        let frame = {
            let inner = self.inner.lock();
            HeadFrame {
                sequence: inner.sequence,
                state: inner.state.clone(),
            }
        };
        let bytes = bincode::encode_to_vec(&frame, bincode::config::standard())
            .map_err(|e| CuError::new_with_cause("FullHeadOutput: Failed to encode frame", e))?;
        self.transport.send(&bytes)?;
        self.inner.lock().sequence += 1;
        debug!("FullHeadOutput: sent frame {}", frame.sequence);
        Ok(())
    }
}
