use bincode::de::Decoder;
use bincode::enc::Encoder;
use bincode::error::{DecodeError, EncodeError};
use bincode::{Decode, Encode};
use cu29::prelude::*;
use cu_head_outputs::{HeadOutput, OutputRegistry, FULL_HEAD_KEY};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Config key naming the output to replay, `full_head` when absent.
pub const OUTPUT_KEY: &str = "output";

/// Emitted once per tick after the head output has transmitted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct HeadTick {
    /// Time since the previous tick, zero on the first one.
    pub dt: CuDuration,
}

/// Transmits the current neck, face and eye position without actually
/// controlling anything.
pub struct ManualHead {
    head_output: Arc<dyn HeadOutput>,
    last_tick: Option<CuTime>,
}

impl ManualHead {
    /// Resolves [`FULL_HEAD_KEY`] from `outputs`.
    pub fn from_registry(outputs: &OutputRegistry) -> CuResult<Self> {
        Ok(Self::with_output(outputs.get_instance(FULL_HEAD_KEY)?))
    }

    pub fn with_output(head_output: Arc<dyn HeadOutput>) -> Self {
        Self {
            head_output,
            last_tick: None,
        }
    }

    /// `dt` is not used: the targets are only replayed, never updated.
    pub fn step(&mut self, _dt: CuDuration) -> CuResult<()> {
        self.head_output.transmit()
    }

    fn elapsed(&mut self, now: CuTime) -> CuDuration {
        let dt = match self.last_tick {
            Some(last) if now > last => now - last,
            _ => CuDuration::default(),
        };
        self.last_tick = Some(now);
        dt
    }
}

impl Freezable for ManualHead {
    fn freeze<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        Encode::encode(&self.last_tick, encoder)
    }

    fn thaw<D: Decoder>(&mut self, decoder: &mut D) -> Result<(), DecodeError> {
        self.last_tick = Decode::decode(decoder)?;
        Ok(())
    }
}

impl CuSrcTask for ManualHead {
    type Output<'m> = output_msg!(HeadTick);

    fn new(config: Option<&ComponentConfig>) -> CuResult<Self>
    where
        Self: Sized,
    {
        let name = config
            .and_then(|cfg| cfg.get::<String>(OUTPUT_KEY))
            .unwrap_or_else(|| FULL_HEAD_KEY.to_string());
        let head_output = cu_head_outputs::get_instance(&name)?;
        debug!("ManualHead: replaying {}", name);
        Ok(Self::with_output(head_output))
    }

    fn start(&mut self, _clock: &RobotClock) -> CuResult<()> {
        self.last_tick = None;
        Ok(())
    }

    fn process<'o>(
        &mut self,
        clock: &RobotClock,
        output: &mut Self::Output<'o>,
    ) -> CuResult<()> {
        let now = clock.now();
        let dt = self.elapsed(now);
        self.step(dt)?;
        output.tov = Tov::Time(now);
        output.set_payload(HeadTick { dt });
        Ok(())
    }
}
