//! Head outputs for Copper.
//!
//! A [`FullHeadOutput`] holds the neck, eye and face targets of a robot head and
//! sends a snapshot of them over a [`HeadTransport`] each time it is asked to
//! transmit. Outputs live in an [`OutputRegistry`] and are looked up by name;
//! the one returned by [`outputs`] is what Copper tasks resolve from.

mod output;
mod registry;
mod state;
mod transport;

pub use output::{FullHeadOutput, HeadOutput, INITIAL_FACE_KEY};
pub use registry::{
    get_instance, outputs, register_full_head, register_head_output, OutputRegistry,
};
pub use state::{EyeGaze, FaceExpression, HeadFrame, HeadState, NeckPose};
pub use transport::{HeadTransport, LoopbackTransport, NullTransport};

/// Registry name of the output carrying neck, face and eyes together.
pub const FULL_HEAD_KEY: &str = "full_head";
