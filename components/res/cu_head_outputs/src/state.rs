use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

const NEUTRAL_FACE: &str = "neutral";

/// Neck orientation in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct NeckPose {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

/// Gaze direction of both eyes in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct EyeGaze {
    pub yaw: f32,
    pub pitch: f32,
}

/// Named facial expression and how strongly it is shown, from 0.0 to 1.0.
#[derive(Debug, Clone, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct FaceExpression {
    pub name: String,
    pub intensity: f32,
}

impl FaceExpression {
    /// Intensity is clamped to [0.0, 1.0], NaN becomes 0.0.
    pub fn new(name: impl Into<String>, intensity: f32) -> Self {
        Self {
            name: name.into(),
            intensity,
        }
        .clamped()
    }

    /// Same expression with its intensity forced back into [0.0, 1.0].
    pub fn clamped(mut self) -> Self {
        self.intensity = if self.intensity.is_nan() {
            0.0
        } else {
            self.intensity.clamp(0.0, 1.0)
        };
        self
    }
}

impl Default for FaceExpression {
    fn default() -> Self {
        Self::new(NEUTRAL_FACE, 0.0)
    }
}

/// Everything the full head output knows about the head.
#[derive(Debug, Clone, Default, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct HeadState {
    pub neck: NeckPose,
    pub eyes: EyeGaze,
    pub face: FaceExpression,
}

/// One transmitted snapshot of the head state.
#[derive(Debug, Clone, Default, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct HeadFrame {
    pub sequence: u64,
    pub state: HeadState,
}
