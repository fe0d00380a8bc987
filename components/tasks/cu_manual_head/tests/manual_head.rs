use cu29::prelude::*;
use cu_head_outputs::{
    register_full_head, EyeGaze, FaceExpression, HeadOutput, LoopbackTransport, NeckPose,
    OutputRegistry, FULL_HEAD_KEY,
};
use cu_manual_head::ManualHead;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct CountingOutput {
    transmits: AtomicUsize,
}

impl HeadOutput for CountingOutput {
    fn name(&self) -> &str {
        "counting"
    }

    fn transmit(&self) -> CuResult<()> {
        self.transmits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FailingOutput;

impl HeadOutput for FailingOutput {
    fn name(&self) -> &str {
        "failing"
    }

    fn transmit(&self) -> CuResult<()> {
        Err("head bus unplugged".into())
    }
}

#[test]
fn each_step_transmits_exactly_once_whatever_the_dt() {
    let output = Arc::new(CountingOutput::default());
    let mut mode = ManualHead::with_output(output.clone());

    let dts = [
        CuDuration::default(),
        CuDuration::from(Duration::from_millis(10)),
        CuDuration::from(Duration::from_secs(3600)),
        CuDuration::from(u64::MAX),
    ];
    for (i, dt) in dts.into_iter().enumerate() {
        mode.step(dt).unwrap();
        assert_eq!(output.transmits.load(Ordering::SeqCst), i + 1);
    }
}

#[test]
fn construction_resolves_full_head_from_the_registry() {
    let transport = Arc::new(LoopbackTransport::new());
    let mut registry = OutputRegistry::new();
    let head = register_full_head(&mut registry, None, transport.clone()).unwrap();

    let mut mode = ManualHead::from_registry(&registry).unwrap();
    mode.step(CuDuration::from(Duration::from_millis(20))).unwrap();

    assert_eq!(head.transmitted(), 1);
    assert_eq!(transport.len(), 1);
}

#[test]
fn construction_fails_without_full_head() {
    let registry = OutputRegistry::new();
    let err = ManualHead::from_registry(&registry).err().unwrap();
    assert!(err.to_string().contains(FULL_HEAD_KEY));
}

#[test]
fn step_replays_targets_without_changing_them() {
    let transport = Arc::new(LoopbackTransport::new());
    let mut registry = OutputRegistry::new();
    let head = register_full_head(&mut registry, None, transport.clone()).unwrap();
    head.set_neck(NeckPose {
        yaw: 0.2,
        pitch: 0.1,
        roll: 0.0,
    });
    head.set_eyes(EyeGaze {
        yaw: 0.05,
        pitch: -0.3,
    });
    head.set_face(FaceExpression::new("surprised", 0.6));
    let before = head.state();

    let mut mode = ManualHead::from_registry(&registry).unwrap();
    mode.step(CuDuration::from(Duration::from_millis(50))).unwrap();
    mode.step(CuDuration::from(Duration::from_millis(50))).unwrap();

    assert_eq!(head.state(), before);
    let frame = transport.decode_last().unwrap().unwrap();
    assert_eq!(frame.sequence, 1);
    assert_eq!(frame.state, before);
    assert_eq!(frame.state.eyes.pitch, -0.3);
}

#[test]
fn transmit_errors_propagate_unchanged() {
    let mut mode = ManualHead::with_output(Arc::new(FailingOutput));
    let err = mode.step(CuDuration::default()).unwrap_err();
    assert!(err.to_string().contains("head bus unplugged"));
}
