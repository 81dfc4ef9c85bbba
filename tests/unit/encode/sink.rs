use super::*;

fn frame() -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 2,
        data: vec![9; 16],
        premultiplied: true,
    }
}

#[test]
fn sink_config_validation() {
    let ok = SinkConfig {
        width: 1280,
        height: 720,
        fps: 24,
    };
    assert!(ok.validate().is_ok());
    assert!(SinkConfig { fps: 0, ..ok }.validate().is_err());
    assert!(SinkConfig { width: 0, ..ok }.validate().is_err());
    assert!(SinkConfig { height: 719, ..ok }.validate().is_err());
}

#[test]
fn in_memory_sink_records_frames_in_order() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        fps: 10,
    };
    sink.begin(cfg).unwrap();
    for i in 0..3 {
        sink.push_frame(i, &frame()).unwrap();
    }
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(cfg));
    assert!(sink.is_finished());
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![0, 1, 2]);
}

#[test]
fn in_memory_sink_requires_begin() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(0, &frame()).is_err());
}
