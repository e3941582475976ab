use super::*;
use crate::present::memory::MemorySurface;

fn parse(json: &str) -> Trace {
    Trace::from_reader(json.as_bytes()).unwrap()
}

const DIRECT: &str = r#"{
    "width": 32,
    "height": 32,
    "events": [
        {"t_ms": 0,  "op": {"pointer": {"action": "down", "x": 10, "y": 10}}},
        {"t_ms": 8,  "op": {"pointer": {"action": "move", "x": 20, "y": 10}}},
        {"t_ms": 16, "op": {"pointer": {"action": "move", "x": 20, "y": 20}}},
        {"t_ms": 24, "op": {"pointer": {"action": "up",   "x": 20, "y": 20}}}
    ]
}"#;

const RAW: &str = r##"{
    "width": 48,
    "height": 24,
    "device": {"manufacturer": "Onyx", "model": "Nova"},
    "events": [
        {"t_ms": 0,  "op": {"style": {"color": "#ff0000", "width": 4}}},
        {"t_ms": 0,  "op": {"pointer": {"action": "down", "x": 4, "y": 12}}},
        {"t_ms": 1,  "op": {"raw": {"begin": [4, 12]}}},
        {"t_ms": 10, "op": {"raw": {"points": [[14, 12], [24, 12], [40, 12]]}}},
        {"t_ms": 20, "op": {"raw": "end"}}
    ]
}"##;

#[test]
fn trace_document_parses() {
    let t = parse(RAW);
    assert_eq!((t.width, t.height), (48, 24));
    assert!(t.device.as_ref().unwrap().supports_low_latency());
    assert_eq!(t.events.len(), 5);
    assert_eq!(t.events[4].op, TraceOp::Raw(RawStep::End));
    assert_eq!(
        t.events[2].op,
        TraceOp::Raw(RawStep::Begin(Some([4.0, 12.0])))
    );

    let clear = parse(r#"{"width": 1, "height": 1, "events": [{"t_ms": 3, "op": "clear"}]}"#);
    assert_eq!(clear.events[0].op, TraceOp::Clear);
}

#[test]
fn backwards_timestamps_and_empty_surfaces_are_rejected() {
    let err = Trace::from_reader(
        r#"{"width": 4, "height": 4, "events": [
            {"t_ms": 5, "op": "clear"},
            {"t_ms": 4, "op": "clear"}
        ]}"#
        .as_bytes(),
    )
    .unwrap_err();
    assert!(matches!(err, InkError::Validation(_)));

    let err = Trace::from_reader(r#"{"width": 0, "height": 4}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, InkError::Validation(_)));

    let err = Trace::from_reader(r#"{"width": 4, "height": 4, "bogus": 1}"#.as_bytes())
        .unwrap_err();
    assert!(matches!(err, InkError::Serde(_)));
}

#[test]
fn replay_matches_driving_the_board_directly() {
    let snap = replay(&parse(DIRECT), WhiteboardOpts::default(), false).unwrap();

    let now = Instant::now();
    let mut board = Whiteboard::new(
        MemorySurface::new(32, 32),
        WhiteboardOpts::default(),
        LowLatencyInput::Unavailable,
    )
    .unwrap();
    board.on_surface_created();
    board.on_surface_changed(32, 32).unwrap();
    board.on_pointer_event(PointerEvent::down(10.0, 10.0), now);
    board.on_pointer_event(PointerEvent::moved(20.0, 10.0), now);
    board.on_pointer_event(PointerEvent::moved(20.0, 20.0), now);
    board.on_pointer_event(PointerEvent::up(20.0, 20.0), now);

    assert_eq!(snap, board.snapshot().unwrap());
    assert!(snap.painted_pixels() > 0);
}

#[test]
fn raw_events_draw_through_the_emulated_device() {
    let snap = replay(&parse(RAW), WhiteboardOpts::default(), false).unwrap();

    let px = snap.pixel(30, 12).unwrap();
    assert!(px[3] >= 250);
    assert!(px[0] >= 250 && px[1] == 0 && px[2] == 0);
    assert_eq!(snap.pixel(30, 2), Some([0, 0, 0, 0]));
}

#[test]
fn raw_events_are_ignored_without_a_capable_device() {
    let mut trace = parse(RAW);
    trace.device = Some(DeviceInfo::new("Generic", "Tablet"));

    let snap = replay(&trace, WhiteboardOpts::default(), false).unwrap();
    assert!(snap.is_fully_transparent());

    // Forcing emulation brings the raw path back.
    let snap = replay(&trace, WhiteboardOpts::default(), true).unwrap();
    assert!(snap.painted_pixels() > 0);
}

#[test]
fn raw_events_before_arming_are_dropped() {
    let mut trace = parse(RAW);
    // Without the pointer-down, raw capture is never armed.
    trace.events.remove(1);

    let snap = replay(&trace, WhiteboardOpts::default(), true).unwrap();
    assert!(snap.is_fully_transparent());
}

#[test]
fn clear_wipes_earlier_strokes() {
    let mut trace = parse(DIRECT);
    trace.events.push(TraceEvent {
        t_ms: 30,
        op: TraceOp::Clear,
    });

    let snap = replay(&trace, WhiteboardOpts::default(), false).unwrap();
    assert!(snap.is_fully_transparent());
}

#[test]
fn invalid_style_width_fails_the_replay() {
    let mut trace = parse(DIRECT);
    trace.events.insert(
        0,
        TraceEvent {
            t_ms: 0,
            op: TraceOp::Style(StyleChange {
                color: None,
                width: Some(-2.0),
            }),
        },
    );
    assert!(replay(&trace, WhiteboardOpts::default(), false).is_err());
}
