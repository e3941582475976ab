use super::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::core::Point;

#[derive(Default)]
struct Log {
    calls: Vec<&'static str>,
    enabled: Option<bool>,
    kind: Option<StrokeKind>,
}

/// Records call names; `fail` names the calls that should error.
struct MockDevice {
    log: Rc<RefCell<Log>>,
    fail: &'static [&'static str],
}

impl MockDevice {
    fn boxed(log: &Rc<RefCell<Log>>, fail: &'static [&'static str]) -> Box<dyn RawInputDevice> {
        Box::new(Self {
            log: Rc::clone(log),
            fail,
        })
    }

    fn call(&self, name: &'static str) -> anyhow::Result<()> {
        self.log.borrow_mut().calls.push(name);
        if self.fail.contains(&name) {
            anyhow::bail!("{name} failed");
        }
        Ok(())
    }
}

impl RawInputDevice for MockDevice {
    fn initialize(&mut self, _events: RawInputSender) -> anyhow::Result<()> {
        self.call("initialize")
    }

    fn set_fast_refresh(&mut self, _enabled: bool) -> anyhow::Result<()> {
        self.call("set_fast_refresh")
    }

    fn set_pen_up_refresh(&mut self, _delay: Duration) -> anyhow::Result<()> {
        self.call("set_pen_up_refresh")
    }

    fn set_stroke_kind(&mut self, kind: StrokeKind) -> anyhow::Result<()> {
        self.log.borrow_mut().kind = Some(kind);
        self.call("set_stroke_kind")
    }

    fn set_limit_region(&mut self, _bounds: Rect) -> anyhow::Result<()> {
        self.call("set_limit_region")
    }

    fn open_raw_drawing(&mut self) -> anyhow::Result<()> {
        self.call("open_raw_drawing")
    }

    fn close_raw_drawing(&mut self) -> anyhow::Result<()> {
        self.call("close_raw_drawing")
    }

    fn set_raw_drawing_enabled(&mut self, enabled: bool) -> anyhow::Result<()> {
        self.log.borrow_mut().enabled = Some(enabled);
        self.call("set_raw_drawing_enabled")
    }

    fn set_stroke_color(&mut self, _color: Color) -> anyhow::Result<()> {
        self.call("set_stroke_color")
    }

    fn set_stroke_width(&mut self, _width: f32) -> anyhow::Result<()> {
        self.call("set_stroke_width")
    }
}

fn params() -> ActivateParams {
    ActivateParams {
        size: SurfaceSize::new(100, 50).unwrap(),
        style: StrokeStyle::default(),
        pen_up_refresh: Duration::from_millis(500),
    }
}

#[test]
fn detect_only_builds_device_on_capable_hardware() {
    let log = Rc::new(RefCell::new(Log::default()));
    let ll = LowLatencyInput::detect(&DeviceInfo::new("Google", "Pixel"), || {
        MockDevice::boxed(&log, &[])
    });
    assert!(ll.is_unavailable());

    let ll = LowLatencyInput::detect(&DeviceInfo::new("Onyx", "Note"), || {
        MockDevice::boxed(&log, &[])
    });
    assert!(matches!(ll, LowLatencyInput::Detected(_)));
    assert!(log.borrow().calls.is_empty());
}

#[test]
fn activate_initializes_then_opens_disarmed() {
    let log = Rc::new(RefCell::new(Log::default()));
    let queue = RawInputQueue::new();
    let mut ll = LowLatencyInput::Detected(MockDevice::boxed(&log, &[]));

    assert!(ll.activate(params(), queue.sender()));
    assert!(ll.is_active());
    assert_eq!(
        log.borrow().calls,
        vec![
            "set_fast_refresh",
            "initialize",
            "set_pen_up_refresh",
            "set_stroke_kind",
            "set_stroke_color",
            "set_stroke_width",
            "set_limit_region",
            "open_raw_drawing",
            "set_raw_drawing_enabled",
        ]
    );
    assert_eq!(log.borrow().enabled, Some(false));
    assert_eq!(log.borrow().kind, Some(StrokeKind::Pencil));

    // Already active: nothing new happens.
    assert!(ll.activate(params(), queue.sender()));
    assert_eq!(log.borrow().calls.len(), 9);
}

#[test]
fn failed_initialize_downgrades_for_the_session() {
    let log = Rc::new(RefCell::new(Log::default()));
    let queue = RawInputQueue::new();
    let mut ll = LowLatencyInput::Detected(MockDevice::boxed(&log, &["initialize"]));

    assert!(!ll.activate(params(), queue.sender()));
    assert!(ll.is_unavailable());
    assert!(!ll.activate(params(), queue.sender()));

    let calls = log.borrow().calls.clone();
    assert!(!calls.contains(&"open_raw_drawing"));
    assert_eq!(calls.last(), Some(&"set_fast_refresh"));
}

#[test]
fn failures_after_initialize_are_swallowed() {
    let log = Rc::new(RefCell::new(Log::default()));
    let queue = RawInputQueue::new();
    let mut ll = LowLatencyInput::Detected(MockDevice::boxed(
        &log,
        &["open_raw_drawing", "set_raw_drawing_enabled", "close_raw_drawing"],
    ));

    assert!(ll.activate(params(), queue.sender()));
    ll.set_enabled(true);
    assert!(ll.is_active());
    ll.teardown();
    assert!(matches!(ll, LowLatencyInput::Detected(_)));
}

#[test]
fn teardown_is_idempotent_and_allows_reactivation() {
    let log = Rc::new(RefCell::new(Log::default()));
    let queue = RawInputQueue::new();
    let mut ll = LowLatencyInput::Detected(MockDevice::boxed(&log, &[]));
    ll.activate(params(), queue.sender());
    log.borrow_mut().calls.clear();

    ll.teardown();
    assert_eq!(
        log.borrow().calls,
        vec![
            "set_raw_drawing_enabled",
            "close_raw_drawing",
            "set_fast_refresh"
        ]
    );
    ll.teardown();
    assert_eq!(log.borrow().calls.len(), 3);

    assert!(ll.activate(params(), queue.sender()));

    let mut none = LowLatencyInput::Unavailable;
    none.teardown();
    assert!(none.is_unavailable());
}

#[test]
fn style_and_enable_are_only_forwarded_when_active() {
    let log = Rc::new(RefCell::new(Log::default()));
    let queue = RawInputQueue::new();
    let mut ll = LowLatencyInput::Detected(MockDevice::boxed(&log, &[]));

    ll.set_style(StrokeStyle::default());
    ll.set_enabled(true);
    ll.set_limit_region(Rect::new(0.0, 0.0, 1.0, 1.0));
    assert!(log.borrow().calls.is_empty());

    ll.activate(params(), queue.sender());
    log.borrow_mut().calls.clear();
    ll.set_style(StrokeStyle::new(Color::WHITE, 3.0));
    assert_eq!(
        log.borrow().calls,
        vec!["set_stroke_color", "set_stroke_width"]
    );
}

#[test]
fn queue_preserves_order_and_discards() {
    let queue = RawInputQueue::new();
    let tx = queue.sender();
    let from_thread = tx.clone();
    std::thread::spawn(move || {
        from_thread.send(RawInputEvent::BeginDrawing(Some(Point::new(1.0, 1.0))));
        from_thread.send(RawInputEvent::Points(vec![Point::new(2.0, 2.0)]));
    })
    .join()
    .unwrap();
    tx.send(RawInputEvent::EndDrawing);

    let got = queue.drain();
    assert_eq!(got.len(), 3);
    assert_eq!(got[2], RawInputEvent::EndDrawing);
    assert!(queue.drain().is_empty());

    tx.send(RawInputEvent::EndDrawing);
    assert_eq!(queue.discard_pending(), 1);
}
