use super::*;

#[test]
fn fires_once_at_deadline() {
    let t0 = Instant::now();
    let mut t = DisarmTimer::default();
    t.schedule(t0, Duration::from_millis(500));

    assert!(!t.fire_if_due(t0 + Duration::from_millis(499)));
    assert!(t.fire_if_due(t0 + Duration::from_millis(500)));
    assert!(!t.fire_if_due(t0 + Duration::from_secs(5)));
    assert!(!t.is_pending());
}

#[test]
fn reschedule_replaces_pending_deadline() {
    let t0 = Instant::now();
    let mut t = DisarmTimer::default();
    t.schedule(t0, Duration::from_millis(500));
    t.schedule(t0 + Duration::from_millis(300), Duration::from_millis(500));

    assert_eq!(t.deadline(), Some(t0 + Duration::from_millis(800)));
    assert!(!t.fire_if_due(t0 + Duration::from_millis(600)));
}

#[test]
fn cancel_reports_whether_anything_was_pending() {
    let t0 = Instant::now();
    let mut t = DisarmTimer::default();
    assert!(!t.cancel());
    t.schedule(t0, Duration::ZERO);
    assert!(t.cancel());
    assert!(!t.fire_if_due(t0 + Duration::from_secs(1)));
}
