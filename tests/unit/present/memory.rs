use super::*;

#[test]
fn unavailable_surface_hands_out_nothing() {
    let mut s = MemorySurface::new(4, 4);
    s.set_available(false);
    assert!(s.acquire().is_none());

    let mut empty = MemorySurface::new(0, 4);
    assert!(empty.acquire().is_none());
}

#[test]
fn present_swaps_front_and_recycles_previous() {
    let mut s = MemorySurface::new(2, 2);

    let mut a = s.acquire().unwrap();
    a.data[3] = 255;
    s.present(a);
    assert_eq!(s.front().unwrap().data[3], 255);

    // The second acquire allocates; the third reuses the buffer displaced by the second present.
    let b = s.acquire().unwrap();
    assert_eq!(b.data[3], 0);
    s.present(b);
    let c = s.acquire().unwrap();
    assert_eq!(c.data[3], 255);
    s.discard(c);

    assert_eq!(s.presents(), 2);
    assert_eq!(s.discards(), 1);
}

#[test]
fn resize_drops_stale_buffers() {
    let mut s = MemorySurface::new(2, 2);
    let a = s.acquire().unwrap();
    s.discard(a);
    s.resize(3, 1);
    let b = s.acquire().unwrap();
    assert_eq!((b.width, b.height, b.data.len()), (3, 1, 12));
}
