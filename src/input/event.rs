use crate::foundation::core::Point;

/// Host pointer action, as dispatched by the windowing layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// One raw pointer/stylus sample in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(action: PointerAction, x: f64, y: f64) -> Self {
        Self { action, x, y }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerAction::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerAction::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerAction::Up, x, y)
    }

    pub fn cancel() -> Self {
        Self::new(PointerAction::Cancel, 0.0, 0.0)
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Callbacks from the low-latency subsystem, after marshaling onto the owning thread.
#[derive(Clone, Debug, PartialEq)]
pub enum RawInputEvent {
    /// Pen touched down. The point may be missing on some firmware.
    BeginDrawing(Option<Point>),
    /// A batch of stroke points, in arrival order.
    Points(Vec<Point>),
    EndDrawing,
    BeginErasing(Option<Point>),
    ErasingPoints(Vec<Point>),
    EndErasing,
}
