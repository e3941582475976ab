use crate::foundation::core::{BezPath, Point, is_finite_point};

/// The polyline of the stroke in progress.
///
/// Keeps the raw vertices next to the [`BezPath`] so callers can inspect what was recorded
/// without walking path elements.
#[derive(Debug, Clone, Default)]
pub struct StrokePathBuilder {
    points: Vec<Point>,
    path: BezPath,
}

impl StrokePathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset and start a new path at `p`. Returns false (and leaves the path untouched) for
    /// non-finite coordinates.
    pub fn begin(&mut self, p: Point) -> bool {
        if !is_finite_point(p) {
            return false;
        }
        self.reset();
        self.points.push(p);
        self.path.move_to(p);
        true
    }

    /// Append a line segment to `p`. Ignored before `begin` or for non-finite coordinates.
    pub fn extend(&mut self, p: Point) -> bool {
        if self.points.is_empty() || !is_finite_point(p) {
            return false;
        }
        self.points.push(p);
        self.path.line_to(p);
        true
    }

    /// Extend by every point in order; returns how many were applied.
    pub fn extend_batch<I>(&mut self, points: I) -> usize
    where
        I: IntoIterator<Item = Point>,
    {
        points.into_iter().filter(|&p| self.extend(p)).count()
    }

    pub fn reset(&mut self) {
        self.points.clear();
        self.path = BezPath::new();
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/path.rs"]
mod tests;
