use crate::foundation::color::Color;

/// Color and width shared by every stroke until changed.
///
/// Joins and caps are always round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub fn with_width(self, width: f32) -> Self {
        Self { width, ..self }
    }

    /// Rasterizer stroke parameters.
    pub(crate) fn to_cpu_stroke(self) -> vello_cpu::kurbo::Stroke {
        vello_cpu::kurbo::Stroke::new(f64::from(self.width))
            .with_join(vello_cpu::kurbo::Join::Round)
            .with_caps(vello_cpu::kurbo::Cap::Round)
    }

    /// Half the line width plus one pixel of antialiasing fringe.
    pub(crate) fn coverage_radius(self) -> f64 {
        f64::from(self.width) * 0.5 + 1.0
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color::BLACK, 6.0)
    }
}
