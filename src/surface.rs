// The drawing surface the field paints into. The browser implementation lives
// in `canvas`; `RecordingSurface` keeps every call so tests and headless hosts
// can inspect a frame.

use crate::color::Color;
use crate::error::SurfaceError;
use glm::DVec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Size {
        Size { width, height }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn covering(size: Size) -> Rect {
        Rect {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    /// Square of side `side` centred on `center`.
    pub fn centered(center: DVec2, side: f64) -> Rect {
        let half = side / 2.0;
        Rect {
            x: center.x - half,
            y: center.y - half,
            width: side,
            height: side,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Paint {
    Solid {
        color: Color,
        alpha: f64,
    },
    /// `color` at `alpha` in the centre fading linearly to fully transparent
    /// at `radius`.
    RadialGlow {
        center: DVec2,
        radius: f64,
        color: Color,
        alpha: f64,
    },
}

impl Paint {
    pub fn alpha(&self) -> f64 {
        match *self {
            Paint::Solid { alpha, .. } | Paint::RadialGlow { alpha, .. } => alpha,
        }
    }
}

pub trait Surface {
    fn size(&self) -> Size;

    fn resize(&mut self, size: Size);

    /// Composites `paint` over `rect` (source-over alpha blending).
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), SurfaceError>;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FillRect {
    pub rect: Rect,
    pub paint: Paint,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Option<Size>,
    calls: Vec<FillRect>,
    fail_draws: bool,
}

impl RecordingSurface {
    pub fn new(size: Size) -> RecordingSurface {
        RecordingSurface {
            size: Some(size),
            calls: Vec::new(),
            fail_draws: false,
        }
    }

    /// A surface whose every draw call fails.
    pub fn failing(size: Size) -> RecordingSurface {
        RecordingSurface {
            fail_draws: true,
            ..RecordingSurface::new(size)
        }
    }

    pub fn calls(&self) -> &[FillRect] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<FillRect> {
        std::mem::take(&mut self.calls)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size.unwrap_or_else(|| Size::new(0.0, 0.0))
    }

    fn resize(&mut self, size: Size) {
        self.size = Some(size);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), SurfaceError> {
        if self.fail_draws {
            return Err(SurfaceError::Draw("recording surface set to fail".to_owned()));
        }
        self.calls.push(FillRect {
            rect,
            paint: *paint,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PALETTE;

    #[test]
    fn centered_rect_surrounds_point() {
        let rect = Rect::centered(glm::vec2(100.0, 50.0), 12.0);
        assert_eq!(
            rect,
            Rect {
                x: 94.0,
                y: 44.0,
                width: 12.0,
                height: 12.0
            }
        );
    }

    #[test]
    fn recording_surface_keeps_calls_in_order() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        let solid = Paint::Solid {
            color: PALETTE[2],
            alpha: 0.5,
        };
        surface.fill_rect(Rect::covering(surface.size()), &solid).unwrap();
        surface
            .fill_rect(Rect::centered(glm::vec2(1.0, 1.0), 2.0), &solid)
            .unwrap();
        assert_eq!(surface.calls().len(), 2);
        assert_eq!(surface.calls()[0].rect.width, 10.0);
        assert_eq!(surface.take_calls().len(), 2);
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn failing_surface_reports_errors() {
        let mut surface = RecordingSurface::failing(Size::new(1.0, 1.0));
        let paint = Paint::Solid {
            color: PALETTE[0],
            alpha: 1.0,
        };
        assert!(surface.fill_rect(Rect::covering(surface.size()), &paint).is_err());
        assert!(surface.calls().is_empty());
    }
}
