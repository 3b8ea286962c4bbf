// Surface backed by an HTML canvas and its 2d context.

use crate::error::{SetupError, SurfaceError};
use crate::surface::{Paint, Rect, Size, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Looks the canvas up by element id and grabs its 2d context.
    pub fn find(document: &Document, canvas_id: &str) -> Result<CanvasSurface, SetupError> {
        let element = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SetupError::CanvasNotFound(canvas_id.to_owned()))?;
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SetupError::NotACanvas(canvas_id.to_owned()))?;
        CanvasSurface::new(canvas)
    }

    pub fn new(canvas: HtmlCanvasElement) -> Result<CanvasSurface, SetupError> {
        let context = canvas
            .get_context("2d")?
            .ok_or(SetupError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SetupError::NoContext)?;
        Ok(CanvasSurface { canvas, context })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn resize(&mut self, size: Size) {
        // Setting either dimension clears the canvas, same as the browser does
        // for any canvas resize.
        self.canvas.set_width(size.width.max(0.0) as u32);
        self.canvas.set_height(size.height.max(0.0) as u32);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), SurfaceError> {
        match *paint {
            Paint::Solid { color, alpha } => {
                self.context.set_fill_style_str(&color.to_css(alpha));
            }
            Paint::RadialGlow {
                center,
                radius,
                color,
                alpha,
            } => {
                let gradient = self
                    .context
                    .create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)?;
                gradient.add_color_stop(0.0, &color.to_css(alpha))?;
                gradient.add_color_stop(1.0, &color.to_css(0.0))?;
                self.context.set_fill_style_canvas_gradient(&gradient);
            }
        }
        self.context
            .fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }
}
