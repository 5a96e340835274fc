//! Canvas 2D render surface

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::platform::{Color, PlatformError, RenderSurface, Viewport};
use crate::sim::Rect;

/// Render surface backed by a `<canvas>` 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, PlatformError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| PlatformError::Host(format!("{e:?}")))?
            .ok_or(PlatformError::Unavailable("2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlatformError::Unavailable("2d context"))?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the playfield
    pub fn resize(&self, viewport: Viewport) {
        self.canvas.set_width(viewport.width as u32);
        self.canvas.set_height(viewport.height as u32);
    }
}

impl RenderSurface for CanvasSurface {
    fn clear(&mut self) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            rect.left() as f64,
            rect.top() as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }
}
