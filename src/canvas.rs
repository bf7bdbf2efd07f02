use crate::constants::{FONT_FAMILY, FONT_WEIGHT};
use crate::core::{Rgba, Surface};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// `Surface` over a 2D canvas context. Drawing happens in CSS pixels; the
/// context transform carries the device pixel ratio.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    size: Vec2,
    dpr: f64,
}

impl CanvasSurface {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            ctx,
            size: Vec2::ZERO,
            dpr: 1.0,
        })
    }

    pub fn resize(&mut self, css_size: Vec2, dpr: f64) {
        self.size = css_size;
        self.dpr = dpr;
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[allow(deprecated)]
    fn set_fill(&self, color: Rgba) {
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_string()));
    }

    #[allow(deprecated)]
    fn set_stroke(&self, color: Rgba, width: f32) {
        self.ctx.set_stroke_style(&JsValue::from_str(&color.to_string()));
        self.ctx.set_line_width(width as f64);
    }
}

impl Surface for CanvasSurface {
    type Gradient = web::CanvasGradient;

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
    }

    fn create_halo(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Rgba,
        intensity: f32,
    ) -> Option<web::CanvasGradient> {
        let (x, y, r) = (center.x as f64, center.y as f64, radius.max(1.0) as f64);
        let g = match self.ctx.create_radial_gradient(x, y, 0.0, x, y, r) {
            Ok(g) => g,
            Err(e) => {
                log::debug!("radial gradient failed: {:?}", e);
                return None;
            }
        };
        let stops = [
            (0.0, color.with_alpha(intensity)),
            (0.45, color.with_alpha(intensity * 0.45)),
            (1.0, Rgba::TRANSPARENT),
        ];
        for (offset, c) in stops {
            if g.add_color_stop(offset, &c.to_string()).is_err() {
                return None;
            }
        }
        Some(g)
    }

    #[allow(deprecated)]
    fn fill_halo(&mut self, center: Vec2, radius: f32, gradient: &web::CanvasGradient) {
        self.ctx.set_fill_style(gradient);
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.set_stroke(color, width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn polygon(&mut self, points: &[Vec2], color: Rgba, width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.set_stroke(color, width);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.stroke();
    }

    fn circle(&mut self, center: Vec2, radius: f32, fill: Rgba, outline: Rgba, outline_width: f32) {
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.set_fill(fill);
        self.ctx.fill();
        self.set_stroke(outline, outline_width);
        self.ctx.stroke();
    }

    fn text(&mut self, text: &str, at: Vec2, size_px: f32, color: Rgba) {
        self.ctx
            .set_font(&format!("{} {:.0}px {}", FONT_WEIGHT, size_px.max(1.0), FONT_FAMILY));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.set_fill(color);
        _ = self.ctx.fill_text(text, at.x as f64, at.y as f64);
    }
}
