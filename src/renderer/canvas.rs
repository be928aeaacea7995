//! Canvas2D backend

use std::f64::consts::TAU;

use anyhow::{Context, Result, anyhow};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawCmd, DrawList, TextAlign};

const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

/// Replays draw lists onto a 2D context
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("getContext failed: {:?}", e))?
            .context("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("2d context has an unexpected type"))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Set the drawing buffer size in pixels
    pub fn resize(&self, width: f32, height: f32) {
        self.canvas.set_width(width.round() as u32);
        self.canvas.set_height(height.round() as u32);
    }

    pub fn render(&self, list: &DrawList) {
        let ctx = &self.ctx;
        for cmd in &list.cmds {
            match cmd {
                DrawCmd::Clear(color) => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
                }
                DrawCmd::Rect { rect, color } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                    glow,
                } => {
                    if let Some((glow_color, blur)) = glow {
                        ctx.set_shadow_color(&glow_color.to_css());
                        ctx.set_shadow_blur(*blur as f64);
                    }
                    ctx.begin_path();
                    if ctx
                        .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                        .is_ok()
                    {
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.fill();
                    }
                    if glow.is_some() {
                        ctx.set_shadow_blur(0.0);
                    }
                }
                DrawCmd::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*width as f64);
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.stroke();
                }
                DrawCmd::Text {
                    pos,
                    text,
                    size_px,
                    color,
                    align,
                } => {
                    ctx.set_font(&format!("bold {}px {}", size_px.round(), FONT_FAMILY));
                    ctx.set_text_align(match align {
                        TextAlign::Left => "left",
                        TextAlign::Center => "center",
                    });
                    ctx.set_fill_style_str(&color.to_css());
                    let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
            }
        }
    }
}
