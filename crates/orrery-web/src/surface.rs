use orrery_engine::{Color, DrawItem, DrawList, Viewport};
use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

/// How far the highlight of a lit disc sits from its center, as a
/// fraction of the radius.
const HIGHLIGHT_OFFSET: f32 = 0.45;

/// `#rrggbb` for a color, as Canvas2D and CSS expect.
pub fn css_color(color: Color) -> String {
    format!("#{:06x}", color.to_hex())
}

/// Focus point of the radial gradient used to shade a lit sphere.
pub fn highlight_center(center: Vec2, radius: f32, light_dir: Vec2) -> Vec2 {
    center + light_dir * radius * HIGHLIGHT_OFFSET
}

/// Full-viewport `<canvas>` with a Canvas2D painter for draw lists.
pub struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl Surface {
    /// Create the canvas and append it to `parent`.
    pub fn attach(document: &Document, parent: &Element, viewport: Viewport) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        let style = canvas.style();
        style.set_property("display", "block")?;
        style.set_property("touch-action", "none")?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        parent.append_child(&canvas)?;

        let mut surface = Self { canvas, ctx, viewport };
        surface.resize(viewport);
        Ok(surface)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.canvas.set_width(viewport.width as u32);
        self.canvas.set_height(viewport.height as u32);
    }

    /// Client coordinates to surface-local pixels.
    pub fn to_local(&self, client_x: f32, client_y: f32) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        Vec2::new(client_x - rect.left() as f32, client_y - rect.top() as f32)
    }

    /// Paint one frame. Commands are already in back-to-front order.
    pub fn paint(&self, list: &DrawList) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(&css_color(list.clear_color));
        ctx.fill_rect(0.0, 0.0, self.viewport.width as f64, self.viewport.height as f64);

        for command in &list.commands {
            match &command.item {
                DrawItem::Points { points, color } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    for p in points {
                        let half = p.size * 0.5;
                        ctx.fill_rect(
                            (p.pos.x - half) as f64,
                            (p.pos.y - half) as f64,
                            p.size as f64,
                            p.size as f64,
                        );
                    }
                }
                DrawItem::Polyline { points, closed, width, color } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    ctx.begin_path();
                    ctx.move_to(first.x as f64, first.y as f64);
                    for p in rest {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    if *closed {
                        ctx.close_path();
                    }
                    ctx.set_line_width(*width as f64);
                    ctx.set_stroke_style_str(&css_color(*color));
                    ctx.stroke();
                }
                DrawItem::Disc { center, radius, lit, shadow, light_dir } => {
                    if *radius <= 0.0 {
                        continue;
                    }
                    match light_dir {
                        Some(dir) => {
                            let focus = highlight_center(*center, *radius, *dir);
                            let gradient = ctx.create_radial_gradient(
                                focus.x as f64,
                                focus.y as f64,
                                0.0,
                                center.x as f64,
                                center.y as f64,
                                *radius as f64,
                            )?;
                            gradient.add_color_stop(0.0, &css_color(*lit))?;
                            gradient.add_color_stop(1.0, &css_color(*shadow))?;
                            ctx.set_fill_style_canvas_gradient(&gradient);
                        }
                        None => ctx.set_fill_style_str(&css_color(*lit)),
                    }
                    ctx.begin_path();
                    ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    )?;
                    ctx.fill();
                }
            }
        }
        Ok(())
    }

    /// Remove the canvas from the document.
    pub fn detach(&self) {
        self.canvas.remove();
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_color_is_padded_hex() {
        assert_eq!(css_color(Color::from_hex(0x000011)), "#000011");
        assert_eq!(css_color(Color::from_hex(0xffff00)), "#ffff00");
    }

    #[test]
    fn highlight_leans_toward_the_light() {
        let focus = highlight_center(Vec2::new(100.0, 100.0), 20.0, Vec2::new(-1.0, 0.0));
        assert!(focus.x < 100.0);
        assert!((focus.y - 100.0).abs() < 1e-6);
    }
}
