//! 2D canvas backend
//!
//! Executes draw commands on a `CanvasRenderingContext2d`.

use web_sys::CanvasRenderingContext2d;

use super::frame::{DrawCommand, SpriteDraw};
use crate::assets::WebImages;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    pub fn draw(&self, commands: &[DrawCommand], images: &WebImages) {
        for command in commands {
            match command {
                DrawCommand::Clear { width, height } => {
                    self.ctx
                        .clear_rect(0.0, 0.0, *width as f64, *height as f64);
                }
                DrawCommand::Sprite(draw) => self.draw_sprite(draw, images),
            }
        }
    }

    fn draw_sprite(&self, draw: &SpriteDraw, images: &WebImages) {
        let Some(img) = images.get(draw.sprite) else {
            return;
        };
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.translate(draw.anchor.x as f64, draw.anchor.y as f64);
        if draw.rotation != 0.0 {
            let _ = ctx.rotate(draw.rotation as f64);
        }
        if draw.mirror {
            let _ = ctx.scale(-1.0, 1.0);
        }
        if ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                img,
                draw.offset.x as f64,
                draw.offset.y as f64,
                draw.size.x as f64,
                draw.size.y as f64,
            )
            .is_err()
        {
            log::warn!("drawImage failed for {:?}", draw.sprite);
        }
        ctx.restore();
    }
}
