// Immediate-mode 2D drawing targets. The field only ever clears, fills discs,
// and strokes lines, so that is all a surface has to support.

use crate::color::Color;
use std::f64::consts::PI;
use tracing::warn;
use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_disc(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64);
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, line_width: f64);
}

// Draws onto a browser canvas through its 2d context
pub struct CanvasSurface {
    pub context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        CanvasSurface { context }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_disc(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64) {
        self.context.begin_path();
        if let Err(e) = self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0) {
            warn!(?e, "arc rejected by canvas");
            return;
        }
        self.context
            .set_fill_style_str(&color.to_css_rgba(alpha));
        self.context.fill();
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, line_width: f64) {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context
            .set_stroke_style_str(&color.to_css_rgba(alpha));
        self.context.set_line_width(line_width);
        self.context.stroke();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Disc {
        center: [f64; 2],
        radius: f64,
        color: Color,
        alpha: f64,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        line_width: f64,
    },
}

/// Headless surface that records every draw call in order.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        CommandBuffer::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn discs(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disc { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Surface for CommandBuffer {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_disc(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, line_width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            alpha,
            line_width,
        });
    }
}
