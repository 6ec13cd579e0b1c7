//! Paint commands planned from caption layouts

use crate::rendering::layout::{CaptionLayout, Rect};
use crate::{Color, TextStyle};

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Outline pass: glyph coverage grown by `radius`. A `hollow` stroke
    /// leaves the glyph interior unpainted.
    StrokeText {
        rect: Rect,
        font_px: f32,
        text: String,
        radius: f32,
        hollow: bool,
        color: Color,
    },
    /// Fill pass: plain glyph coverage
    FillText {
        rect: Rect,
        font_px: f32,
        text: String,
        color: Color,
    },
}

impl PaintCommand {
    /// Pixels of padding the command needs around its line box
    pub fn padding(&self) -> u32 {
        match self {
            PaintCommand::StrokeText { radius, .. } => radius.ceil() as u32,
            PaintCommand::FillText { .. } => 0,
        }
    }
}

/// Plan the paint passes for a set of captions. Every caption's stroke
/// comes before its fill so the fill sits on top of the outline.
pub fn plan(layouts: &[CaptionLayout], style: &TextStyle) -> Vec<PaintCommand> {
    let mut commands = Vec::with_capacity(layouts.len() * 2);
    for layout in layouts {
        let radius = style.stroke_radius(layout.font_px);
        if style.draws_stroke() && radius > 0.0 {
            commands.push(PaintCommand::StrokeText {
                rect: layout.rect.clone(),
                font_px: layout.font_px,
                text: layout.text.clone(),
                radius,
                hollow: !style.draws_fill(),
                color: style.stroke_color,
            });
        }
        if style.draws_fill() {
            commands.push(PaintCommand::FillText {
                rect: layout.rect.clone(),
                font_px: layout.font_px,
                text: layout.text.clone(),
                color: style.fill_color,
            });
        }
    }
    commands
}
