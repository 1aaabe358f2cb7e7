//! The boundary to whatever actually puts pixels on a screen.
//!
//! The simulation only ever describes primitives. Glow layering, alpha
//! falloff and text halos belong to the renderer.

use glam::Vec2;
use serde::Serialize;

pub mod canvas;
pub mod recording;

pub use canvas::Canvas;
pub use recording::RecordingRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub const fn gray(level: u8) -> Self {
        Self([level, level, level])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    TopLeft,
    CenterLeft,
    BaselineCenter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Polyline {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
        glow_layers: u8,
    },
    Segment {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
        glow_layers: u8,
    },
    Bezier {
        from: Vec2,
        control_a: Vec2,
        control_b: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
        glow_layers: u8,
    },
    /// Smooth closed outline through the points
    ClosedCurve {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
        glow_layers: u8,
    },
    Dot {
        center: Vec2,
        diameter: f32,
        color: Color,
        glow_layers: u8,
    },
    RoundedRect {
        corner: Vec2,
        size: Vec2,
        corner_radius: f32,
        color: Color,
        width: f32,
        glow_layers: u8,
    },
    Text {
        text: String,
        anchor: Vec2,
        size: f32,
        color: Color,
        align: TextAlign,
        glow: bool,
    },
}

impl DrawCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Clear { .. } => "Clear",
            DrawCommand::Polyline { .. } => "Polyline",
            DrawCommand::Segment { .. } => "Segment",
            DrawCommand::Bezier { .. } => "Bezier",
            DrawCommand::ClosedCurve { .. } => "ClosedCurve",
            DrawCommand::Dot { .. } => "Dot",
            DrawCommand::RoundedRect { .. } => "RoundedRect",
            DrawCommand::Text { .. } => "Text",
        }
    }
}

pub trait Renderer {
    fn draw(&mut self, command: DrawCommand);

    /// Forwarded to the host window, if there is one
    fn set_fullscreen(&mut self, _fullscreen: bool) {}

    fn is_fullscreen(&self) -> bool {
        false
    }
}
