use glam::{Affine2, Vec2};

use crate::render::{Color, DrawCommand, Renderer, TextAlign};

/// Drawing surface with a push/pop transform stack, so scene code can be
/// written in local coordinates. Everything reaching the renderer is in
/// canvas coordinates.
pub struct Canvas<'r> {
    renderer: &'r mut dyn Renderer,
    transform: Affine2,
    saved: Vec<Affine2>,
}

impl<'r> Canvas<'r> {
    pub fn new(renderer: &'r mut dyn Renderer) -> Self {
        Self {
            renderer,
            transform: Affine2::IDENTITY,
            saved: Vec::new(),
        }
    }

    pub fn push(&mut self) {
        self.saved.push(self.transform);
    }

    pub fn pop(&mut self) {
        if let Some(transform) = self.saved.pop() {
            self.transform = transform;
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    pub fn scale(&mut self, factor: f32) {
        self.transform = self.transform * Affine2::from_scale(Vec2::splat(factor));
    }

    pub fn to_canvas(&self, point: Vec2) -> Vec2 {
        self.transform.transform_point2(point)
    }

    fn all_to_canvas(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|&point| self.to_canvas(point)).collect()
    }

    pub fn clear(&mut self, color: Color) {
        self.renderer.draw(DrawCommand::Clear { color });
    }

    /// Nothing is drawn for fewer than two points
    pub fn polyline(&mut self, points: &[Vec2], color: Color, width: f32, glow_layers: u8) {
        if points.len() < 2 {
            return;
        }
        let points = self.all_to_canvas(points);
        self.renderer.draw(DrawCommand::Polyline {
            points,
            color,
            width,
            glow_layers,
        });
    }

    pub fn segment(&mut self, from: Vec2, to: Vec2, color: Color, width: f32, glow_layers: u8) {
        let (from, to) = (self.to_canvas(from), self.to_canvas(to));
        self.renderer.draw(DrawCommand::Segment {
            from,
            to,
            color,
            width,
            glow_layers,
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn bezier(
        &mut self,
        from: Vec2,
        control_a: Vec2,
        control_b: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
        glow_layers: u8,
    ) {
        let [from, control_a, control_b, to] =
            [from, control_a, control_b, to].map(|point| self.to_canvas(point));
        self.renderer.draw(DrawCommand::Bezier {
            from,
            control_a,
            control_b,
            to,
            color,
            width,
            glow_layers,
        });
    }

    pub fn closed_curve(&mut self, points: &[Vec2], color: Color, width: f32, glow_layers: u8) {
        if points.len() < 3 {
            return;
        }
        let points = self.all_to_canvas(points);
        self.renderer.draw(DrawCommand::ClosedCurve {
            points,
            color,
            width,
            glow_layers,
        });
    }

    pub fn dot(&mut self, center: Vec2, color: Color, diameter: f32, glow_layers: u8) {
        let center = self.to_canvas(center);
        self.renderer.draw(DrawCommand::Dot {
            center,
            diameter,
            color,
            glow_layers,
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rounded_rect(
        &mut self,
        corner: Vec2,
        size: Vec2,
        corner_radius: f32,
        color: Color,
        width: f32,
        glow_layers: u8,
    ) {
        let corner = self.to_canvas(corner);
        self.renderer.draw(DrawCommand::RoundedRect {
            corner,
            size,
            corner_radius,
            color,
            width,
            glow_layers,
        });
    }

    /// Label with a soft halo in `color`
    pub fn glow_text(&mut self, text: &str, anchor: Vec2, color: Color, size: f32) {
        self.text(text, anchor, color, size, TextAlign::CenterLeft, true);
    }

    pub fn text(
        &mut self,
        text: &str,
        anchor: Vec2,
        color: Color,
        size: f32,
        align: TextAlign,
        glow: bool,
    ) {
        let anchor = self.to_canvas(anchor);
        self.renderer.draw(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            size,
            color,
            align,
            glow,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;

    #[test]
    fn test_transform_stack() {
        let mut recorder = RecordingRenderer::default();
        let mut canvas = Canvas::new(&mut recorder);
        canvas.translate(Vec2::new(100.0, 0.0));
        canvas.push();
        canvas.translate(Vec2::new(10.0, 20.0));
        canvas.scale(2.0);
        assert_eq!(canvas.to_canvas(Vec2::new(1.0, 1.0)), Vec2::new(112.0, 22.0));
        canvas.pop();
        assert_eq!(canvas.to_canvas(Vec2::new(1.0, 1.0)), Vec2::new(101.0, 1.0));
        // unbalanced pop keeps the current transform
        canvas.pop();
        assert_eq!(canvas.to_canvas(Vec2::ZERO), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_short_polyline_is_skipped() {
        let mut recorder = RecordingRenderer::default();
        let mut canvas = Canvas::new(&mut recorder);
        canvas.polyline(&[Vec2::ZERO], Color::gray(200), 2.0, 6);
        canvas.polyline(&[], Color::gray(200), 2.0, 6);
        canvas.polyline(&[Vec2::ZERO, Vec2::X], Color::gray(200), 2.0, 6);
        assert_eq!(recorder.commands().len(), 1);
    }

    #[test]
    fn test_dot_lands_in_canvas_space() {
        let mut recorder = RecordingRenderer::default();
        let mut canvas = Canvas::new(&mut recorder);
        canvas.translate(Vec2::new(5.0, 5.0));
        canvas.dot(Vec2::new(1.0, 2.0), Color::rgb(0, 255, 140), 7.0, 6);
        assert_eq!(
            recorder.commands()[0],
            DrawCommand::Dot {
                center: Vec2::new(6.0, 7.0),
                diameter: 7.0,
                color: Color::rgb(0, 255, 140),
                glow_layers: 6,
            }
        );
    }
}
