//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer};
use kurbo::{Affine, Cap, Join, Stroke};
use medsketch_core::stroke::polyline_path;
use medsketch_core::{DrawCommand, StrokePainter};
use peniko::Color;
use vello::Scene;

/// Width of the canvas frame in logical pixels.
const BORDER_WIDTH: f64 = 1.0;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Pen color for the frame being built.
    stroke_color: Color,
    /// Logical to physical transform for the frame being built.
    transform: Affine,
    /// Polylines painted into the current scene.
    polylines: usize,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            stroke_color: Color::from_rgba8(255, 0, 0, 255),
            transform: Affine::IDENTITY,
            polylines: 0,
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Stroke the canvas frame just inside the viewport edge.
    fn render_border(&mut self, ctx: &RenderContext, color: Color) {
        let frame = ctx.logical_viewport().inset(-BORDER_WIDTH / 2.0);
        if frame.width() <= 0.0 || frame.height() <= 0.0 {
            return;
        }
        self.scene
            .stroke(&Stroke::new(BORDER_WIDTH), self.transform, color, None, &frame);
    }
}

impl StrokePainter for VelloRenderer {
    fn paint_polyline(&mut self, command: &DrawCommand<'_>) {
        let path = polyline_path(command.points);
        let stroke = Stroke::new(command.width.get())
            .with_caps(Cap::Round)
            .with_join(Join::Round);
        self.scene
            .stroke(&stroke, self.transform, self.stroke_color, None, &path);
        self.polylines += 1;
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        // Clear the scene
        self.scene.reset();
        self.polylines = 0;
        self.stroke_color = ctx.stroke_color;
        self.transform = ctx.transform();

        // Frame goes underneath the ink.
        if let Some(border) = ctx.border_color {
            self.render_border(ctx, border);
        }

        ctx.surface.render(self);
        log::trace!("Built scene with {} polylines", self.polylines);
    }
}
