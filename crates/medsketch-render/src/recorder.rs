//! Headless renderer that records draw commands instead of painting them.

use crate::renderer::{RenderContext, Renderer};
use kurbo::Point;
use medsketch_core::{DrawCommand, StrokeId, StrokePainter};

/// A polyline captured by [`CommandRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPolyline {
    pub stroke_id: StrokeId,
    pub points: Vec<Point>,
    pub width: f64,
    pub live: bool,
}

/// Records the frame's polylines in paint order. Useful for inspecting what
/// a frame would draw without a GPU.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    frame: Vec<RecordedPolyline>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polylines of the last built frame, back to front.
    pub fn frame(&self) -> &[RecordedPolyline] {
        &self.frame
    }
}

impl StrokePainter for CommandRecorder {
    fn paint_polyline(&mut self, command: &DrawCommand<'_>) {
        self.frame.push(RecordedPolyline {
            stroke_id: command.stroke_id,
            points: command.points.to_vec(),
            width: command.width.get(),
            live: command.live,
        });
    }
}

impl Renderer for CommandRecorder {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.frame.clear();
        ctx.surface.render(self);
        log::trace!("Recorded {} polylines", self.frame.len());
    }
}
