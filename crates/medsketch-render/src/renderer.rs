//! Renderer trait abstraction.

use kurbo::{Affine, Rect, Size};
use medsketch_core::SketchSurface;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The surface whose strokes are painted.
    pub surface: &'a SketchSurface,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI). Stroke points are in logical pixels.
    pub scale_factor: f64,
    /// Canvas background color.
    pub background_color: Color,
    /// Pen color shared by all strokes.
    pub stroke_color: Color,
    /// Canvas frame color, `None` for no frame.
    pub border_color: Option<Color>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(surface: &'a SketchSurface, viewport_size: Size) -> Self {
        Self {
            surface,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::WHITE,
            stroke_color: Color::from_rgba8(255, 0, 0, 255),
            border_color: Some(Color::BLACK),
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the pen color.
    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    /// Set the frame color.
    pub fn with_border(mut self, color: Option<Color>) -> Self {
        self.border_color = color;
        self
    }

    /// Transform from logical surface coordinates to physical pixels.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor)
    }

    /// The viewport in logical coordinates.
    pub fn logical_viewport(&self) -> Rect {
        let scale = if self.scale_factor > 0.0 { self.scale_factor } else { 1.0 };
        Rect::new(
            0.0,
            0.0,
            self.viewport_size.width / scale,
            self.viewport_size.height / scale,
        )
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, wgpu directly, or other rendering engines.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    ///
    /// Called once per redraw; committed strokes must be painted before the
    /// live stroke.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
