//! Maps winit mouse events to pointer samples for the sketch surface.

use kurbo::Point;
use medsketch_core::PointerSample;
use winit::event::{ElementState, MouseButton};

/// Tracks the cursor and the drawing button between window events.
///
/// winit reports button changes without a position, so the last cursor
/// position is remembered and attached to press/release samples.
#[derive(Debug, Clone, Default)]
pub struct EventHandler {
    /// Last cursor position in logical pixels.
    cursor: Point,
    /// Whether a press reached the canvas and has not been released yet.
    drawing: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position.
    #[cfg(test)]
    pub(crate) fn cursor_position(&self) -> Point {
        self.cursor
    }

    /// Whether a canvas drag is in progress.
    #[cfg(test)]
    pub(crate) fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Cursor moved. Returns a move sample while drawing.
    pub fn cursor_moved(&mut self, position: Point) -> Option<PointerSample> {
        self.cursor = position;
        self.drawing.then(|| PointerSample::moved(position))
    }

    /// Mouse button changed. Only the left button draws.
    ///
    /// A press over the toolbar (`over_ui`) does not start a stroke, but the
    /// release of a canvas drag is always delivered so the stroke commits
    /// even when the pointer ends up over the toolbar.
    pub fn mouse_input(
        &mut self,
        state: ElementState,
        button: MouseButton,
        over_ui: bool,
    ) -> Option<PointerSample> {
        if button != MouseButton::Left {
            return None;
        }

        match state {
            ElementState::Pressed if !over_ui && !self.drawing => {
                self.drawing = true;
                Some(PointerSample::down(self.cursor))
            }
            ElementState::Released if self.drawing => {
                self.drawing = false;
                Some(PointerSample::up(self.cursor))
            }
            _ => None,
        }
    }
}
