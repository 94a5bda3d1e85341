//! Pointer samples delivered by the host window system.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Phase of a pointer sample within a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// One reported pointer position, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub phase: PointerPhase,
    pub position: Point,
}

impl PointerSample {
    pub fn new(phase: PointerPhase, position: Point) -> Self {
        Self { phase, position }
    }

    /// Pointer pressed at `position`.
    pub fn down(position: Point) -> Self {
        Self::new(PointerPhase::Down, position)
    }

    /// Pointer moved to `position`.
    pub fn moved(position: Point) -> Self {
        Self::new(PointerPhase::Move, position)
    }

    /// Pointer released at `position`.
    pub fn up(position: Point) -> Self {
        Self::new(PointerPhase::Up, position)
    }
}
