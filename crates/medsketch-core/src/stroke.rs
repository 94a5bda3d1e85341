//! Stroke data: one continuous freehand line from pointer-down to pointer-up.

use crate::width::StrokeWidth;
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique stroke identifier, assigned by the store in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeId(u64);

impl StrokeId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A freehand stroke (ordered pointer samples plus a fixed width).
///
/// Only the owning [`StrokeStore`](crate::StrokeStore) can append points, and
/// only while the stroke is active. Width and id never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Point>,
    width: StrokeWidth,
}

impl Stroke {
    pub(crate) fn new(id: StrokeId, width: StrokeWidth) -> Self {
        Self {
            id,
            points: Vec::new(),
            width,
        }
    }

    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Points in the order they were sampled.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Width frozen at creation.
    pub fn width(&self) -> StrokeWidth {
        self.width
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A polyline needs at least two vertices to paint anything.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// Build a connected polyline through `points`. Empty for no points.
pub fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };

    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }
    path
}
