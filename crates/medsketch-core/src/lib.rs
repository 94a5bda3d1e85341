//! MedSketch Core Library
//!
//! Platform-agnostic stroke capture for the MedSketch drawing surface.
//!
//! [`StrokeStore`] owns the committed strokes and the single stroke being
//! drawn. [`SketchSurface`] turns pointer samples into store operations and
//! produces the ordered draw list a rendering backend paints.

pub mod error;
pub mod input;
pub mod store;
pub mod stroke;
pub mod surface;
pub mod width;

pub use error::{SketchError, SketchResult};
pub use input::{PointerPhase, PointerSample};
pub use store::{ChangeHook, StoreEvent, StrokeStore};
pub use stroke::{Stroke, StrokeId};
pub use surface::{DrawCommand, GestureState, SketchSurface, StrokePainter};
pub use width::{StrokeWidth, WidthPreset};
