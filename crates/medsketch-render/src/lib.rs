//! MedSketch Render Library
//!
//! Renderer abstraction and implementations for MedSketch.
//! The default implementation uses Vello for GPU-accelerated rendering;
//! [`CommandRecorder`] is a headless backend that keeps the polylines it is
//! asked to paint.

mod recorder;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use recorder::{CommandRecorder, RecordedPolyline};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
