//! Sketch surface: pointer gestures in, ordered draw commands out.

use crate::input::{PointerPhase, PointerSample};
use crate::store::StrokeStore;
use crate::stroke::{Stroke, StrokeId};
use crate::width::{StrokeWidth, WidthPreset};
use kurbo::Point;

/// Drag gesture state of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No pointer is held down.
    #[default]
    Idle,
    /// A drag is in progress.
    Dragging,
}

/// One polyline to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand<'a> {
    /// Stroke the polyline comes from.
    pub stroke_id: StrokeId,
    /// Vertices in sample order (always at least two).
    pub points: &'a [Point],
    /// Width to stroke the polyline with.
    pub width: StrokeWidth,
    /// True for the stroke still being drawn.
    pub live: bool,
}

impl<'a> DrawCommand<'a> {
    fn from_stroke(stroke: &'a Stroke, width: StrokeWidth, live: bool) -> Option<Self> {
        stroke.is_renderable().then(|| Self {
            stroke_id: stroke.id(),
            points: stroke.points(),
            width,
            live,
        })
    }
}

/// Backend that paints polylines, called in paint order (back to front).
pub trait StrokePainter {
    fn paint_polyline(&mut self, command: &DrawCommand<'_>);
}

/// Bridges pointer samples to a [`StrokeStore`] and renders it.
///
/// A surface tracks a single gesture: a second pointer-down during a drag is
/// ignored, and moves or releases without a preceding press are hover noise.
#[derive(Debug, Default)]
pub struct SketchSurface {
    store: StrokeStore,
    gesture: GestureState,
}

impl SketchSurface {
    /// Create a surface with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface around an existing store.
    pub fn with_store(store: StrokeStore) -> Self {
        Self {
            store,
            gesture: GestureState::Idle,
        }
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StrokeStore {
        &mut self.store
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// Process a pointer sample. Returns true if the store changed and the
    /// surface should be redrawn.
    pub fn handle_pointer(&mut self, sample: PointerSample) -> bool {
        let PointerSample { phase, position } = sample;

        match (self.gesture, phase) {
            (GestureState::Idle, PointerPhase::Down) => {
                self.gesture = GestureState::Dragging;
                self.store.begin(position).is_some()
            }
            (GestureState::Dragging, PointerPhase::Move) => self.store.extend(position),
            (GestureState::Dragging, PointerPhase::Up) => {
                self.gesture = GestureState::Idle;
                // The release position is a sample in its own right.
                let extended = self.store.extend(position);
                self.store.commit().is_some() || extended
            }
            (GestureState::Dragging, PointerPhase::Down) => {
                log::debug!("Ignoring pointer down during an active drag");
                false
            }
            (GestureState::Idle, PointerPhase::Move | PointerPhase::Up) => false,
        }
    }

    /// Clear button: remove committed strokes, leave a drag in progress alone.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Remove committed strokes and drop the stroke being drawn. The rest of
    /// the current drag, if any, is swallowed until the pointer is released.
    pub fn clear_all(&mut self) {
        self.store.clear_all();
    }

    /// Drop the stroke being drawn without committing it.
    pub fn discard_active(&mut self) -> bool {
        self.store.discard().is_some()
    }

    /// Width button: select the pen size for the next stroke.
    pub fn set_width(&mut self, preset: WidthPreset) {
        self.store.set_width(preset.width());
    }

    /// Draw list in paint order: committed strokes with their own widths,
    /// then the live stroke on top using the current width.
    pub fn draw_commands(&self) -> impl Iterator<Item = DrawCommand<'_>> + '_ {
        let committed = self
            .store
            .committed()
            .iter()
            .filter_map(|stroke| DrawCommand::from_stroke(stroke, stroke.width(), false));
        let live = self
            .store
            .active()
            .and_then(|stroke| DrawCommand::from_stroke(stroke, self.store.current_width(), true));
        committed.chain(live)
    }

    /// Paint the draw list with `painter`.
    pub fn render<P: StrokePainter + ?Sized>(&self, painter: &mut P) {
        for command in self.draw_commands() {
            painter.paint_polyline(&command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records painted polylines as owned data.
    #[derive(Default)]
    struct Recorder {
        painted: Vec<(Vec<Point>, f64, bool)>,
    }

    impl StrokePainter for Recorder {
        fn paint_polyline(&mut self, command: &DrawCommand<'_>) {
            self.painted
                .push((command.points.to_vec(), command.width.get(), command.live));
        }
    }

    fn drag(surface: &mut SketchSurface, points: &[Point]) {
        let (first, rest) = points.split_first().unwrap();
        surface.handle_pointer(PointerSample::down(*first));
        let (last, middle) = rest.split_last().unwrap();
        for p in middle {
            surface.handle_pointer(PointerSample::moved(*p));
        }
        surface.handle_pointer(PointerSample::up(*last));
    }

    #[test]
    fn test_gesture_transitions() {
        let mut surface = SketchSurface::new();
        assert_eq!(surface.gesture(), GestureState::Idle);

        assert!(surface.handle_pointer(PointerSample::down(Point::ZERO)));
        assert_eq!(surface.gesture(), GestureState::Dragging);
        assert!(surface.store().is_drawing());

        assert!(surface.handle_pointer(PointerSample::moved(Point::new(1.0, 1.0))));
        assert!(surface.handle_pointer(PointerSample::up(Point::new(2.0, 2.0))));
        assert_eq!(surface.gesture(), GestureState::Idle);
        assert!(!surface.store().is_drawing());
        assert_eq!(surface.store().len(), 1);
    }

    #[test]
    fn test_up_position_is_recorded() {
        let mut surface = SketchSurface::new();
        drag(&mut surface, &[Point::new(0.0, 0.0), Point::new(4.0, 4.0)]);

        let stroke = &surface.store().committed()[0];
        assert_eq!(stroke.points(), &[Point::new(0.0, 0.0), Point::new(4.0, 4.0)]);
    }

    #[test]
    fn test_every_move_is_forwarded() {
        let mut surface = SketchSurface::new();
        let points: Vec<Point> = (0..20).map(|i| Point::new(i as f64, 0.0)).collect();
        drag(&mut surface, &points);

        assert_eq!(surface.store().committed()[0].points(), points.as_slice());
    }

    #[test]
    fn test_hover_is_ignored() {
        let mut surface = SketchSurface::new();
        assert!(!surface.handle_pointer(PointerSample::moved(Point::new(3.0, 3.0))));
        assert!(!surface.handle_pointer(PointerSample::up(Point::new(3.0, 3.0))));

        assert!(surface.store().is_empty());
        assert!(!surface.store().is_drawing());
    }

    #[test]
    fn test_down_while_dragging_is_ignored() {
        let mut surface = SketchSurface::new();
        surface.handle_pointer(PointerSample::down(Point::ZERO));
        let id = surface.store().active().unwrap().id();

        assert!(!surface.handle_pointer(PointerSample::down(Point::new(9.0, 9.0))));
        let active = surface.store().active().unwrap();
        assert_eq!(active.id(), id);
        assert_eq!(active.points(), &[Point::ZERO]);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut surface = SketchSurface::new();
        surface.set_width(WidthPreset::Medium);

        surface.handle_pointer(PointerSample::down(Point::new(0.0, 0.0)));
        surface.handle_pointer(PointerSample::moved(Point::new(10.0, 0.0)));
        surface.handle_pointer(PointerSample::moved(Point::new(10.0, 10.0)));
        surface.handle_pointer(PointerSample::up(Point::new(10.0, 10.0)));

        let committed = surface.store().committed();
        assert_eq!(committed.len(), 1);
        assert_eq!(
            committed[0].points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(10.0, 10.0),
            ]
        );
        assert!((committed[0].width().get() - 3.0).abs() < f64::EPSILON);

        let mut recorder = Recorder::default();
        surface.render(&mut recorder);
        assert_eq!(recorder.painted.len(), 1);
        assert!((recorder.painted[0].1 - 3.0).abs() < f64::EPSILON);

        // A new drag started before the clear survives it.
        surface.handle_pointer(PointerSample::down(Point::new(20.0, 20.0)));
        surface.clear();
        assert!(surface.store().is_empty());
        assert!(surface.store().is_drawing());
    }

    #[test]
    fn test_render_order_committed_then_live() {
        let mut surface = SketchSurface::new();
        drag(&mut surface, &[Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        surface.set_width(WidthPreset::Large);
        drag(&mut surface, &[Point::new(0.0, 5.0), Point::new(1.0, 5.0)]);

        surface.handle_pointer(PointerSample::down(Point::new(0.0, 9.0)));
        surface.handle_pointer(PointerSample::moved(Point::new(1.0, 9.0)));

        let mut recorder = Recorder::default();
        surface.render(&mut recorder);

        let ys: Vec<f64> = recorder.painted.iter().map(|(pts, _, _)| pts[0].y).collect();
        assert_eq!(ys, vec![0.0, 5.0, 9.0]);
        let live: Vec<bool> = recorder.painted.iter().map(|(_, _, live)| *live).collect();
        assert_eq!(live, vec![false, false, true]);
        let widths: Vec<f64> = recorder.painted.iter().map(|(_, w, _)| *w).collect();
        assert_eq!(widths, vec![1.0, 5.0, 5.0]);
    }

    #[test]
    fn test_live_stroke_uses_current_width_until_commit() {
        let mut surface = SketchSurface::new();
        surface.set_width(WidthPreset::Small);
        surface.handle_pointer(PointerSample::down(Point::new(0.0, 0.0)));
        surface.handle_pointer(PointerSample::moved(Point::new(1.0, 1.0)));
        surface.set_width(WidthPreset::Large);

        let live = surface.draw_commands().last().unwrap();
        assert!(live.live);
        assert_eq!(live.width, WidthPreset::Large.width());

        surface.handle_pointer(PointerSample::up(Point::new(2.0, 2.0)));
        let committed = surface.draw_commands().last().unwrap();
        assert!(!committed.live);
        assert_eq!(committed.width, WidthPreset::Small.width());
    }

    #[test]
    fn test_degenerate_strokes_render_nothing() {
        let mut surface = SketchSurface::new();
        surface.handle_pointer(PointerSample::down(Point::new(1.0, 1.0)));

        let mut recorder = Recorder::default();
        surface.render(&mut recorder);
        assert!(recorder.painted.is_empty());
    }

    #[test]
    fn test_clear_all_swallows_rest_of_drag() {
        let mut surface = SketchSurface::new();
        drag(&mut surface, &[Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        surface.handle_pointer(PointerSample::down(Point::new(5.0, 5.0)));

        surface.clear_all();
        assert!(!surface.handle_pointer(PointerSample::moved(Point::new(6.0, 6.0))));
        assert!(!surface.handle_pointer(PointerSample::up(Point::new(7.0, 7.0))));

        assert!(surface.store().is_empty());
        assert_eq!(surface.gesture(), GestureState::Idle);
        assert_eq!(surface.draw_commands().count(), 0);
    }

    #[test]
    fn test_discard_active() {
        let mut surface = SketchSurface::new();
        surface.handle_pointer(PointerSample::down(Point::ZERO));
        assert!(surface.discard_active());
        assert!(!surface.discard_active());

        surface.handle_pointer(PointerSample::up(Point::new(1.0, 1.0)));
        assert!(surface.store().is_empty());
    }
}
