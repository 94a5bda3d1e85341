//! Stroke storage: committed history plus the single stroke being drawn.

use crate::stroke::{Stroke, StrokeId};
use crate::width::StrokeWidth;
use kurbo::Point;
use std::fmt;

/// A mutation that has just been applied to a [`StrokeStore`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreEvent {
    /// The width for the next stroke changed.
    WidthChanged(StrokeWidth),
    /// A new active stroke was created.
    StrokeBegun(StrokeId),
    /// A point was appended to the active stroke.
    StrokeExtended(StrokeId),
    /// The active stroke moved into the committed list.
    StrokeCommitted(StrokeId),
    /// The active stroke was dropped without committing.
    StrokeDiscarded(StrokeId),
    /// Committed strokes were removed.
    Cleared { removed: usize },
}

/// Callback invoked after every applied mutation (e.g. to request a repaint).
pub type ChangeHook = Box<dyn FnMut(&StoreEvent)>;

/// Owns committed strokes, the active stroke and the current pen width.
///
/// All mutation goes through the methods below. Calls that make no sense in
/// the current state (extending with no active stroke, beginning while one is
/// already active) are ignored instead of raising errors, so spurious events
/// at gesture boundaries cannot corrupt the store.
pub struct StrokeStore {
    /// Finished strokes in commit order (back to front).
    committed: Vec<Stroke>,
    /// Stroke currently being drawn.
    active: Option<Stroke>,
    /// Width applied to the next stroke created by `begin`.
    current_width: StrokeWidth,
    /// Next id to hand out. Never reset, not even by `clear`.
    next_id: u64,
    hook: Option<ChangeHook>,
}

impl Default for StrokeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StrokeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrokeStore")
            .field("committed", &self.committed)
            .field("active", &self.active)
            .field("current_width", &self.current_width)
            .field("next_id", &self.next_id)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl StrokeStore {
    /// Create an empty store using the default width.
    pub fn new() -> Self {
        Self::with_width(StrokeWidth::DEFAULT)
    }

    /// Create an empty store with a given initial width.
    pub fn with_width(width: StrokeWidth) -> Self {
        Self {
            committed: Vec::new(),
            active: None,
            current_width: width,
            next_id: 0,
            hook: None,
        }
    }

    /// Install the change hook, replacing any previous one.
    pub fn set_change_hook(&mut self, hook: impl FnMut(&StoreEvent) + 'static) {
        self.hook = Some(Box::new(hook));
    }

    /// Remove and return the change hook.
    pub fn take_change_hook(&mut self) -> Option<ChangeHook> {
        self.hook.take()
    }

    fn notify(&mut self, event: StoreEvent) {
        log::trace!("Stroke store event: {:?}", event);
        if let Some(hook) = self.hook.as_mut() {
            hook(&event);
        }
    }

    /// Set the width used by the next `begin`. Existing strokes keep theirs.
    pub fn set_width(&mut self, width: StrokeWidth) {
        self.current_width = width;
        self.notify(StoreEvent::WidthChanged(width));
    }

    /// Width the next stroke will be created with.
    pub fn current_width(&self) -> StrokeWidth {
        self.current_width
    }

    /// Start a new stroke at `point`.
    ///
    /// Returns the new stroke's id, or `None` if a stroke is already active;
    /// in that case the existing stroke is left untouched.
    pub fn begin(&mut self, point: Point) -> Option<StrokeId> {
        if let Some(active) = &self.active {
            log::debug!("Ignoring begin while stroke {} is active", active.id());
            return None;
        }

        let id = StrokeId::new(self.next_id);
        self.next_id += 1;

        let mut stroke = Stroke::new(id, self.current_width);
        stroke.push(point);
        self.active = Some(stroke);

        log::debug!("Began stroke {} (width {})", id, self.current_width);
        self.notify(StoreEvent::StrokeBegun(id));
        Some(id)
    }

    /// Append `point` to the active stroke. Returns false if nothing is active.
    pub fn extend(&mut self, point: Point) -> bool {
        let Some(stroke) = self.active.as_mut() else {
            return false;
        };
        stroke.push(point);
        let id = stroke.id();
        self.notify(StoreEvent::StrokeExtended(id));
        true
    }

    /// Move the active stroke to the end of the committed list.
    pub fn commit(&mut self) -> Option<StrokeId> {
        let stroke = self.active.take()?;
        let id = stroke.id();
        log::debug!("Committed stroke {} with {} points", id, stroke.len());
        self.committed.push(stroke);
        self.notify(StoreEvent::StrokeCommitted(id));
        Some(id)
    }

    /// Drop the active stroke without committing it.
    pub fn discard(&mut self) -> Option<Stroke> {
        let stroke = self.active.take()?;
        log::debug!("Discarded stroke {}", stroke.id());
        self.notify(StoreEvent::StrokeDiscarded(stroke.id()));
        Some(stroke)
    }

    /// Remove all committed strokes. An active stroke keeps going and will
    /// still commit normally. Returns the number of strokes removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.committed.len();
        self.committed.clear();
        log::debug!("Cleared {} committed strokes", removed);
        self.notify(StoreEvent::Cleared { removed });
        removed
    }

    /// Remove all committed strokes and discard the active one.
    /// Returns the number of committed strokes removed.
    pub fn clear_all(&mut self) -> usize {
        self.discard();
        self.clear()
    }

    /// Committed strokes in paint order.
    pub fn committed(&self) -> &[Stroke] {
        &self.committed
    }

    /// The stroke being drawn, if any.
    pub fn active(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    /// Check if a stroke is being drawn.
    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Number of committed strokes.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Check if there are no committed strokes.
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn width(w: f64) -> StrokeWidth {
        StrokeWidth::new(w).unwrap()
    }

    #[test]
    fn test_begin_records_first_point() {
        let mut store = StrokeStore::new();
        let id = store.begin(Point::new(1.0, 2.0)).unwrap();

        let active = store.active().unwrap();
        assert_eq!(active.id(), id);
        assert_eq!(active.points(), &[Point::new(1.0, 2.0)]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_unique_across_clears() {
        let mut store = StrokeStore::new();
        let mut seen = HashSet::new();

        for round in 0..5 {
            for i in 0..4 {
                let id = store.begin(Point::new(i as f64, round as f64)).unwrap();
                assert!(seen.insert(id), "id {} reused", id);
                store.commit();
            }
            store.clear();
        }
        assert_eq!(seen.len(), 20);
    }

    #[test]
    fn test_ids_unique_after_clear_all_and_discard() {
        let mut store = StrokeStore::new();
        let a = store.begin(Point::ZERO).unwrap();
        store.discard();
        let b = store.begin(Point::ZERO).unwrap();
        store.clear_all();
        let c = store.begin(Point::ZERO).unwrap();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_commit_moves_active() {
        let mut store = StrokeStore::new();
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(5.0, 5.0);

        let id = store.begin(p0).unwrap();
        store.extend(p1);
        assert_eq!(store.commit(), Some(id));

        assert!(store.active().is_none());
        let last = store.committed().last().unwrap();
        assert_eq!(last.id(), id);
        assert_eq!(last.points(), &[p0, p1]);
    }

    #[test]
    fn test_width_frozen_at_begin() {
        let mut store = StrokeStore::with_width(width(2.0));
        store.begin(Point::ZERO);
        store.set_width(width(5.0));
        store.extend(Point::new(1.0, 1.0));
        store.commit();

        assert_eq!(store.committed()[0].width(), width(2.0));
        assert_eq!(store.current_width(), width(5.0));
    }

    #[test]
    fn test_set_width_applies_to_next_stroke() {
        let mut store = StrokeStore::with_width(width(2.0));
        store.begin(Point::ZERO);
        store.commit();
        store.set_width(width(5.0));
        store.begin(Point::ZERO);
        store.commit();

        let widths: Vec<f64> = store.committed().iter().map(|s| s.width().get()).collect();
        assert_eq!(widths, vec![2.0, 5.0]);
    }

    #[test]
    fn test_extend_appends_in_call_order() {
        let mut store = StrokeStore::new();
        let samples: Vec<Point> = (0..50)
            .map(|i| Point::new((i * 7 % 13) as f64, (i * 3 % 11) as f64))
            .collect();

        store.begin(samples[0]);
        for p in &samples[1..] {
            assert!(store.extend(*p));
        }
        store.commit();

        assert_eq!(store.committed()[0].points(), samples.as_slice());
    }

    #[test]
    fn test_clear_keeps_active_drag() {
        let mut store = StrokeStore::new();
        store.begin(Point::new(-1.0, -1.0));
        store.commit();

        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(3.0, 4.0);
        store.begin(p0);
        assert_eq!(store.clear(), 1);
        store.extend(p1);
        store.commit();

        assert_eq!(store.len(), 1);
        assert_eq!(store.committed()[0].points(), &[p0, p1]);
    }

    #[test]
    fn test_clear_all_discards_active() {
        let mut store = StrokeStore::new();
        store.begin(Point::ZERO);
        store.commit();
        store.begin(Point::new(1.0, 1.0));

        assert_eq!(store.clear_all(), 1);
        assert!(store.is_empty());
        assert!(store.active().is_none());

        // The drag's remaining samples are stray and do nothing.
        assert!(!store.extend(Point::new(2.0, 2.0)));
        assert!(store.commit().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_idle_extend_and_commit_are_noops() {
        let mut store = StrokeStore::new();
        store.begin(Point::ZERO);
        store.extend(Point::new(1.0, 0.0));
        store.commit();
        let before = store.committed().to_vec();

        assert!(!store.extend(Point::new(9.0, 9.0)));
        assert!(store.commit().is_none());
        assert!(store.discard().is_none());

        assert_eq!(store.committed(), before.as_slice());
        assert!(store.active().is_none());
    }

    #[test]
    fn test_double_begin_is_ignored() {
        let mut store = StrokeStore::new();
        let id = store.begin(Point::new(0.0, 0.0)).unwrap();
        store.extend(Point::new(1.0, 0.0));

        assert!(store.begin(Point::new(50.0, 50.0)).is_none());

        let active = store.active().unwrap();
        assert_eq!(active.id(), id);
        assert_eq!(active.points(), &[Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
    }

    #[test]
    fn test_change_hook_sees_mutations() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut store = StrokeStore::new();
        store.set_change_hook(move |event| sink.borrow_mut().push(*event));

        store.set_width(width(3.0));
        let id = store.begin(Point::ZERO).unwrap();
        store.extend(Point::new(1.0, 1.0));
        store.commit();
        store.extend(Point::new(2.0, 2.0)); // idle: no event
        store.clear();

        assert_eq!(
            *events.borrow(),
            vec![
                StoreEvent::WidthChanged(width(3.0)),
                StoreEvent::StrokeBegun(id),
                StoreEvent::StrokeExtended(id),
                StoreEvent::StrokeCommitted(id),
                StoreEvent::Cleared { removed: 1 },
            ]
        );
    }

    #[test]
    fn test_change_hook_sees_discards() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut store = StrokeStore::new();
        store.set_change_hook(move |event| sink.borrow_mut().push(*event));

        let first = store.begin(Point::ZERO).unwrap();
        store.clear_all();
        let second = store.begin(Point::new(1.0, 1.0)).unwrap();
        store.clear();
        store.extend(Point::new(2.0, 2.0));
        store.commit();
        let third = store.begin(Point::new(5.0, 5.0)).unwrap();
        store.discard();
        store.discard(); // idle: no event

        assert_eq!(
            *events.borrow(),
            vec![
                StoreEvent::StrokeBegun(first),
                StoreEvent::StrokeDiscarded(first),
                StoreEvent::Cleared { removed: 0 },
                StoreEvent::StrokeBegun(second),
                StoreEvent::Cleared { removed: 0 },
                StoreEvent::StrokeExtended(second),
                StoreEvent::StrokeCommitted(second),
                StoreEvent::StrokeBegun(third),
                StoreEvent::StrokeDiscarded(third),
            ]
        );
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.committed()[0].points(),
            &[Point::new(1.0, 1.0), Point::new(2.0, 2.0)]
        );
    }

    #[test]
    fn test_take_change_hook() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        let mut store = StrokeStore::new();
        store.set_change_hook(move |_| *sink.borrow_mut() += 1);
        store.begin(Point::ZERO);
        assert!(store.take_change_hook().is_some());
        store.commit();

        assert_eq!(*count.borrow(), 1);
    }
}
