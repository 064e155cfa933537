//! One-shot viewport visibility observation
//!
//! An element "enters view" the first time its bounding box intersects the
//! viewport. The latch is monotonic: once entered, the observer never fires
//! again, so scrolling the element out and back does not retrigger anything
//! downstream.

use countup_core::geometry::Rect;

/// Reports a one-shot "became visible" event for a bounding region
pub trait VisibilityObserver {
    /// Feed the current viewport. Returns true exactly once, the first
    /// time the observed bounds intersect it.
    fn observe(&mut self, viewport: Rect) -> bool;

    /// Whether the element has ever been visible
    fn has_entered(&self) -> bool;
}

/// Viewport intersection observer with "once" semantics
#[derive(Clone, Debug)]
pub struct InView {
    bounds: Rect,
    last_viewport: Option<Rect>,
    entered: bool,
}

impl InView {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            last_viewport: None,
            entered: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Update the element bounds (layout may move the element before it is
    /// ever seen). Re-checks against the last seen viewport; returns true
    /// if the move brought the element into view for the first time.
    pub fn set_bounds(&mut self, bounds: Rect) -> bool {
        self.bounds = bounds;
        match self.last_viewport {
            Some(viewport) if !self.entered => self.check(viewport),
            _ => false,
        }
    }

    fn check(&mut self, viewport: Rect) -> bool {
        if self.bounds.intersects(&viewport) {
            self.entered = true;
            tracing::debug!(
                "element at ({:.0}, {:.0}) entered viewport",
                self.bounds.x(),
                self.bounds.y()
            );
            true
        } else {
            false
        }
    }
}

impl VisibilityObserver for InView {
    fn observe(&mut self, viewport: Rect) -> bool {
        self.last_viewport = Some(viewport);
        if self.entered {
            return false;
        }
        self.check(viewport)
    }

    fn has_entered(&self) -> bool {
        self.entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_on_first_intersection() {
        let mut observer = InView::new(Rect::new(0.0, 1400.0, 200.0, 80.0));
        let above = Rect::new(0.0, 0.0, 1280.0, 720.0);
        let at = Rect::new(0.0, 1000.0, 1280.0, 720.0);

        assert!(!observer.observe(above));
        assert!(!observer.has_entered());

        assert!(observer.observe(at));
        assert!(observer.has_entered());

        // Same viewport again: latched
        assert!(!observer.observe(at));
    }

    #[test]
    fn test_scrolling_away_and_back_does_not_refire() {
        let mut observer = InView::new(Rect::new(0.0, 1400.0, 200.0, 80.0));
        let away = Rect::new(0.0, 0.0, 1280.0, 720.0);
        let at = Rect::new(0.0, 1100.0, 1280.0, 720.0);

        assert!(observer.observe(at));
        assert!(!observer.observe(away));
        assert!(!observer.observe(at));
        assert!(observer.has_entered());
    }

    #[test]
    fn test_layout_move_into_cached_viewport_fires() {
        let mut observer = InView::new(Rect::new(0.0, 5000.0, 200.0, 80.0));
        let viewport = Rect::new(0.0, 0.0, 1280.0, 720.0);

        assert!(!observer.observe(viewport));

        // Layout moves the element into the already-seen viewport
        assert!(observer.set_bounds(Rect::new(0.0, 300.0, 200.0, 80.0)));
        assert!(observer.has_entered());

        // Later moves never refire
        assert!(!observer.set_bounds(Rect::new(0.0, 400.0, 200.0, 80.0)));
    }

    #[test]
    fn test_set_bounds_before_any_viewport() {
        let mut observer = InView::new(Rect::ZERO);

        // No viewport seen yet: moving the element cannot fire
        assert!(!observer.set_bounds(Rect::new(0.0, 100.0, 50.0, 50.0)));
        assert!(!observer.has_entered());
    }
}
