/// How long a copy button shows its confirmation mark, in seconds.
pub(in crate::app) const COPY_FEEDBACK_SECS: f64 = 2.0;

/// Node emphasis and detail-panel target for the current layout.
///
/// The detail panel follows the last node that was hovered or clicked. Leaving
/// a node only drops its emphasis, the panel keeps showing it.
#[derive(Debug, Default)]
pub(in crate::app) struct Selection {
    selected: Option<usize>,
    hovered: Option<usize>,
}

impl Selection {
    /// Feeds the node under the pointer this frame.
    pub(in crate::app) fn pointer_moved(&mut self, hovered: Option<usize>) {
        if hovered == self.hovered {
            return;
        }
        self.hovered = hovered;
        if let Some(index) = hovered {
            self.select(index);
        }
    }

    pub(in crate::app) fn click(&mut self, index: usize) {
        self.select(index);
    }

    pub(in crate::app) fn select(&mut self, index: usize) {
        if self.selected != Some(index) {
            tracing::debug!(node = index, "selection changed");
        }
        self.selected = Some(index);
    }

    pub(in crate::app) fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub(in crate::app) fn is_emphasized(&self, index: usize) -> bool {
        self.hovered == Some(index)
    }
}

/// Tracks which copy button was pressed last and when.
#[derive(Debug, Default)]
pub(in crate::app) struct CopyFeedback {
    last: Option<(String, f64)>,
}

impl CopyFeedback {
    pub(in crate::app) fn mark(&mut self, key: impl Into<String>, now: f64) {
        self.last = Some((key.into(), now));
    }

    pub(in crate::app) fn is_active(&self, key: &str, now: f64) -> bool {
        self.remaining(key, now).is_some()
    }

    /// Seconds left on the confirmation for `key`, if it is still showing.
    pub(in crate::app) fn remaining(&self, key: &str, now: f64) -> Option<f64> {
        let (copied, at) = self.last.as_ref()?;
        let left = COPY_FEEDBACK_SECS - (now - at);
        (copied == key && left > 0.0).then_some(left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_selects_and_leave_keeps_selection() {
        let mut selection = Selection::default();
        selection.click(2);
        selection.pointer_moved(Some(5));
        assert_eq!(selection.selected(), Some(5));
        assert!(selection.is_emphasized(5));

        selection.pointer_moved(None);
        assert_eq!(selection.selected(), Some(5));
        assert!(!selection.is_emphasized(5));
    }

    #[test]
    fn click_while_hovering_keeps_emphasis() {
        let mut selection = Selection::default();
        selection.pointer_moved(Some(1));
        selection.click(3);
        assert_eq!(selection.selected(), Some(3));
        assert!(selection.is_emphasized(1));

        // Still on node 1: no new hover event, so the click wins.
        selection.pointer_moved(Some(1));
        assert_eq!(selection.selected(), Some(3));
    }

    #[test]
    fn rehovering_after_leave_selects_again() {
        let mut selection = Selection::default();
        selection.pointer_moved(Some(0));
        selection.pointer_moved(None);
        selection.click(4);
        selection.pointer_moved(Some(0));
        assert_eq!(selection.selected(), Some(0));
    }

    #[test]
    fn copy_feedback_lasts_two_seconds_for_that_key() {
        let mut feedback = CopyFeedback::default();
        feedback.mark("main", 10.0);

        assert!(feedback.is_active("main", 10.0));
        assert!(feedback.is_active("main", 11.99));
        assert!(!feedback.is_active("main", 12.0));
        assert!(!feedback.is_active("related-1", 10.5));
        assert_eq!(feedback.remaining("main", 11.0), Some(1.0));
    }

    #[test]
    fn new_copy_replaces_previous_feedback() {
        let mut feedback = CopyFeedback::default();
        feedback.mark("a", 0.0);
        feedback.mark("b", 1.0);
        assert!(!feedback.is_active("a", 1.5));
        assert!(feedback.is_active("b", 1.5));
    }
}
