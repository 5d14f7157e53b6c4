//! Per-row submission guard for approve/reject actions.
//!
//! While a decision for a request id is in flight, that row's controls are
//! disabled; other rows stay interactive. The id is inserted when the job is
//! spawned and removed at the single job-completion point in the poll loop,
//! so success and failure share one cleanup path.

use std::collections::HashSet;

/// An owned set of request ids with an in-flight action.
#[derive(Debug, Default)]
pub struct InFlightSet {
    ids: HashSet<String>,
}

impl InFlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` busy. Returns `false` if an action for this id is already
    /// in flight, in which case the caller must not spawn another request.
    pub fn begin(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    /// Release `id` once its job has completed, successfully or not.
    pub fn finish(&mut self, id: &str) {
        if !self.ids.remove(id) {
            tracing::debug!(id, "finish called for an id that was not in flight");
        }
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop all busy markers (used when the view is torn down, e.g. on
    /// logout or environment switch).
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_marks_id_busy() {
        let mut set = InFlightSet::new();
        assert!(set.begin("W1"));
        assert!(set.is_busy("W1"));
        assert!(!set.is_busy("W2"));
    }

    #[test]
    fn test_second_begin_for_same_id_is_refused() {
        // Double-click on a row's approve button: at most one in-flight
        // request for that id.
        let mut set = InFlightSet::new();
        assert!(set.begin("W1"));
        assert!(!set.begin("W1"));
    }

    #[test]
    fn test_other_ids_stay_available() {
        let mut set = InFlightSet::new();
        assert!(set.begin("W1"));
        assert!(set.begin("W2"));
        assert!(set.is_busy("W1"));
        assert!(set.is_busy("W2"));
    }

    #[test]
    fn test_finish_releases_the_id() {
        let mut set = InFlightSet::new();
        set.begin("W1");
        set.finish("W1");
        assert!(!set.is_busy("W1"));
        // The row is usable again after completion.
        assert!(set.begin("W1"));
    }

    #[test]
    fn test_finish_unknown_id_is_harmless() {
        let mut set = InFlightSet::new();
        set.finish("ghost");
        assert!(set.is_empty());
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut set = InFlightSet::new();
        set.begin("a");
        set.begin("b");
        set.clear();
        assert!(set.is_empty());
    }
}
