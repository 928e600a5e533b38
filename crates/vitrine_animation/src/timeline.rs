//! Timeline orchestration for staggered mutations
//!
//! A timeline is a sorted list of `(offset, action)` entries played against a
//! single clock. Actions come out in offset order (ties in insertion order),
//! and any entry that has not played yet can be cancelled.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TimelineEntryId;
}

/// An entry in a timeline
struct TimelineEntry<A> {
    /// Offset in milliseconds from timeline start
    offset_ms: u64,
    action: A,
}

/// A timeline of deferred actions
pub struct Timeline<A> {
    entries: SlotMap<TimelineEntryId, TimelineEntry<A>>,
    /// Entry ids sorted by (offset, insertion order)
    order: Vec<TimelineEntryId>,
    /// Playhead position in milliseconds
    current_time: u64,
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
            current_time: 0,
        }
    }

    /// Add an action at the given offset
    pub fn add(&mut self, offset_ms: u64, action: A) -> TimelineEntryId {
        let id = self.entries.insert(TimelineEntry { offset_ms, action });
        // Insert after every entry with an offset <= ours to keep ties stable
        let entries = &self.entries;
        let index = self
            .order
            .partition_point(|existing| entries[*existing].offset_ms <= offset_ms);
        self.order.insert(index, id);
        id
    }

    /// Add actions at `base_ms + index * step_ms`
    pub fn stagger(
        &mut self,
        base_ms: u64,
        step_ms: u64,
        actions: impl IntoIterator<Item = A>,
    ) -> Vec<TimelineEntryId> {
        actions
            .into_iter()
            .enumerate()
            .map(|(index, action)| self.add(base_ms + index as u64 * step_ms, action))
            .collect()
    }

    /// Remove an entry that has not played yet
    pub fn cancel(&mut self, id: TimelineEntryId) -> Option<A> {
        let entry = self.entries.remove(id)?;
        self.order.retain(|existing| *existing != id);
        Some(entry.action)
    }

    pub fn current_time(&self) -> u64 {
        self.current_time
    }

    /// Offset of the next entry to play
    pub fn next_offset(&self) -> Option<u64> {
        self.order.first().map(|id| self.entries[*id].offset_ms)
    }

    /// Offset of the last entry
    pub fn duration_ms(&self) -> u64 {
        self.order
            .last()
            .map(|id| self.entries[*id].offset_ms)
            .unwrap_or(0)
    }

    /// Move the playhead to `time_ms`, returning every action whose offset
    /// has been reached, in order.
    pub fn advance_to(&mut self, time_ms: u64) -> Vec<A> {
        self.current_time = self.current_time.max(time_ms);
        let due = self
            .order
            .partition_point(|id| self.entries[*id].offset_ms <= self.current_time);

        let played: Vec<_> = self.order.drain(..due).collect();
        played
            .into_iter()
            .filter_map(|id| self.entries.remove(id))
            .map(|entry| entry.action)
            .collect()
    }

    /// Advance the playhead by `dt_ms`
    pub fn tick(&mut self, dt_ms: u64) -> Vec<A> {
        self.advance_to(self.current_time + dt_ms)
    }

    /// True once every entry has played or been cancelled
    pub fn is_finished(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of entries still to play
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger_offsets() {
        let mut timeline = Timeline::new();
        timeline.stagger(500, 200, ["a", "b", "c"]);

        assert_eq!(timeline.next_offset(), Some(500));
        assert_eq!(timeline.duration_ms(), 900);
        assert_eq!(timeline.advance_to(499), Vec::<&str>::new());
        assert_eq!(timeline.advance_to(700), vec!["a", "b"]);
        assert_eq!(timeline.tick(200), vec!["c"]);
        assert!(timeline.is_finished());
    }

    #[test]
    fn test_out_of_order_insertion_plays_sorted() {
        let mut timeline = Timeline::new();
        timeline.add(300, 3);
        timeline.add(100, 1);
        timeline.add(200, 2);
        timeline.add(100, 10);

        assert_eq!(timeline.advance_to(1000), vec![1, 10, 2, 3]);
    }

    #[test]
    fn test_cancel_pending_entry() {
        let mut timeline = Timeline::new();
        let ids = timeline.stagger(0, 50, ["x", "y", "z"]);

        assert_eq!(timeline.advance_to(0), vec!["x"]);
        assert_eq!(timeline.cancel(ids[0]), None);
        assert_eq!(timeline.cancel(ids[1]), Some("y"));
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.advance_to(500), vec!["z"]);
    }
}
