//! Adaptive repetition queue for a single flashcard study session.
//!
//! Items are referenced by their index into a deck owned by the caller; the queue never sees card
//! content. Marking the front item as known retires it. Marking it as unknown moves it back a few
//! places so that it resurfaces after some other cards, without any timestamps or scheduling.
//!
//! # Example
//!
//! ```
//! use review_queue::{ReviewQueue, Summary};
//!
//! let mut queue = ReviewQueue::new(3);
//! queue.mark_unknown().unwrap();
//! assert_eq!(queue.pending().collect::<Vec<_>>(), vec![1, 2, 0]);
//!
//! while !queue.is_complete() {
//!     queue.mark_known().unwrap();
//! }
//! assert_eq!(queue.summary(), Summary { known: 3, unknown: 1, total: 4 });
//! ```

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// How many other items are shown before an unknown item comes back (fewer if fewer remain).
pub const REINSERT_OFFSET: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReviewQueueError {
    #[error("invalid state: no item left to review")]
    InvalidState,
}

/// The learner's verdict on the item at the front of the queue.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Known,
    Unknown,
}

/// Decision tally. `total` counts button presses, not distinct items.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    pub known: u32,
    pub unknown: u32,
    pub total: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewQueue {
    queue: VecDeque<usize>,
    known: u32,
    unknown: u32,
}

impl ReviewQueue {
    /// Queue items `0..len` in their original order. A zero-length queue is already complete.
    pub fn new(len: usize) -> Self {
        Self {
            queue: (0..len).collect(),
            known: 0,
            unknown: 0,
        }
    }

    /// The item to present next, or `None` once the session is complete.
    pub fn current(&self) -> Option<usize> {
        self.queue.front().copied()
    }

    /// Retire the front item. Returns the retired item.
    pub fn mark_known(&mut self) -> Result<usize, ReviewQueueError> {
        let item = self.queue.pop_front().ok_or(ReviewQueueError::InvalidState)?;
        self.known += 1;
        Ok(item)
    }

    /// Move the front item back by [`REINSERT_OFFSET`] places, clamped to the end of the queue.
    /// Returns the position it was reinserted at.
    pub fn mark_unknown(&mut self) -> Result<usize, ReviewQueueError> {
        let item = self.queue.pop_front().ok_or(ReviewQueueError::InvalidState)?;
        let position = REINSERT_OFFSET.min(self.queue.len());
        self.queue.insert(position, item);
        self.unknown += 1;
        log::debug!("requeued item {item} at position {position}");
        Ok(position)
    }

    pub fn record(&mut self, decision: Decision) -> Result<(), ReviewQueueError> {
        match decision {
            Decision::Known => self.mark_known().map(|_| ()),
            Decision::Unknown => self.mark_unknown().map(|_| ()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
    }

    /// Items still waiting, including requeued ones.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Decisions made so far.
    pub fn reviewed(&self) -> u32 {
        self.known + self.unknown
    }

    /// Pending items, front first.
    pub fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }

    /// Tally so far. Meant to be read once the queue is complete, but reflects partial progress
    /// before that.
    pub fn summary(&self) -> Summary {
        Summary {
            known: self.known,
            unknown: self.unknown,
            total: self.reviewed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(queue: &ReviewQueue) -> Vec<usize> {
        queue.pending().collect()
    }

    #[test]
    fn test_unknown_goes_three_back() {
        let mut queue = ReviewQueue::new(6);
        assert_eq!(queue.mark_unknown(), Ok(3));
        assert_eq!(pending(&queue), vec![1, 2, 3, 0, 4, 5]);
        assert_eq!(queue.remaining(), 6);
    }

    #[test]
    fn test_unknown_clamps_to_end() {
        let mut queue = ReviewQueue::new(2);
        assert_eq!(queue.mark_unknown(), Ok(1));
        assert_eq!(pending(&queue), vec![1, 0]);
    }

    #[test]
    fn test_empty_queue_is_complete() {
        let mut queue = ReviewQueue::new(0);
        assert!(queue.is_complete());
        assert_eq!(queue.current(), None);
        assert_eq!(queue.mark_known(), Err(ReviewQueueError::InvalidState));
        assert_eq!(queue.mark_unknown(), Err(ReviewQueueError::InvalidState));
        assert_eq!(queue.summary(), Summary::default());
    }

    #[test]
    fn test_record_dispatches() {
        let mut queue = ReviewQueue::new(2);
        queue.record(Decision::Unknown).unwrap();
        queue.record(Decision::Known).unwrap();
        assert_eq!(pending(&queue), vec![0]);
        assert_eq!(
            queue.summary(),
            Summary {
                known: 1,
                unknown: 1,
                total: 2
            }
        );
    }

    #[test]
    fn test_decision_wire_format() {
        assert_eq!(
            serde_json::to_string(&Decision::Unknown).unwrap(),
            "\"unknown\""
        );
        let decision: Decision = serde_json::from_str("\"known\"").unwrap();
        assert_eq!(decision, Decision::Known);
    }
}
