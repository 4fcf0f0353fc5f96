//! GuardedSequence: ordered collection shared by producers and consumers
//!
//! Every operation holds the single lock for its full duration, so an append
//! or remove is never observed half-done. `snapshot()` clones the contents
//! under the lock and hands back an owned `Vec`; the caller iterates it
//! without holding anything, and must tolerate that the live sequence may
//! have changed since.
//!
//! ## Consumer protocol
//!
//! Consumers claim items with snapshot-then-remove:
//!
//! ```text
//! loop:
//!   items = seq.snapshot()
//!   pick a wanted item from items
//!   if seq.remove(&item) -> true   (won the race) record it, rescan
//!   if nothing wanted is present   sleep(poll_interval), rescan
//! ```
//!
//! `remove` returning `false` is the normal signal that another consumer got
//! there first; it is not an error.

use parking_lot::Mutex;
use std::collections::VecDeque;

/// Lock-protected ordered sequence, duplicates allowed
#[derive(Debug)]
pub struct GuardedSequence<T = String> {
    items: Mutex<VecDeque<T>>,
}

impl<T> GuardedSequence<T> {
    /// Create an empty sequence
    pub fn new() -> Self {
        GuardedSequence {
            items: Mutex::new(VecDeque::new()),
        }
    }

    /// Add `item` at the end
    pub fn append(&self, item: T) {
        self.items.lock().push_back(item);
    }

    /// Number of items at this instant
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// True if the sequence is empty at this instant
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl<T: PartialEq> GuardedSequence<T> {
    /// Remove the first occurrence of `item`
    ///
    /// Returns whether anything was removed.
    pub fn remove(&self, item: &T) -> bool {
        let mut items = self.items.lock();
        match items.iter().position(|candidate| candidate == item) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<T: Clone> GuardedSequence<T> {
    /// Independent copy of the current contents, in order
    pub fn snapshot(&self) -> Vec<T> {
        self.items.lock().iter().cloned().collect()
    }
}

impl<T> Default for GuardedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for GuardedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        GuardedSequence {
            items: Mutex::new(iter.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let seq = GuardedSequence::new();
        seq.append("a".to_string());
        seq.append("b".to_string());
        seq.append("c".to_string());
        assert_eq!(seq.snapshot(), vec!["a", "b", "c"]);
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_remove_first_occurrence_only() {
        let seq: GuardedSequence<&str> = ["x", "y", "x"].into_iter().collect();
        assert!(seq.remove(&"x"));
        assert_eq!(seq.snapshot(), vec!["y", "x"]);
    }

    #[test]
    fn test_remove_absent_returns_false() {
        let seq: GuardedSequence<String> = GuardedSequence::new();
        assert!(!seq.remove(&"missing".to_string()));
        assert!(seq.is_empty());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let seq: GuardedSequence<i32> = [1, 2].into_iter().collect();
        let before = seq.snapshot();
        seq.append(3);
        assert!(seq.remove(&1));
        assert_eq!(before, vec![1, 2]);
        assert_eq!(seq.snapshot(), vec![2, 3]);
    }
}
