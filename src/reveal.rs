use std::collections::HashSet;
use std::hash::Hash;

pub const REVEAL_SELECTOR: &str = ".fade-in, .fade-up";
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -10% 0px";
pub const REVEAL_THRESHOLD: f64 = 0.15;
pub const VISIBLE_CLASS: &str = "is-visible";

/// Elements still waiting for their entrance animation.
#[derive(Debug)]
pub struct RevealSet<K> {
    pending: HashSet<K>,
}

impl<K: Eq + Hash> RevealSet<K> {
    pub fn new(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            pending: keys.into_iter().collect(),
        }
    }

    /// True exactly once per key: the first time it is seen intersecting.
    pub fn reveal(&mut self, key: &K, intersecting: bool) -> bool {
        intersecting && self.pending.remove(key)
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_key_reveals_once() {
        let mut set = RevealSet::new(0..3);

        assert!(!set.reveal(&1, false));
        assert!(set.reveal(&1, true));
        assert!(!set.reveal(&1, true));
        assert!(!set.reveal(&1, false));
        assert!(!set.reveal(&1, true));
        assert_eq!(set.remaining(), 2);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut set = RevealSet::new(["intro"]);
        assert!(!set.reveal(&"footer", true));
        assert!(set.reveal(&"intro", true));
        assert!(set.is_done());
    }
}
