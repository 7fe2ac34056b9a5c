//! Striped locks serializing read-modify-write sequences per (learner, word).

use parking_lot::{Mutex, MutexGuard};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const STRIPES: usize = 64;

pub struct KeyLocks {
    stripes: Vec<Mutex<()>>,
}

impl Default for KeyLocks {
    fn default() -> Self {
        Self::with_stripes(STRIPES)
    }
}

impl KeyLocks {
    pub fn with_stripes(count: usize) -> Self {
        Self {
            stripes: (0..count.max(1)).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Blocks until no other holder of the same key's stripe remains.
    /// Different keys may share a stripe; that only costs parallelism.
    pub fn lock(&self, learner_id: i64, word: &str) -> MutexGuard<'_, ()> {
        self.stripes[self.stripe(learner_id, word)].lock()
    }

    fn stripe(&self, learner_id: i64, word: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        (learner_id, word).hash(&mut hasher);
        (hasher.finish() % self.stripes.len() as u64) as usize
    }
}
