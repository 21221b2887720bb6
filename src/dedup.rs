//! Duplicate filter (spec §4.7): an open-addressed hash table keeping at
//! most one [`crate::emit::Message`] per distinct `(hash, text)` pair.
//!
//! Grounded in `examples/original_source/decode_ft8.c`'s `decoded`/
//! `decoded_hashtable` arrays: a candidate's 16-bit message hash selects
//! a starting slot, and linear probing walks forward past clashes until
//! either an empty slot or a true duplicate (same hash *and* same text)
//! is found. The original bounds its table at `kMax_decoded_messages =
//! 50`; this crate uses `M = 1000` as spec.md specifies, a deliberate
//! divergence recorded in DESIGN.md.

use crate::emit::Message;

const CAPACITY: usize = 1000;

/// Open-addressed duplicate filter, capacity fixed at 1000 entries.
pub struct DedupTable {
    slots: Vec<Option<Message>>,
    len: usize,
}

impl DedupTable {
    pub fn new() -> Self {
        Self {
            slots: (0..CAPACITY).map(|_| None).collect(),
            len: 0,
        }
    }

    /// Inserts `message` if no existing entry shares both its hash and
    /// text. Returns `true` if the message was newly inserted, `false`
    /// if it was a duplicate (and therefore dropped) or the table is
    /// full.
    pub fn insert(&mut self, message: Message) -> bool {
        let start = message.hash as usize % CAPACITY;
        for probe in 0..CAPACITY {
            let idx = (start + probe) % CAPACITY;
            match &self.slots[idx] {
                None => {
                    self.slots[idx] = Some(message);
                    self.len += 1;
                    return true;
                }
                Some(existing) if existing.hash == message.hash && existing.text == message.text => {
                    return false;
                }
                Some(_) => continue,
            }
        }
        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drains the table into its surviving, deduplicated messages in hash
    /// slot order, *not* insertion order. Callers that need a stable
    /// emission order must sort by whatever key they need and tie-break
    /// on each [`Message`]'s `seq` (the decoder sorts by `freq_hz` then
    /// `seq`, per spec §4.8) rather than relying on this order.
    pub fn into_messages(self) -> Vec<Message> {
        self.slots.into_iter().flatten().collect()
    }
}

impl Default for DedupTable {
    fn default() -> Self {
        Self::new()
    }
}
