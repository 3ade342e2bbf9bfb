//! Open-addressed integer map
//!
//! Linear probing over a power-of-two slot table, i32 keys to i32 values.
//! Used for the sparse kerning-pair table, where most of the
//! glyphCount² ordered pairs have no adjustment and are never stored.
//!
//! One value (`EMPTY`) is reserved to mark free slots. It must never be
//! stored as a key or a value; the map only checks this in debug builds.

use log::debug;

/// Reserved marker for an unused slot (i32::MAX)
pub const EMPTY: i32 = i32::MAX;

/// Slot count used by `IntegerMap::new`
const DEFAULT_CAPACITY: usize = 16;

/// Grow once more than 3/4 of the slots are taken
const LOAD_FACTOR: f32 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    key: i32,
    value: i32,
}

impl Slot {
    const VACANT: Slot = Slot {
        key: EMPTY,
        value: EMPTY,
    };

    #[inline]
    fn is_vacant(&self) -> bool {
        self.key == EMPTY
    }
}

/// Linear-probing hash map from i32 to i32
#[derive(Debug, Clone)]
pub struct IntegerMap {
    slots: Vec<Slot>,
    len: usize,
    /// Element count above which the table doubles
    resize_threshold: usize,
}

impl Default for IntegerMap {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegerMap {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a map with at least `hint` slots (rounded up to a power of two)
    pub fn with_capacity(hint: usize) -> Self {
        let capacity = hint.max(1).next_power_of_two();
        Self {
            slots: vec![Slot::VACANT; capacity],
            len: 0,
            resize_threshold: threshold_for(capacity),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slot count (always a power of two)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Insert or overwrite `key`
    pub fn put(&mut self, key: i32, value: i32) {
        debug_assert_ne!(key, EMPTY, "EMPTY is reserved and cannot be a key");
        debug_assert_ne!(value, EMPTY, "EMPTY is reserved and cannot be a value");

        if Self::place(&mut self.slots, key, value) {
            self.len += 1;
        }
        if self.len > self.resize_threshold {
            self.grow();
        }
    }

    /// Look up `key`
    pub fn get(&self, key: i32) -> Option<i32> {
        let slot = &self.slots[self.probe(key)];
        if !slot.is_vacant() && slot.key == key {
            Some(slot.value)
        } else {
            None
        }
    }

    /// Look up `key`, returning `EMPTY` when absent
    pub fn get_raw(&self, key: i32) -> i32 {
        self.get(key).unwrap_or(EMPTY)
    }

    pub fn contains_key(&self, key: i32) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key` and return its value
    ///
    /// Entries that follow the freed slot in its probe cluster are shifted
    /// back, so keys displaced past it on insertion stay reachable.
    pub fn remove(&mut self, key: i32) -> Option<i32> {
        let mask = self.mask();
        let mut hole = self.probe(key);
        let slot = self.slots[hole];
        if slot.is_vacant() || slot.key != key {
            return None;
        }
        self.slots[hole] = Slot::VACANT;
        self.len -= 1;

        let mut next = hole;
        loop {
            next = (next + 1) & mask;
            let candidate = self.slots[next];
            if candidate.is_vacant() {
                break;
            }
            // Move back only if the hole lies on the candidate's probe path
            let home = home_slot(candidate.key, mask);
            let from_home = next.wrapping_sub(home) & mask;
            let from_hole = next.wrapping_sub(hole) & mask;
            if from_home >= from_hole {
                self.slots[hole] = candidate;
                self.slots[next] = Slot::VACANT;
                hole = next;
            }
        }

        Some(slot.value)
    }

    /// Remove every entry, keeping the current capacity
    pub fn clear(&mut self) {
        self.slots.fill(Slot::VACANT);
        self.len = 0;
    }

    /// Iterate stored (key, value) pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.slots
            .iter()
            .filter(|s| !s.is_vacant())
            .map(|s| (s.key, s.value))
    }

    #[inline]
    fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    /// Slot holding `key`, or the first vacant slot on its probe path
    fn probe(&self, key: i32) -> usize {
        Self::probe_in(&self.slots, key)
    }

    fn probe_in(slots: &[Slot], key: i32) -> usize {
        let mask = slots.len() - 1;
        let mut i = home_slot(key, mask);
        loop {
            let slot = &slots[i];
            if slot.is_vacant() || slot.key == key {
                return i;
            }
            i = (i + 1) & mask;
        }
    }

    /// Write into the probed slot; true if the slot was vacant
    fn place(slots: &mut [Slot], key: i32, value: i32) -> bool {
        let i = Self::probe_in(slots, key);
        let was_vacant = slots[i].is_vacant();
        slots[i] = Slot { key, value };
        was_vacant
    }

    fn grow(&mut self) {
        let capacity = self.slots.len() << 1;
        let mut slots = vec![Slot::VACANT; capacity];
        for slot in self.slots.iter().filter(|s| !s.is_vacant()) {
            Self::place(&mut slots, slot.key, slot.value);
        }
        debug!(
            "IntegerMap resized: {} -> {} slots ({} entries)",
            self.slots.len(),
            capacity,
            self.len
        );
        self.slots = slots;
        self.resize_threshold = threshold_for(capacity);
    }
}

fn threshold_for(capacity: usize) -> usize {
    (capacity as f32 * LOAD_FACTOR) as usize
}

#[inline]
fn home_slot(key: i32, mask: usize) -> usize {
    hash(key) as usize & mask
}

/// MurmurHash3 32-bit finalizer
#[inline]
fn hash(key: i32) -> u32 {
    let mut h = key as u32;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
