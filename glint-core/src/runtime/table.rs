//! Open-addressing hash table keyed by interned strings
//!
//! Linear probing over a power-of-two bucket array. Deleted entries become
//! tombstones so probe sequences that pass through them stay intact.

use super::object::ObjString;
use super::value::Value;
use std::rc::Rc;

/// Maximum load factor, counting tombstones
const MAX_LOAD: f64 = 0.7;
const MIN_CAPACITY: usize = 8;

#[derive(Debug, Clone, Default)]
struct Entry {
    key: Option<Rc<ObjString>>,
    value: Value,
}

impl Entry {
    /// Never-occupied slot: no key, nil value
    fn is_empty(&self) -> bool {
        self.key.is_none() && self.value.is_nil()
    }

    fn is_tombstone(&self) -> bool {
        self.key.is_none() && !self.value.is_nil()
    }

    fn tombstone() -> Self {
        Self {
            key: None,
            value: Value::Bool(true),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    entries: Vec<Entry>,
    /// Occupied slots plus tombstones
    count: usize,
    /// Occupied slots only
    live: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Size of the bucket array
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Current load, tombstones included
    pub fn load_factor(&self) -> f64 {
        if self.entries.is_empty() {
            0.0
        } else {
            self.count as f64 / self.entries.len() as f64
        }
    }

    // ==================== Operations ====================

    /// Insert or overwrite. Returns true if the key was not present before.
    pub fn insert(&mut self, key: Rc<ObjString>, value: Value) -> bool {
        if (self.count + 1) as f64 > self.entries.len() as f64 * MAX_LOAD {
            let capacity = (self.entries.len() * 2).max(MIN_CAPACITY);
            self.resize(capacity);
        }

        let idx = find_slot(&self.entries, &key);
        let entry = &mut self.entries[idx];
        let is_new = entry.key.is_none();
        if is_new {
            self.live += 1;
            // A reused tombstone is already counted
            if entry.is_empty() {
                self.count += 1;
            }
        }
        entry.key = Some(key);
        entry.value = value;
        is_new
    }

    pub fn get(&self, key: &Rc<ObjString>) -> Option<&Value> {
        if self.live == 0 {
            return None;
        }
        let entry = &self.entries[find_slot(&self.entries, key)];
        entry.key.as_ref().map(|_| &entry.value)
    }

    /// Overwrite an existing key. Returns false and leaves the table
    /// untouched when the key is absent.
    pub fn set_existing(&mut self, key: &Rc<ObjString>, value: Value) -> bool {
        if self.live == 0 {
            return false;
        }
        let idx = find_slot(&self.entries, key);
        let entry = &mut self.entries[idx];
        if entry.key.is_none() {
            return false;
        }
        entry.value = value;
        true
    }

    /// Remove a key, leaving a tombstone. Returns true if the key was present.
    pub fn delete(&mut self, key: &Rc<ObjString>) -> bool {
        if self.live == 0 {
            return false;
        }
        let idx = find_slot(&self.entries, key);
        if self.entries[idx].key.is_none() {
            return false;
        }
        self.entries[idx] = Entry::tombstone();
        self.live -= 1;
        true
    }

    /// Look a string up by content, for interning
    pub fn find_interned(&self, chars: &str, hash: u32) -> Option<Rc<ObjString>> {
        if self.live == 0 {
            return None;
        }
        let mask = self.entries.len() - 1;
        let mut index = hash as usize & mask;
        loop {
            let entry = &self.entries[index];
            match &entry.key {
                None if entry.is_empty() => return None,
                None => {}
                Some(key) if key.hash() == hash && key.as_str() == chars => {
                    return Some(key.clone());
                }
                Some(_) => {}
            }
            index = (index + 1) & mask;
        }
    }

    /// Live entries in bucket order
    pub fn iter(&self) -> impl Iterator<Item = (&Rc<ObjString>, &Value)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.key.as_ref().map(|key| (key, &entry.value)))
    }

    fn resize(&mut self, capacity: usize) {
        let old = std::mem::replace(&mut self.entries, vec![Entry::default(); capacity]);
        self.count = 0;
        self.live = 0;

        for entry in old {
            let Some(key) = entry.key else {
                continue;
            };
            let idx = find_slot(&self.entries, &key);
            self.entries[idx] = Entry {
                key: Some(key),
                value: entry.value,
            };
            self.count += 1;
            self.live += 1;
        }
    }
}

/// Slot holding `key`, or the slot an insert of `key` should use: the first
/// tombstone passed, else the empty slot that ended the probe.
///
/// The array must be non-empty and contain at least one empty slot, which the
/// load factor guarantees.
fn find_slot(entries: &[Entry], key: &Rc<ObjString>) -> usize {
    let mask = entries.len() - 1;
    let mut index = key.hash() as usize & mask;
    let mut tombstone = None;
    loop {
        let entry = &entries[index];
        match &entry.key {
            Some(existing) if Rc::ptr_eq(existing, key) => return index,
            Some(_) => {}
            None if entry.is_tombstone() => {
                tombstone.get_or_insert(index);
            }
            None => return tombstone.unwrap_or(index),
        }
        index = (index + 1) & mask;
    }
}
