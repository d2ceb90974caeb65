//! Object heap and string interning
//!
//! Every object the VM creates is registered here and lives until the heap is
//! dropped. Strings are only ever created through [`Heap::intern`] so that
//! equal contents always share one allocation.

use super::object::{hash_string, ObjString, Object};
use super::table::Table;
use super::value::Value;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Heap {
    /// All allocations, in creation order
    objects: Vec<Object>,
    /// Intern set: keys are the strings, values are unused
    strings: Table,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the interned string with these contents, allocating it on first
    /// sight.
    pub fn intern(&mut self, chars: &str) -> Rc<ObjString> {
        let hash = hash_string(chars.as_bytes());
        if let Some(existing) = self.strings.find_interned(chars, hash) {
            return existing;
        }
        self.allocate_string(ObjString::new(chars))
    }

    /// Like [`Heap::intern`], reusing the buffer when the string is new
    pub fn intern_owned(&mut self, chars: String) -> Rc<ObjString> {
        let hash = hash_string(chars.as_bytes());
        if let Some(existing) = self.strings.find_interned(&chars, hash) {
            return existing;
        }
        self.allocate_string(ObjString::new(chars))
    }

    /// Interned string wrapped as a value
    pub fn string_value(&mut self, chars: &str) -> Value {
        Value::string(self.intern(chars))
    }

    fn allocate_string(&mut self, string: ObjString) -> Rc<ObjString> {
        let string = Rc::new(string);
        self.strings.insert(string.clone(), Value::Nil);
        self.objects.push(Object::String(string.clone()));
        string
    }

    /// Number of live allocations
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// The intern set
    pub fn strings(&self) -> &Table {
        &self.strings
    }
}
