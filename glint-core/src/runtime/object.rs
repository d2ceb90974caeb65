//! Heap object definitions

use std::fmt;
use std::rc::Rc;

/// Object type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjType {
    String,
}

/// A reference to a heap object
///
/// Cloning shares the allocation. Equality is allocation identity, which for
/// strings coincides with content equality because every string is interned.
#[derive(Clone)]
pub enum Object {
    String(Rc<ObjString>),
}

impl Object {
    pub fn obj_type(&self) -> ObjType {
        match self {
            Object::String(_) => ObjType::String,
        }
    }

    pub fn as_string(&self) -> Option<&Rc<ObjString>> {
        match self {
            Object::String(s) => Some(s),
        }
    }

    /// Same allocation
    pub fn ptr_eq(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::String(a), Object::String(b)) => Rc::ptr_eq(a, b),
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::String(s) => write!(f, "String({:?})", s.as_str()),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::String(s) => f.write_str(s.as_str()),
        }
    }
}

/// Immutable string object with its hash computed once at construction
#[derive(Debug, PartialEq, Eq)]
pub struct ObjString {
    chars: Box<str>,
    hash: u32,
}

impl ObjString {
    /// Build a string object. Only the heap's interning path should call this.
    pub(crate) fn new(chars: impl Into<Box<str>>) -> Self {
        let chars = chars.into();
        let hash = hash_string(chars.as_bytes());
        Self { chars, hash }
    }

    pub fn as_str(&self) -> &str {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }
}

impl fmt::Display for ObjString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chars)
    }
}

/// 32-bit FNV-1a
pub fn hash_string(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 2_166_136_261;
    for &byte in bytes {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}
