use crate::names::*;
use serde::{Deserialize, Serialize};

/// Size of a reference-typed slot in bytes
pub const POINTER_SIZE: usize = 8;

/// Semantic type of a field, a parameter or a return value
#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
pub enum Ty {
    /// Only meaningful as a return type
    Unit,
    Bool,
    Byte,
    Short,
    Char,
    Int,
    Float,
    Long,
    Double,
    /// Strings are heap objects; the slot holds a pointer
    Str,
    /// Reference to an instance of the class or one of its subclasses
    Ref(ClassName),
}

impl std::fmt::Display for Ty {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ty::Ref(name) => write!(f, "{}", name),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Ty {
    /// Shortcut for `Ty::Ref`
    pub fn class(s: impl Into<String>) -> Ty {
        Ty::Ref(class_name(s))
    }

    /// Byte size of a slot holding a value of this type
    pub fn size(&self) -> usize {
        match self {
            Ty::Unit => 0,
            Ty::Bool | Ty::Byte => 1,
            Ty::Short | Ty::Char => 2,
            Ty::Int | Ty::Float => 4,
            Ty::Long | Ty::Double => 8,
            Ty::Str | Ty::Ref(_) => POINTER_SIZE,
        }
    }

    /// Alignment of the slot. Slots are aligned to their own size.
    pub fn align(&self) -> usize {
        self.size().max(1)
    }

    /// Returns true if values of this type are held by reference
    pub fn is_reference(&self) -> bool {
        matches!(self, Ty::Str | Ty::Ref(_))
    }
}

/// Round `offset` up to a multiple of `align`
pub fn align_up(offset: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    (offset + align - 1) & !(align - 1)
}
