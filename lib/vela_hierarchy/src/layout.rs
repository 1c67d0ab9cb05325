use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use vela_core::error;
use vela_core::names::*;
use vela_core::ty::{align_up, Ty};
use vela_decl::{ClassDecl, Visibility};

/// A field of an instance
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FieldSlot {
    pub name: FieldName,
    /// The class which declares this field
    pub declared_in: ClassName,
    pub ty: Ty,
    pub size: usize,
    /// Byte offset from the beginning of the instance
    pub offset: usize,
    pub mutable: bool,
    pub visibility: Visibility,
}

impl FieldSlot {
    /// Offset of the byte next to this slot
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// Memory layout of the instances of a class.
/// The layout of the superclass is always a prefix of this.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub class_name: ClassName,
    slots: Vec<FieldSlot>,
    /// Number of slots inherited from the superclass
    n_inherited: usize,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self
            .slots
            .iter()
            .map(|s| format!("{}@{}", s.name, s.offset))
            .collect::<Vec<_>>();
        write!(f, "[{}]", slots.join(", "))
    }
}

impl Layout {
    /// Layout without any fields (the one of `AnyRef`)
    pub fn empty(class_name: ClassName) -> Layout {
        Layout {
            class_name,
            slots: vec![],
            n_inherited: 0,
        }
    }

    /// Build the layout of a class by appending its own fields to the
    /// layout of the superclass
    pub fn build(super_layout: &Layout, decl: &ClassDecl) -> Result<Layout> {
        let mut seen = HashSet::new();
        for field in &decl.fields {
            if !seen.insert(&field.name) {
                return Err(error::duplicate_field(&decl.name, &field.name));
            }
            // Unit is a return type only; a slot must occupy at least one byte
            if field.ty == Ty::Unit {
                return Err(error::invalid_field_type(&decl.name, &field.name, &field.ty));
            }
        }

        let mut layout = super_layout.clone();
        layout.class_name = decl.name.clone();
        layout.n_inherited = super_layout.len();
        for field in &decl.fields {
            let offset = align_up(layout.size(), field.ty.align());
            layout.slots.push(FieldSlot {
                name: field.name.clone(),
                declared_in: decl.name.clone(),
                ty: field.ty.clone(),
                size: field.ty.size(),
                offset,
                mutable: field.mutable,
                visibility: field.visibility,
            });
        }
        Ok(layout)
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Byte size of an instance (without padding at the end)
    pub fn size(&self) -> usize {
        self.slots.last().map(|s| s.end()).unwrap_or(0)
    }

    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    pub fn slot(&self, idx: usize) -> Option<&FieldSlot> {
        self.slots.get(idx)
    }

    /// Slots inherited from the superclass
    pub fn inherited_slots(&self) -> &[FieldSlot] {
        &self.slots[..self.n_inherited]
    }

    /// Slots added by this class
    pub fn own_slots(&self) -> &[FieldSlot] {
        &self.slots[self.n_inherited..]
    }

    /// Find the slot seen by the name from this class. When a field is
    /// shadowed, the one declared in the most specific class is returned.
    pub fn find(&self, name: &FieldName) -> Option<(usize, &FieldSlot)> {
        self.slots
            .iter()
            .enumerate()
            .rev()
            .find(|(_, s)| &s.name == name)
    }

    /// Returns true if `self` begins with the slots of `other`
    pub fn has_prefix(&self, other: &Layout) -> bool {
        self.slots.len() >= other.slots.len() && self.slots[..other.slots.len()] == other.slots[..]
    }
}

/// Compute the layout of `decl` on top of the layout of its superclass
pub fn build_layout(decl: &ClassDecl, super_layout: &Layout) -> Result<Layout> {
    Layout::build(super_layout, decl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_core::error::Error;
    use vela_decl::{FieldDecl, FieldInit, Literal};

    fn point() -> ClassDecl {
        ClassDecl::new("Point")
            .param("x", Ty::Int)
            .param("y", Ty::Int)
            .field(FieldDecl::param("x", Ty::Int))
            .field(FieldDecl::param("y", Ty::Int))
    }

    #[test]
    fn test_bump_allocation() -> Result<()> {
        let root = Layout::empty(ClassName::root());
        let layout = build_layout(&point(), &root)?;
        assert_eq!(layout.to_string(), "[x@0, y@4]");
        assert_eq!(layout.size(), 8);
        assert_eq!(layout.own_slots().len(), 2);
        Ok(())
    }

    #[test]
    fn test_natural_alignment() -> Result<()> {
        let root = Layout::empty(ClassName::root());
        let decl = ClassDecl::new("Mixed")
            .field(FieldDecl::new("flag", Ty::Bool, FieldInit::Const(Literal::Bool(true))))
            .field(FieldDecl::new("count", Ty::Int, FieldInit::Const(Literal::Int(0))))
            .field(FieldDecl::new("tag", Ty::Char, FieldInit::Const(Literal::Char('a'))))
            .field(FieldDecl::new("next", Ty::class("Mixed"), FieldInit::Const(Literal::Null)));
        let layout = build_layout(&decl, &root)?;
        assert_eq!(layout.to_string(), "[flag@0, count@4, tag@8, next@16]");
        assert_eq!(layout.size(), 24);
        Ok(())
    }

    #[test]
    fn test_prefix_and_shadowing() -> Result<()> {
        let root = Layout::empty(ClassName::root());
        let base = build_layout(&point(), &root)?;
        let decl = ClassDecl::new("Point3")
            .extends("Point", vec![])
            .param("x", Ty::Long)
            .field(FieldDecl::param("x", Ty::Long));
        let layout = build_layout(&decl, &base)?;
        assert!(layout.has_prefix(&base));
        assert_eq!(layout.to_string(), "[x@0, y@4, x@8]");

        let (idx, slot) = layout.find(&field_name("x")).unwrap();
        assert_eq!(idx, 2);
        assert_eq!(slot.declared_in, class_name("Point3"));
        let (idx, slot) = base.find(&field_name("x")).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(slot.declared_in, class_name("Point"));
        Ok(())
    }

    #[test]
    fn test_duplicate_field() {
        let root = Layout::empty(ClassName::root());
        let decl = point().field(FieldDecl::param("x", Ty::Int));
        let err = build_layout(&decl, &root).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::DuplicateFieldError { .. })
        ));
    }

    #[test]
    fn test_unit_field() {
        let root = Layout::empty(ClassName::root());
        let decl = ClassDecl::new("Empty")
            .field(FieldDecl::new("u", Ty::Unit, FieldInit::Const(Literal::Unit)))
            .field(FieldDecl::new("x", Ty::Int, FieldInit::Const(Literal::Int(0))));
        let err = build_layout(&decl, &root).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidFieldTypeError { ty: Ty::Unit, .. })
        ));
    }
}
