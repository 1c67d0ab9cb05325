use crate::bodies::MethodBodies;
use crate::heap::{Heap, ObjRef};
use crate::value::Value;
use anyhow::Result;
use std::sync::Arc;
use vela_core::error;
use vela_core::names::*;
use vela_core::ty::Ty;
use vela_hierarchy::{Hierarchy, VTable};

/// Creates instances of the classes of a hierarchy and invokes their
/// methods. Can be shared among threads; each instance serializes the
/// accesses to its own fields.
#[derive(Debug)]
pub struct Runtime {
    pub(crate) hierarchy: Arc<Hierarchy>,
    pub(crate) bodies: MethodBodies,
    pub(crate) heap: Heap,
}

impl Runtime {
    pub fn new(hierarchy: Arc<Hierarchy>, bodies: MethodBodies) -> Runtime {
        Runtime {
            hierarchy,
            bodies,
            heap: Default::default(),
        }
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// The class the object was created as
    pub fn class_of(&self, obj: ObjRef) -> Result<ClassName> {
        Ok(self.heap.get(obj)?.class_name().clone())
    }

    /// The vtable the object points to
    pub fn vtable_of(&self, obj: ObjRef) -> Result<Arc<VTable>> {
        Ok(self.heap.get(obj)?.vtable().clone())
    }

    /// Release the object
    pub fn release(&self, obj: ObjRef) -> Result<()> {
        log::debug!("released {}", obj);
        self.heap.free(obj)
    }

    /// Returns true if `value` can be stored where `ty` is expected
    pub fn conforms(&self, value: &Value, ty: &Ty) -> Result<bool> {
        let b = match (value, ty) {
            (Value::Obj(obj), Ty::Ref(class)) => {
                let dynamic = self.class_of(*obj)?;
                self.hierarchy.is_subtype(&dynamic, class)
            }
            (Value::Unit, Ty::Unit)
            | (Value::Null, Ty::Str | Ty::Ref(_))
            | (Value::Bool(_), Ty::Bool)
            | (Value::Byte(_), Ty::Byte)
            | (Value::Short(_), Ty::Short)
            | (Value::Char(_), Ty::Char)
            | (Value::Int(_), Ty::Int)
            | (Value::Float(_), Ty::Float)
            | (Value::Long(_), Ty::Long)
            | (Value::Double(_), Ty::Double)
            | (Value::Str(_), Ty::Str) => true,
            _ => false,
        };
        Ok(b)
    }

    pub(crate) fn check_value(&self, target: &str, value: &Value, ty: &Ty) -> Result<()> {
        if self.conforms(value, ty)? {
            Ok(())
        } else {
            Err(error::type_mismatch(target, ty, self.describe(value)))
        }
    }

    /// Check number and types of the arguments
    pub(crate) fn check_args(&self, target: &str, params: &[Ty], args: &[Value]) -> Result<()> {
        if params.len() != args.len() {
            return Err(error::arity_error(target, params.len(), args.len()));
        }
        for (i, (ty, arg)) in params.iter().zip(args).enumerate() {
            self.check_value(&format!("argument #{} of {}", i + 1, target), arg, ty)?;
        }
        Ok(())
    }

    /// Fail unless the object is an instance of `class` or its subclass
    pub(crate) fn check_instance_of(&self, obj: ObjRef, class: &ClassName) -> Result<()> {
        let dynamic = self.class_of(obj)?;
        if self.hierarchy.is_subtype(&dynamic, class) {
            Ok(())
        } else {
            Err(error::subtype_error(&dynamic, class))
        }
    }

    fn describe(&self, value: &Value) -> String {
        match value {
            Value::Obj(obj) => match self.class_of(*obj) {
                Ok(class) => format!("an instance of {}", class),
                Err(_) => format!("a released object {}", obj),
            },
            _ => format!("`{}'", value),
        }
    }
}
