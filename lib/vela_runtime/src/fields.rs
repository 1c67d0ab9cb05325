use crate::heap::ObjRef;
use crate::runtime::Runtime;
use crate::value::Value;
use anyhow::Result;
use vela_core::error;
use vela_core::names::*;
use vela_hierarchy::FieldSlot;

impl Runtime {
    /// Read a field as seen from `scope`, a class of the object or one of its
    /// superclasses. A shadowed field is still reachable through the
    /// superclass which declares it.
    pub fn get_field(&self, obj: ObjRef, scope: &ClassName, name: &FieldName) -> Result<Value> {
        let instance = self.heap.get(obj)?;
        self.check_instance_of(obj, scope)?;
        let (idx, _) = self.find_slot(scope, name)?;
        Ok(instance.read(idx))
    }

    /// Update a field as seen from `scope`. The field must be mutable.
    pub fn set_field(
        &self,
        obj: ObjRef,
        scope: &ClassName,
        name: &FieldName,
        value: Value,
    ) -> Result<()> {
        let instance = self.heap.get(obj)?;
        self.check_instance_of(obj, scope)?;
        let (idx, slot) = self.find_slot(scope, name)?;
        if !slot.mutable {
            return Err(error::immutable_field(&slot.declared_in, name));
        }
        self.check_value(
            &format!("field `{}' of {}", name, &slot.declared_in),
            &value,
            &slot.ty,
        )?;
        instance.write(idx, value);
        Ok(())
    }

    /// Read a field as seen from the class the object was created as
    pub fn field(&self, obj: ObjRef, name: &str) -> Result<Value> {
        let class = self.class_of(obj)?;
        self.get_field(obj, &class, &field_name(name))
    }

    /// Copy of all the slots of the object, in layout order
    pub fn fields(&self, obj: ObjRef) -> Result<Vec<Value>> {
        Ok(self.heap.get(obj)?.snapshot())
    }

    fn find_slot(&self, scope: &ClassName, name: &FieldName) -> Result<(usize, &FieldSlot)> {
        let layout = &self.hierarchy.get_class_info(scope)?.layout;
        layout
            .find(name)
            .ok_or_else(|| error::no_such_field(scope, name))
    }
}

#[cfg(test)]
mod tests {
    use crate::{MethodBodies, Runtime, Value};
    use anyhow::Result;
    use std::sync::Arc;
    use vela_core::error::Error;
    use vela_core::names::*;
    use vela_core::ty::Ty;
    use vela_decl::*;
    use vela_hierarchy::Hierarchy;

    fn runtime() -> Result<Runtime> {
        let a = ClassDecl::new("A")
            .param("x", Ty::Int)
            .field(FieldDecl::param("x", Ty::Int))
            .field(FieldDecl::new("count", Ty::Int, FieldInit::Const(Literal::Int(0))).mutable());
        let b = ClassDecl::new("B")
            .extends("A", vec![SuperArg::Param("x".into())])
            .param("x", Ty::Int)
            .param("shadow", Ty::Int)
            .field(
                FieldDecl::new("x", Ty::Int, FieldInit::Param("shadow".into()))
                    .with_visibility(Visibility::Private),
            );
        let hierarchy = Hierarchy::build_all(ClassDecls::new(vec![a, b])?)?;
        Ok(Runtime::new(Arc::new(hierarchy), MethodBodies::new()))
    }

    fn error_of(err: anyhow::Error) -> Error {
        err.downcast::<Error>().unwrap()
    }

    #[test]
    fn test_shadowed_field() -> Result<()> {
        let rt = runtime()?;
        let obj = rt.instantiate(&class_name("B"), &[Value::Int(1), Value::Int(2)])?;
        let x = field_name("x");
        assert_eq!(rt.get_field(obj, &class_name("A"), &x)?, Value::Int(1));
        assert_eq!(rt.get_field(obj, &class_name("B"), &x)?, Value::Int(2));
        assert_eq!(rt.field(obj, "x")?, Value::Int(2));
        assert_eq!(
            rt.fields(obj)?,
            vec![Value::Int(1), Value::Int(0), Value::Int(2)]
        );
        Ok(())
    }

    #[test]
    fn test_set_field() -> Result<()> {
        let rt = runtime()?;
        let obj = rt.instantiate(&class_name("B"), &[Value::Int(1), Value::Int(2)])?;
        let count = field_name("count");
        rt.set_field(obj, &class_name("B"), &count, Value::Int(5))?;
        assert_eq!(rt.get_field(obj, &class_name("A"), &count)?, Value::Int(5));

        let err = rt
            .set_field(obj, &class_name("A"), &field_name("x"), Value::Int(9))
            .unwrap_err();
        assert!(matches!(error_of(err), Error::ImmutableFieldError { .. }));
        let err = rt
            .set_field(obj, &class_name("A"), &count, Value::Bool(false))
            .unwrap_err();
        assert!(matches!(error_of(err), Error::TypeMismatchError { .. }));
        Ok(())
    }

    #[test]
    fn test_scope_must_be_supertype() -> Result<()> {
        let rt = runtime()?;
        let obj = rt.instantiate(&class_name("A"), &[Value::Int(1)])?;
        let err = rt
            .get_field(obj, &class_name("B"), &field_name("x"))
            .unwrap_err();
        assert!(matches!(error_of(err), Error::SubtypeError { .. }));
        let err = rt
            .get_field(obj, &class_name("A"), &field_name("nope"))
            .unwrap_err();
        assert!(matches!(error_of(err), Error::NoSuchFieldError { .. }));
        Ok(())
    }
}
