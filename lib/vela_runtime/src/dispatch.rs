use crate::heap::ObjRef;
use crate::runtime::Runtime;
use crate::value::Value;
use anyhow::Result;
use vela_core::error;
use vela_core::names::*;
use vela_decl::{MethodBody, MethodSignature};

impl Runtime {
    /// Invoke a virtual method. The implementation is taken from the vtable
    /// the object points to, i.e. decided by the class the object was
    /// created as.
    pub fn dispatch(&self, obj: ObjRef, method: &MethodFirstname, args: &[Value]) -> Result<Value> {
        let vtable = self.vtable_of(obj)?;
        let idx = vtable
            .get(method)
            .ok_or_else(|| error::no_such_method(&vtable.class_name, method))?;
        let slot = vtable
            .slot(idx)
            .ok_or_else(|| error::no_such_method(&vtable.class_name, method))?;
        log::trace!(
            "{} {}.{} -> {} (slot {})",
            obj,
            &vtable.class_name,
            method,
            &slot.implementation,
            idx
        );
        self.invoke(&slot.implementation, &slot.signature, obj, args)
    }

    /// Invoke a virtual method through a reference of type `static_class`.
    /// The result is the same as `dispatch`; the static type only decides
    /// whether the call is allowed.
    pub fn dispatch_as(
        &self,
        static_class: &ClassName,
        obj: ObjRef,
        method: &MethodFirstname,
        args: &[Value],
    ) -> Result<Value> {
        self.check_instance_of(obj, static_class)?;
        self.dispatch(obj, method, args)
    }

    /// Invoke a private method of `class`. Bound statically; the vtable is
    /// not consulted.
    pub fn invoke_static(
        &self,
        class: &ClassName,
        obj: ObjRef,
        method: &MethodFirstname,
        args: &[Value],
    ) -> Result<Value> {
        self.check_instance_of(obj, class)?;
        let static_methods = self
            .hierarchy
            .static_methods(class)
            .ok_or_else(|| error::no_such_class(class))?;
        let (fullname, signature) = static_methods
            .get(method)
            .ok_or_else(|| error::no_such_method(class, method))?;
        self.invoke(fullname, signature, obj, args)
    }

    /// Invoke the implementation of the superclass of `class`, like
    /// `super.method(...)` written in `class`
    pub fn invoke_super(
        &self,
        class: &ClassName,
        obj: ObjRef,
        method: &MethodFirstname,
        args: &[Value],
    ) -> Result<Value> {
        self.check_instance_of(obj, class)?;
        let super_name = self
            .hierarchy
            .superclass_of(class)
            .ok_or_else(|| error::no_such_method(class, method))?;
        let slot = self.hierarchy.resolve(super_name, method)?;
        self.invoke(&slot.implementation, &slot.signature, obj, args)
    }

    fn invoke(
        &self,
        fullname: &MethodFullname,
        signature: &MethodSignature,
        obj: ObjRef,
        args: &[Value],
    ) -> Result<Value> {
        self.check_args(&fullname.full_name, &signature.params, args)?;
        let decl = self
            .hierarchy
            .decls()
            .find_method(fullname)
            .ok_or_else(|| error::missing_body(fullname))?;
        let value = match &decl.body {
            MethodBody::Extern => {
                let f = self
                    .bodies
                    .get(fullname)
                    .ok_or_else(|| error::missing_body(fullname))?;
                f(self, obj, args)?
            }
            MethodBody::Getter { field } => self.get_field(obj, &fullname.class_name, field)?,
            MethodBody::Setter { field } => {
                let value = args
                    .first()
                    .cloned()
                    .ok_or_else(|| error::arity_error(&fullname.full_name, 1, 0))?;
                self.set_field(obj, &fullname.class_name, field, value)?;
                Value::Unit
            }
        };
        self.check_value(
            &format!("return value of {}", fullname),
            &value,
            &signature.ret_ty,
        )?;
        Ok(value)
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

    fn sig(ret_ty: Ty) -> MethodSignature {
        MethodSignature::nullary(ret_ty)
    }

    fn runtime() -> Result<Runtime> {
        let animal = ClassDecl::new("Animal")
            .param("name", Ty::Str)
            .field(FieldDecl::param("name", Ty::Str).mutable())
            .method(MethodDecl::new("sound", sig(Ty::Str)))
            .method(MethodDecl::new("describe", sig(Ty::Str)))
            .method(MethodDecl::getter("name", Ty::Str))
            .method(MethodDecl::setter("name", Ty::Str))
            .method(MethodDecl::new("secret", sig(Ty::Int)).private());
        let dog = ClassDecl::new("Dog")
            .extends("Animal", vec![SuperArg::Const(Literal::Str("dog".into()))])
            .method(MethodDecl::new("sound", sig(Ty::Str)).overriding())
            .method(MethodDecl::new("secret", sig(Ty::Int)).private())
            .method(MethodDecl::new("broken", sig(Ty::Int)));
        let hierarchy = Hierarchy::build_all(ClassDecls::new(vec![animal, dog])?)?;

        let mut bodies = MethodBodies::new();
        bodies.define("Animal", "sound", |_, _, _| Ok(Value::str("...")));
        bodies.define("Animal", "describe", |rt, this, _| {
            let sound = rt.dispatch(this, &method_firstname("sound"), &[])?;
            let name = rt.dispatch(this, &method_firstname("name"), &[])?;
            Ok(Value::str(&format!("{} says {}", name, sound)))
        });
        bodies.define("Animal", "secret", |_, _, _| Ok(Value::Int(1)));
        bodies.define("Dog", "sound", |_, _, _| Ok(Value::str("woof")));
        bodies.define("Dog", "secret", |_, _, _| Ok(Value::Int(2)));
        bodies.define("Dog", "broken", |_, _, _| Ok(Value::Bool(true)));
        Ok(Runtime::new(Arc::new(hierarchy), bodies))
    }

    fn error_of(err: anyhow::Error) -> Error {
        err.downcast::<Error>().unwrap()
    }

    #[test]
    fn test_dynamic_dispatch() -> Result<()> {
        let rt = runtime()?;
        let dog = rt.instantiate(&class_name("Dog"), &[])?;
        let sound = method_firstname("sound");
        assert_eq!(rt.dispatch(dog, &sound, &[])?, Value::str("woof"));
        assert_eq!(
            rt.dispatch_as(&class_name("Animal"), dog, &sound, &[])?,
            Value::str("woof")
        );
        assert_eq!(
            rt.dispatch(dog, &method_firstname("describe"), &[])?,
            Value::str("\"dog\" says \"woof\"")
        );
        Ok(())
    }

    #[test]
    fn test_accessors() -> Result<()> {
        let rt = runtime()?;
        let dog = rt.instantiate(&class_name("Dog"), &[])?;
        rt.dispatch(dog, &method_firstname("name="), &[Value::str("rex")])?;
        assert_eq!(
            rt.dispatch(dog, &method_firstname("name"), &[])?,
            Value::str("rex")
        );
        Ok(())
    }

    #[test]
    fn test_static_and_super() -> Result<()> {
        let rt = runtime()?;
        let dog = rt.instantiate(&class_name("Dog"), &[])?;
        let secret = method_firstname("secret");
        assert_eq!(
            rt.invoke_static(&class_name("Animal"), dog, &secret, &[])?,
            Value::Int(1)
        );
        assert_eq!(
            rt.invoke_static(&class_name("Dog"), dog, &secret, &[])?,
            Value::Int(2)
        );
        assert!(matches!(
            error_of(rt.dispatch(dog, &secret, &[]).unwrap_err()),
            Error::NoSuchMethodError { .. }
        ));
        assert_eq!(
            rt.invoke_super(&class_name("Dog"), dog, &method_firstname("sound"), &[])?,
            Value::str("...")
        );
        Ok(())
    }

    #[test]
    fn test_call_errors() -> Result<()> {
        let rt = runtime()?;
        let animal = rt.instantiate(&class_name("Animal"), &[Value::str("cat")])?;
        assert!(matches!(
            error_of(rt.dispatch(animal, &method_firstname("fly"), &[]).unwrap_err()),
            Error::NoSuchMethodError { .. }
        ));
        assert!(matches!(
            error_of(
                rt.dispatch(animal, &method_firstname("sound"), &[Value::Int(1)])
                    .unwrap_err()
            ),
            Error::ArityError { .. }
        ));
        assert!(matches!(
            error_of(
                rt.dispatch(animal, &method_firstname("name="), &[Value::Int(1)])
                    .unwrap_err()
            ),
            Error::TypeMismatchError {
                expected: Ty::Str,
                ..
            }
        ));
        assert_eq!(
            rt.dispatch(animal, &method_firstname("name"), &[])?,
            Value::str("cat")
        );
        assert!(matches!(
            error_of(
                rt.dispatch_as(&class_name("Dog"), animal, &method_firstname("sound"), &[])
                    .unwrap_err()
            ),
            Error::SubtypeError { .. }
        ));
        let dog = rt.instantiate(&class_name("Dog"), &[])?;
        assert!(matches!(
            error_of(rt.dispatch(dog, &method_firstname("broken"), &[]).unwrap_err()),
            Error::TypeMismatchError { .. }
        ));
        Ok(())
    }

    #[test]
    fn test_released_object() -> Result<()> {
        let rt = runtime()?;
        let dog = rt.instantiate(&class_name("Dog"), &[])?;
        rt.release(dog)?;
        assert!(matches!(
            error_of(rt.dispatch(dog, &method_firstname("sound"), &[]).unwrap_err()),
            Error::DanglingReferenceError { .. }
        ));
        assert_eq!(rt.heap().live_count(), 0);
        Ok(())
    }
}
