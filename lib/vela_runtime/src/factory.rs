use crate::bodies::InitContext;
use crate::heap::{Instance, ObjRef};
use crate::runtime::Runtime;
use crate::value::Value;
use anyhow::Result;
use vela_core::error;
use vela_core::names::*;
use vela_decl::{ClassDecl, FieldInit, SuperArg};
use vela_hierarchy::Layout;

impl Runtime {
    /// Create an instance of `class`. Its vpointer is the vtable of `class`
    /// itself.
    pub fn instantiate(&self, class: &ClassName, args: &[Value]) -> Result<ObjRef> {
        let info = self.hierarchy.get_class_info(class)?;
        let mut fields = Vec::with_capacity(info.layout.len());
        self.init_fields(class, &info.layout, args, &mut fields)?;
        let instance = Instance::new(
            class.clone(),
            info.layout.clone(),
            info.vtable.clone(),
            fields,
        );
        let obj = self.heap.alloc(instance);
        log::debug!("created {} as {}", class, obj);
        Ok(obj)
    }

    /// Create an instance of `class` to be bound to a variable of type
    /// `static_class`. The vpointer is still the vtable of `class`.
    pub fn instantiate_as(
        &self,
        static_class: &ClassName,
        class: &ClassName,
        args: &[Value],
    ) -> Result<ObjRef> {
        self.hierarchy.get_class_info(class)?;
        if !self.hierarchy.is_subtype(class, static_class) {
            return Err(error::subtype_error(class, static_class));
        }
        self.instantiate(class, args)
    }

    /// Push the initial values of the slots of `class`, the ones of the
    /// superclasses first
    fn init_fields(
        &self,
        class: &ClassName,
        layout: &Layout,
        args: &[Value],
        fields: &mut Vec<Value>,
    ) -> Result<()> {
        let decl = self
            .hierarchy
            .decls()
            .get(class)
            .ok_or_else(|| error::no_such_class(class))?;
        let param_tys = decl.params.iter().map(|p| p.ty.clone()).collect::<Vec<_>>();
        self.check_args(&format!("constructor of {}", class), &param_tys, args)?;

        if let Some(super_name) = self.hierarchy.superclass_of(class) {
            let super_args = decl
                .super_args
                .iter()
                .map(|arg| match arg {
                    SuperArg::Param(p) => param_value(decl, args, p),
                    SuperArg::Const(lit) => Ok(Value::from(lit)),
                })
                .collect::<Result<Vec<_>>>()?;
            self.init_fields(super_name, layout, &super_args, fields)?;
        }

        for field in &decl.fields {
            let value = match &field.init {
                FieldInit::Param(p) => param_value(decl, args, p)?,
                FieldInit::Const(lit) => Value::from(lit),
                FieldInit::Computed(name) => {
                    let fullname = decl.method_fullname(name);
                    let f = self
                        .bodies
                        .initializer(&fullname)
                        .ok_or_else(|| error::missing_body(&fullname))?;
                    f(&InitContext::new(layout, fields, &decl.params, args))?
                }
            };
            self.check_value(
                &format!("field `{}' of {}", &field.name, class),
                &value,
                &field.ty,
            )?;
            fields.push(value);
        }
        Ok(())
    }
}

fn param_value(decl: &ClassDecl, args: &[Value], name: &str) -> Result<Value> {
    decl.param_idx(name)
        .and_then(|idx| args.get(idx))
        .cloned()
        .ok_or_else(|| error::unknown_param(&decl.name, name))
}
