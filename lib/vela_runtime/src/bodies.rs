use crate::heap::ObjRef;
use crate::runtime::Runtime;
use crate::value::Value;
use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use vela_core::names::*;
use vela_decl::Param;
use vela_hierarchy::Layout;

/// Implementation of an opaque method body. Takes the receiver and the
/// arguments.
pub type ExternFn = Arc<dyn Fn(&Runtime, ObjRef, &[Value]) -> Result<Value> + Send + Sync>;

/// Implementation of a computed field initializer
pub type InitializerFn = Arc<dyn Fn(&InitContext) -> Result<Value> + Send + Sync>;

/// Registry of method bodies, keyed by the method fullname (eg. `B#m`)
#[derive(Clone, Default)]
pub struct MethodBodies {
    methods: HashMap<MethodFullname, ExternFn>,
    initializers: HashMap<MethodFullname, InitializerFn>,
}

impl fmt::Debug for MethodBodies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodBodies")
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("initializers", &self.initializers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MethodBodies {
    pub fn new() -> MethodBodies {
        Default::default()
    }

    /// Register the body of `class#method`
    pub fn define<F>(&mut self, class: &str, method: &str, f: F)
    where
        F: Fn(&Runtime, ObjRef, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.methods
            .insert(method_fullname(&class_name(class), method), Arc::new(f));
    }

    /// Register the initializer `class#name` used by `FieldInit::Computed`
    pub fn define_initializer<F>(&mut self, class: &str, name: &str, f: F)
    where
        F: Fn(&InitContext) -> Result<Value> + Send + Sync + 'static,
    {
        self.initializers
            .insert(method_fullname(&class_name(class), name), Arc::new(f));
    }

    pub fn get(&self, fullname: &MethodFullname) -> Option<&ExternFn> {
        self.methods.get(fullname)
    }

    pub fn initializer(&self, fullname: &MethodFullname) -> Option<&InitializerFn> {
        self.initializers.get(fullname)
    }
}

/// What a field initializer can see: the constructor arguments of the
/// class and the fields initialized so far
pub struct InitContext<'a> {
    layout: &'a Layout,
    fields: &'a [Value],
    params: &'a [Param],
    args: &'a [Value],
}

impl<'a> InitContext<'a> {
    pub(crate) fn new(
        layout: &'a Layout,
        fields: &'a [Value],
        params: &'a [Param],
        args: &'a [Value],
    ) -> InitContext<'a> {
        InitContext {
            layout,
            fields,
            params,
            args,
        }
    }

    /// Value of an initialized field. When shadowed, the most recent one.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.layout.slots()[..self.fields.len()]
            .iter()
            .rposition(|s| s.name.0 == name)
            .map(|idx| &self.fields[idx])
    }

    /// Value of a constructor argument
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .position(|p| p.name == name)
            .and_then(|idx| self.args.get(idx))
    }
}
