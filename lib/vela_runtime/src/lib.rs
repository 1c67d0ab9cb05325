mod bodies;
mod dispatch;
mod factory;
mod fields;
mod heap;
mod runtime;
mod value;
pub use crate::bodies::{ExternFn, InitContext, InitializerFn, MethodBodies};
pub use crate::heap::{Heap, Instance, ObjRef};
pub use crate::runtime::Runtime;
pub use crate::value::Value;
