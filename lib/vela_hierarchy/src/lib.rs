mod ancestors;
mod hierarchy;
mod layout;
mod static_methods;
mod vtable;
pub use crate::ancestors::Ancestors;
pub use crate::hierarchy::{BuildFailure, ClassInfo, Hierarchy};
pub use crate::layout::{build_layout, FieldSlot, Layout};
pub use crate::static_methods::StaticMethods;
pub use crate::vtable::{build_vtable, MethodSlot, VTable};
