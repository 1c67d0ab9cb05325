mod class_decl;
mod class_decls;
mod literal;
mod member;
pub mod signature;
pub use crate::class_decl::{ClassDecl, Param, SuperArg, Superclass};
pub use crate::class_decls::ClassDecls;
pub use crate::literal::Literal;
pub use crate::member::{FieldDecl, FieldInit, MethodBody, MethodDecl, Visibility};
pub use crate::signature::MethodSignature;
