use serde::{Deserialize, Serialize};
use std::fmt;
use vela_core::ty::Ty;

/// Parameter and return types of a method. Parameter names do not matter
/// for overriding, so they are not kept here.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct MethodSignature {
    #[serde(default)]
    pub params: Vec<Ty>,
    #[serde(default = "unit_ty")]
    pub ret_ty: Ty,
}

fn unit_ty() -> Ty {
    Ty::Unit
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>();
        write!(f, "({}) -> {}", params.join(", "), self.ret_ty)
    }
}

impl MethodSignature {
    pub fn new(params: Vec<Ty>, ret_ty: Ty) -> MethodSignature {
        MethodSignature { params, ret_ty }
    }

    /// Signature of a method which takes no arguments
    pub fn nullary(ret_ty: Ty) -> MethodSignature {
        MethodSignature::new(vec![], ret_ty)
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Returns true if a method with signature `self` can take the slot
    /// of `other`. Return types are not compared; covariance of them is
    /// checked before the declarations reach here.
    pub fn overridable(&self, other: &MethodSignature) -> bool {
        self.params == other.params
    }
}
