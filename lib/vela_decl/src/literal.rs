use serde::{Deserialize, Serialize};
use vela_core::ty::Ty;

/// A constant written in a declaration (field defaults, superclass
/// constructor arguments)
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Literal {
    Unit,
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Str(String),
}

impl Literal {
    /// Returns true if this literal can be stored in a slot of type `ty`
    pub fn conforms_to(&self, ty: &Ty) -> bool {
        matches!(
            (self, ty),
            (Literal::Unit, Ty::Unit)
                | (Literal::Null, Ty::Str | Ty::Ref(_))
                | (Literal::Bool(_), Ty::Bool)
                | (Literal::Byte(_), Ty::Byte)
                | (Literal::Short(_), Ty::Short)
                | (Literal::Char(_), Ty::Char)
                | (Literal::Int(_), Ty::Int)
                | (Literal::Float(_), Ty::Float)
                | (Literal::Long(_), Ty::Long)
                | (Literal::Double(_), Ty::Double)
                | (Literal::Str(_), Ty::Str)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conforms_to() {
        assert!(Literal::Int(1).conforms_to(&Ty::Int));
        assert!(!Literal::Int(1).conforms_to(&Ty::Long));
        assert!(Literal::Null.conforms_to(&Ty::class("A")));
        assert!(Literal::Null.conforms_to(&Ty::Str));
        assert!(!Literal::Null.conforms_to(&Ty::Int));
        assert!(Literal::Str("a".into()).conforms_to(&Ty::Str));
    }
}
