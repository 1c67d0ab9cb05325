use crate::names::*;
use crate::ty::Ty;

/// Errors raised while building a hierarchy, instantiating or dispatching.
/// None of them is recoverable; each aborts the operation which raised it.
#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("field `{field}' is declared twice in {class}")]
    DuplicateFieldError { class: ClassName, field: FieldName },
    #[error("method `{method}' is declared twice in {class} (hint: mark it as override)")]
    DuplicateMethodError {
        class: ClassName,
        method: MethodFirstname,
    },
    #[error("{class}#{method} overrides nothing: {msg}")]
    InvalidOverrideError {
        class: ClassName,
        method: MethodFirstname,
        msg: String,
    },
    #[error("{target} takes {expected} argument(s) but {given} given")]
    ArityError {
        target: String,
        expected: usize,
        given: usize,
    },
    #[error("{target} expects {expected} but got {given}")]
    TypeMismatchError {
        target: String,
        expected: Ty,
        given: String,
    },
    #[error("method `{method}' not found on {class}")]
    NoSuchMethodError {
        class: ClassName,
        method: MethodFirstname,
    },
    #[error("superclass `{superclass}' of {class} not found")]
    UnknownSuperclassError {
        class: ClassName,
        superclass: ClassName,
    },
    #[error("class {class} is declared twice")]
    DuplicateClassError { class: ClassName },
    #[error("class {class} inherits from itself")]
    CyclicInheritanceError { class: ClassName },
    #[error("superclass `{superclass}' of {class} could not be built")]
    BrokenSuperclassError {
        class: ClassName,
        superclass: ClassName,
    },
    #[error("class {class} not found")]
    NoSuchClassError { class: ClassName },
    #[error("{class} has no constructor parameter `{param}'")]
    UnknownParamError { class: ClassName, param: String },
    #[error("field `{field}' of {class} cannot hold a value of type {ty}")]
    InvalidFieldTypeError {
        class: ClassName,
        field: FieldName,
        ty: Ty,
    },
    #[error("field `{field}' not found on {class}")]
    NoSuchFieldError { class: ClassName, field: FieldName },
    #[error("field `{field}' of {class} is not mutable")]
    ImmutableFieldError { class: ClassName, field: FieldName },
    #[error("{class} is not a subtype of {expected}")]
    SubtypeError {
        class: ClassName,
        expected: ClassName,
    },
    #[error("no implementation registered for {method}")]
    MissingBodyError { method: MethodFullname },
    #[error("object #{obj} has already been released")]
    DanglingReferenceError { obj: usize },
}

pub fn duplicate_field(class: &ClassName, field: &FieldName) -> anyhow::Error {
    Error::DuplicateFieldError {
        class: class.clone(),
        field: field.clone(),
    }
    .into()
}

pub fn duplicate_method(class: &ClassName, method: &MethodFirstname) -> anyhow::Error {
    Error::DuplicateMethodError {
        class: class.clone(),
        method: method.clone(),
    }
    .into()
}

pub fn invalid_override(
    class: &ClassName,
    method: &MethodFirstname,
    msg: impl Into<String>,
) -> anyhow::Error {
    Error::InvalidOverrideError {
        class: class.clone(),
        method: method.clone(),
        msg: msg.into(),
    }
    .into()
}

pub fn arity_error(target: impl Into<String>, expected: usize, given: usize) -> anyhow::Error {
    Error::ArityError {
        target: target.into(),
        expected,
        given,
    }
    .into()
}

pub fn type_mismatch(
    target: impl Into<String>,
    expected: &Ty,
    given: impl Into<String>,
) -> anyhow::Error {
    Error::TypeMismatchError {
        target: target.into(),
        expected: expected.clone(),
        given: given.into(),
    }
    .into()
}

pub fn no_such_method(class: &ClassName, method: &MethodFirstname) -> anyhow::Error {
    Error::NoSuchMethodError {
        class: class.clone(),
        method: method.clone(),
    }
    .into()
}

pub fn unknown_superclass(class: &ClassName, superclass: &ClassName) -> anyhow::Error {
    Error::UnknownSuperclassError {
        class: class.clone(),
        superclass: superclass.clone(),
    }
    .into()
}

pub fn duplicate_class(class: &ClassName) -> anyhow::Error {
    Error::DuplicateClassError {
        class: class.clone(),
    }
    .into()
}

pub fn cyclic_inheritance(class: &ClassName) -> anyhow::Error {
    Error::CyclicInheritanceError {
        class: class.clone(),
    }
    .into()
}

pub fn broken_superclass(class: &ClassName, superclass: &ClassName) -> anyhow::Error {
    Error::BrokenSuperclassError {
        class: class.clone(),
        superclass: superclass.clone(),
    }
    .into()
}

pub fn no_such_class(class: &ClassName) -> anyhow::Error {
    Error::NoSuchClassError {
        class: class.clone(),
    }
    .into()
}

pub fn unknown_param(class: &ClassName, param: impl Into<String>) -> anyhow::Error {
    Error::UnknownParamError {
        class: class.clone(),
        param: param.into(),
    }
    .into()
}

pub fn invalid_field_type(class: &ClassName, field: &FieldName, ty: &Ty) -> anyhow::Error {
    Error::InvalidFieldTypeError {
        class: class.clone(),
        field: field.clone(),
        ty: ty.clone(),
    }
    .into()
}

pub fn no_such_field(class: &ClassName, field: &FieldName) -> anyhow::Error {
    Error::NoSuchFieldError {
        class: class.clone(),
        field: field.clone(),
    }
    .into()
}

pub fn immutable_field(class: &ClassName, field: &FieldName) -> anyhow::Error {
    Error::ImmutableFieldError {
        class: class.clone(),
        field: field.clone(),
    }
    .into()
}

pub fn subtype_error(class: &ClassName, expected: &ClassName) -> anyhow::Error {
    Error::SubtypeError {
        class: class.clone(),
        expected: expected.clone(),
    }
    .into()
}

pub fn missing_body(method: &MethodFullname) -> anyhow::Error {
    Error::MissingBodyError {
        method: method.clone(),
    }
    .into()
}

pub fn dangling_reference(obj: usize) -> anyhow::Error {
    Error::DanglingReferenceError { obj }.into()
}

/// Returns the `Error` wrapped in `err`, if any
pub fn as_vela_error(err: &anyhow::Error) -> Option<&Error> {
    err.downcast_ref::<Error>()
}
