mod class_name;
mod field_name;
mod method_name;
pub use class_name::{class_name, ClassName, ROOT_CLASS};
pub use field_name::{field_name, FieldName};
pub use method_name::{method_firstname, method_fullname, MethodFirstname, MethodFullname};
