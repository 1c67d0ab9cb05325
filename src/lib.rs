pub mod cli;
pub mod loader;
pub mod runner;
pub use vela_core::{error, names, ty};
pub use vela_decl as decl;
pub use vela_hierarchy as hierarchy;
pub use vela_runtime as runtime;
