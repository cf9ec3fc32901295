//! Program module - shader program construction, reflection, and uniforms

pub mod format;
pub mod glsl_prog;
pub mod preprocessor;
pub mod reflection;
pub mod semantic;
pub mod uniform_value;
mod value_cache;

pub use format::*;
pub use glsl_prog::*;
pub use preprocessor::*;
pub use reflection::*;
pub use semantic::*;
pub use uniform_value::*;
