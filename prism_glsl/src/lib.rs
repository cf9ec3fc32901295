/*!
# Prism GLSL

Core traits and types for the Prism GLSL shader-program library.

This crate provides a platform-agnostic abstraction over an OpenGL-style
shading-language pipeline: per-stage GLSL source is compiled and linked into
a program, the linked program is introspected for its active attributes,
uniforms, uniform blocks and transform-feedback varyings, and typed uniform
setters validate values against the driver-reported metadata.

## Architecture

- **GlDevice**: the narrow slice of the native GL API the program layer
  calls, expressed as a trait so backends (and tests) can implement it
- **GlslProg**: the linked program plus its cached reflection data
- **Format**: construction-time configuration collected by a builder
- **ShaderPreprocessor**: seam for `#include`-style source rewriting;
  directive injection (`#version`, `#define`) is provided by default

Backend implementations provide concrete `GlDevice` types; see the
`prism_glsl_backend_glow` crate for the OpenGL binding over `glow`.
*/

mod error;
pub mod log;
pub mod device;
pub mod program;

pub use error::{Error, Result};
pub use device::{
    ActiveUniformBlock, ActiveVar, GlDevice, GlslType, ProgramHandle, ShaderHandle, ShaderStage,
    TransformFeedbackFormat,
};
pub use program::{
    Attribute, AttribSemantic, Define, DirectivePreprocessor, Format, GlslProg, ProcessedSource,
    ShaderPreprocessor, TransformFeedbackVarying, Uniform, UniformBlock, UniformSemantic,
    UniformValue,
};

// Re-export math library at crate root
pub use glam;
