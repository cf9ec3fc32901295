//! Reflection value holders
//!
//! These structs mirror the driver-reported metadata cached by GlslProg at
//! link time. They are plain data; all queries go through GlslProg.

use crate::device::GlslType;
use crate::program::semantic::{AttribSemantic, UniformSemantic};

/// An active vertex attribute of a linked program
#[derive(Debug, Clone)]
pub struct Attribute {
    pub(crate) name: String,
    pub(crate) count: i32,
    pub(crate) location: i32,
    pub(crate) ty: GlslType,
    pub(crate) semantic: AttribSemantic,
}

impl Attribute {
    /// Name as declared in the vertex shader
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element count (1 unless the attribute is an array)
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Driver-assigned or user-bound location
    pub fn location(&self) -> i32 {
        self.location
    }

    /// GLSL type of the attribute
    pub fn ty(&self) -> GlslType {
        self.ty
    }

    /// Resolved attribute semantic
    pub fn semantic(&self) -> AttribSemantic {
        self.semantic
    }
}

/// An active uniform of a linked program
#[derive(Debug, Clone)]
pub struct Uniform {
    pub(crate) name: String,
    pub(crate) count: i32,
    pub(crate) location: i32,
    pub(crate) index: i32,
    pub(crate) ty: GlslType,
    pub(crate) semantic: UniformSemantic,

    // Value-cache bookkeeping: byte size of one element and the offset of
    // this uniform's region inside the cache buffer.
    pub(crate) type_size: usize,
    pub(crate) byte_offset: usize,
}

impl Uniform {
    /// Name as declared in the GLSL (arrays without the `[0]` suffix)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element count (1 unless the uniform is an array)
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Driver-assigned location; -1 when the uniform lives in a block
    pub fn location(&self) -> i32 {
        self.location
    }

    /// Driver-assigned active-uniform index
    pub fn index(&self) -> i32 {
        self.index
    }

    /// GLSL type of the uniform
    pub fn ty(&self) -> GlslType {
        self.ty
    }

    /// Resolved uniform semantic
    pub fn semantic(&self) -> UniformSemantic {
        self.semantic
    }
}

/// An active uniform block of a linked program
#[derive(Debug, Clone)]
pub struct UniformBlock {
    pub(crate) name: String,
    pub(crate) data_size: i32,
    pub(crate) index: i32,
    pub(crate) binding: i32,
    pub(crate) active_uniforms: Vec<Uniform>,
    pub(crate) offsets: Vec<i32>,
    pub(crate) array_strides: Vec<i32>,
    pub(crate) matrix_strides: Vec<i32>,
}

impl UniformBlock {
    /// Name as declared in the GLSL
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum buffer size, in basic machine units, to hold the block
    pub fn data_size(&self) -> i32 {
        self.data_size
    }

    /// Block index within the program
    pub fn index(&self) -> i32 {
        self.index
    }

    /// Current buffer binding point
    pub fn binding(&self) -> i32 {
        self.binding
    }

    /// The active uniforms that live in this block
    pub fn active_uniforms(&self) -> &[Uniform] {
        &self.active_uniforms
    }

    /// Byte offset of each member, parallel to `active_uniforms`
    pub fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    /// Array stride of each member (0 for non-arrays)
    pub fn array_strides(&self) -> &[i32] {
        &self.array_strides
    }

    /// Matrix stride of each member (0 for non-matrices)
    pub fn matrix_strides(&self) -> &[i32] {
        &self.matrix_strides
    }
}

/// An output variable captured with transform feedback
#[derive(Debug, Clone)]
pub struct TransformFeedbackVarying {
    pub(crate) name: String,
    pub(crate) count: i32,
    pub(crate) ty: GlslType,
}

impl TransformFeedbackVarying {
    /// Name as declared in the GLSL
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element count (1 unless the varying is an array)
    pub fn count(&self) -> i32 {
        self.count
    }

    /// GLSL type of the varying
    pub fn ty(&self) -> GlslType {
        self.ty
    }
}
