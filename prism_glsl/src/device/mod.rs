//! Device seam - the slice of the native GL API the program layer calls
//!
//! Backends implement [`GlDevice`] over a real context (see the glow
//! backend crate); tests implement it with a scripted mock.

use crate::error::Result;

#[cfg(test)]
pub(crate) mod mock;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
    /// Geometry shader
    Geometry,
    /// Tessellation control shader
    TessellationCtrl,
    /// Tessellation evaluation shader
    TessellationEval,
}

impl ShaderStage {
    /// Human-readable stage name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Geometry => "geometry",
            ShaderStage::TessellationCtrl => "tessellation control",
            ShaderStage::TessellationEval => "tessellation evaluation",
        }
    }
}

/// Typed mirror of the driver-reported GLSL type enum
///
/// Covers the types the program layer validates against; backends map
/// these from the raw GL type constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum GlslType {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Int,
    IVec2,
    IVec3,
    IVec4,
    UInt,
    UVec2,
    UVec3,
    UVec4,
    Bool,
    BVec2,
    BVec3,
    BVec4,
    Mat2,
    Mat3,
    Mat4,
    Sampler2d,
    Sampler3d,
    SamplerCube,
    Sampler2dShadow,
    Sampler2dArray,
    SamplerCubeShadow,
    Sampler2dArrayShadow,
    ISampler2d,
    USampler2d,
}

impl GlslType {
    /// Byte size of a single element of this type (for the uniform value cache)
    pub fn size_bytes(&self) -> usize {
        match self {
            GlslType::Float | GlslType::Int | GlslType::UInt | GlslType::Bool => 4,
            GlslType::Vec2 | GlslType::IVec2 | GlslType::UVec2 | GlslType::BVec2 => 8,
            GlslType::Vec3 | GlslType::IVec3 | GlslType::UVec3 | GlslType::BVec3 => 12,
            GlslType::Vec4 | GlslType::IVec4 | GlslType::UVec4 | GlslType::BVec4 => 16,
            GlslType::Mat2 => 16,
            GlslType::Mat3 => 36,
            GlslType::Mat4 => 64,
            // Samplers are set through a texture-unit integer
            GlslType::Sampler2d
            | GlslType::Sampler3d
            | GlslType::SamplerCube
            | GlslType::Sampler2dShadow
            | GlslType::Sampler2dArray
            | GlslType::SamplerCubeShadow
            | GlslType::Sampler2dArrayShadow
            | GlslType::ISampler2d
            | GlslType::USampler2d => 4,
        }
    }

    /// GLSL spelling of this type, for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            GlslType::Float => "float",
            GlslType::Vec2 => "vec2",
            GlslType::Vec3 => "vec3",
            GlslType::Vec4 => "vec4",
            GlslType::Int => "int",
            GlslType::IVec2 => "ivec2",
            GlslType::IVec3 => "ivec3",
            GlslType::IVec4 => "ivec4",
            GlslType::UInt => "uint",
            GlslType::UVec2 => "uvec2",
            GlslType::UVec3 => "uvec3",
            GlslType::UVec4 => "uvec4",
            GlslType::Bool => "bool",
            GlslType::BVec2 => "bvec2",
            GlslType::BVec3 => "bvec3",
            GlslType::BVec4 => "bvec4",
            GlslType::Mat2 => "mat2",
            GlslType::Mat3 => "mat3",
            GlslType::Mat4 => "mat4",
            GlslType::Sampler2d => "sampler2D",
            GlslType::Sampler3d => "sampler3D",
            GlslType::SamplerCube => "samplerCube",
            GlslType::Sampler2dShadow => "sampler2DShadow",
            GlslType::Sampler2dArray => "sampler2DArray",
            GlslType::SamplerCubeShadow => "samplerCubeShadow",
            GlslType::Sampler2dArrayShadow => "sampler2DArrayShadow",
            GlslType::ISampler2d => "isampler2D",
            GlslType::USampler2d => "usampler2D",
        }
    }

    /// Whether this type is a sampler
    pub fn is_sampler(&self) -> bool {
        matches!(
            self,
            GlslType::Sampler2d
                | GlslType::Sampler3d
                | GlslType::SamplerCube
                | GlslType::Sampler2dShadow
                | GlslType::Sampler2dArray
                | GlslType::SamplerCubeShadow
                | GlslType::Sampler2dArrayShadow
                | GlslType::ISampler2d
                | GlslType::USampler2d
        )
    }

    /// Expected vertex-attribute layout for this type
    ///
    /// Returns `(dims_per_vertex_pointer, locations_consumed)`: matrices
    /// occupy one attribute location per column.
    pub fn attrib_layout(&self) -> (u32, u32) {
        match self {
            GlslType::Float | GlslType::Int | GlslType::UInt | GlslType::Bool => (1, 1),
            GlslType::Vec2 | GlslType::IVec2 | GlslType::UVec2 | GlslType::BVec2 => (2, 1),
            GlslType::Vec3 | GlslType::IVec3 | GlslType::UVec3 | GlslType::BVec3 => (3, 1),
            GlslType::Vec4 | GlslType::IVec4 | GlslType::UVec4 | GlslType::BVec4 => (4, 1),
            GlslType::Mat2 => (2, 2),
            GlslType::Mat3 => (3, 3),
            GlslType::Mat4 => (4, 4),
            _ => (1, 1),
        }
    }
}

/// Transform-feedback capture layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformFeedbackFormat {
    /// All varyings captured interleaved into one buffer
    InterleavedAttribs,
    /// One buffer per varying
    SeparateAttribs,
}

/// Opaque shader-object handle issued by a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Opaque program-object handle issued by a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Driver-reported name/type/count of an active attribute, uniform, or varying
#[derive(Debug, Clone)]
pub struct ActiveVar {
    /// Name as declared in the GLSL (arrays may be reported as `name[0]`)
    pub name: String,
    /// GLSL type
    pub ty: GlslType,
    /// Element count (1 unless the variable is an array)
    pub count: i32,
}

/// Driver-reported uniform-block metadata
#[derive(Debug, Clone)]
pub struct ActiveUniformBlock {
    /// Block name as declared in the GLSL
    pub name: String,
    /// Minimum buffer size, in basic machine units, to hold the block
    pub data_size: i32,
    /// Current block binding
    pub binding: i32,
    /// Indices of the active uniforms that live in this block
    pub uniform_indices: Vec<u32>,
    /// Byte offset of each member, parallel to `uniform_indices`
    pub offsets: Vec<i32>,
    /// Array stride of each member (0 for non-arrays)
    pub array_strides: Vec<i32>,
    /// Matrix stride of each member (0 for non-matrices)
    pub matrix_strides: Vec<i32>,
}

/// The native GL calls the program layer depends on
///
/// All methods mirror the underlying driver entry points one-to-one; the
/// trait exists so the program logic can run against a real context or a
/// test double. Uniform uploads assume the owning program is current.
pub trait GlDevice {
    // ----- shader objects -----

    /// Create a shader object for the given stage
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle>;
    /// Replace the source of a shader object
    fn shader_source(&self, shader: ShaderHandle, source: &str);
    /// Compile a shader object
    fn compile_shader(&self, shader: ShaderHandle);
    /// Whether the last compile succeeded
    fn compile_status(&self, shader: ShaderHandle) -> bool;
    /// Driver info log for a shader object
    fn shader_info_log(&self, shader: ShaderHandle) -> String;
    /// Delete a shader object
    fn delete_shader(&self, shader: ShaderHandle);

    // ----- program objects -----

    /// Create an empty program object
    fn create_program(&self) -> Result<ProgramHandle>;
    /// Attach a shader to a program
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    /// Detach a shader from a program
    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    /// Bind an attribute name to a location (takes effect at link)
    fn bind_attrib_location(&self, program: ProgramHandle, location: u32, name: &str);
    /// Bind a fragment output name to a color number (takes effect at link)
    fn bind_frag_data_location(&self, program: ProgramHandle, color_number: u32, name: &str);
    /// Declare the varyings to capture with transform feedback (takes effect at link)
    fn transform_feedback_varyings(
        &self,
        program: ProgramHandle,
        varyings: &[String],
        format: TransformFeedbackFormat,
    );
    /// Link the program
    fn link_program(&self, program: ProgramHandle);
    /// Whether the last link succeeded
    fn link_status(&self, program: ProgramHandle) -> bool;
    /// Driver info log for a program object
    fn program_info_log(&self, program: ProgramHandle) -> String;
    /// Delete a program object
    fn delete_program(&self, program: ProgramHandle);
    /// Make a program current (None unbinds)
    fn use_program(&self, program: Option<ProgramHandle>);

    // ----- introspection (linked programs only) -----

    /// Number of active attributes
    fn active_attrib_count(&self, program: ProgramHandle) -> u32;
    /// Active attribute at `index`
    fn active_attrib(&self, program: ProgramHandle, index: u32) -> Option<ActiveVar>;
    /// Location of a named attribute (-1 if absent)
    fn attrib_location(&self, program: ProgramHandle, name: &str) -> i32;
    /// Number of active uniforms
    fn active_uniform_count(&self, program: ProgramHandle) -> u32;
    /// Active uniform at `index`
    fn active_uniform(&self, program: ProgramHandle, index: u32) -> Option<ActiveVar>;
    /// Location of a named uniform (-1 if absent or block-resident)
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> i32;
    /// Number of active uniform blocks
    fn active_uniform_block_count(&self, program: ProgramHandle) -> u32;
    /// Uniform block at `block_index`, with member info
    fn active_uniform_block(
        &self,
        program: ProgramHandle,
        block_index: u32,
    ) -> Option<ActiveUniformBlock>;
    /// Assign a uniform block to a buffer binding point
    fn uniform_block_binding(&self, program: ProgramHandle, block_index: u32, binding: u32);
    /// Number of transform-feedback varyings
    fn transform_feedback_varying_count(&self, program: ProgramHandle) -> u32;
    /// Transform-feedback varying at `index`
    fn transform_feedback_varying(&self, program: ProgramHandle, index: u32) -> Option<ActiveVar>;

    // ----- uniform upload (program must be current) -----

    /// Upload float data; `dim` is the component count (1-4)
    fn uniform_f32(&self, location: i32, dim: u8, values: &[f32]);
    /// Upload signed integer data; `dim` is the component count (1-4)
    fn uniform_i32(&self, location: i32, dim: u8, values: &[i32]);
    /// Upload unsigned integer data; `dim` is the component count (1-4)
    fn uniform_u32(&self, location: i32, dim: u8, values: &[u32]);
    /// Upload square float matrices; `dim` is the matrix dimension (2-4)
    fn uniform_matrix(&self, location: i32, dim: u8, transpose: bool, values: &[f32]);

    // ----- debug -----

    /// Attach a debugging label to a program object (no-op when unsupported)
    fn object_label(&self, program: ProgramHandle, label: &str);
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
