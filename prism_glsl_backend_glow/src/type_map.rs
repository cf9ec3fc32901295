//! GL constant translation

use prism_glsl::{GlslType, ShaderStage, TransformFeedbackFormat};

/// Map a driver-reported type constant to the typed enum
///
/// Returns None for types the program layer does not model (atomic
/// counters, images, and the rarer sampler kinds).
pub(crate) fn glsl_type_from_gl(raw: u32) -> Option<GlslType> {
    match raw {
        glow::FLOAT => Some(GlslType::Float),
        glow::FLOAT_VEC2 => Some(GlslType::Vec2),
        glow::FLOAT_VEC3 => Some(GlslType::Vec3),
        glow::FLOAT_VEC4 => Some(GlslType::Vec4),
        glow::INT => Some(GlslType::Int),
        glow::INT_VEC2 => Some(GlslType::IVec2),
        glow::INT_VEC3 => Some(GlslType::IVec3),
        glow::INT_VEC4 => Some(GlslType::IVec4),
        glow::UNSIGNED_INT => Some(GlslType::UInt),
        glow::UNSIGNED_INT_VEC2 => Some(GlslType::UVec2),
        glow::UNSIGNED_INT_VEC3 => Some(GlslType::UVec3),
        glow::UNSIGNED_INT_VEC4 => Some(GlslType::UVec4),
        glow::BOOL => Some(GlslType::Bool),
        glow::BOOL_VEC2 => Some(GlslType::BVec2),
        glow::BOOL_VEC3 => Some(GlslType::BVec3),
        glow::BOOL_VEC4 => Some(GlslType::BVec4),
        glow::FLOAT_MAT2 => Some(GlslType::Mat2),
        glow::FLOAT_MAT3 => Some(GlslType::Mat3),
        glow::FLOAT_MAT4 => Some(GlslType::Mat4),
        glow::SAMPLER_2D => Some(GlslType::Sampler2d),
        glow::SAMPLER_3D => Some(GlslType::Sampler3d),
        glow::SAMPLER_CUBE => Some(GlslType::SamplerCube),
        glow::SAMPLER_2D_SHADOW => Some(GlslType::Sampler2dShadow),
        glow::SAMPLER_2D_ARRAY => Some(GlslType::Sampler2dArray),
        glow::SAMPLER_CUBE_SHADOW => Some(GlslType::SamplerCubeShadow),
        glow::SAMPLER_2D_ARRAY_SHADOW => Some(GlslType::Sampler2dArrayShadow),
        glow::INT_SAMPLER_2D => Some(GlslType::ISampler2d),
        glow::UNSIGNED_INT_SAMPLER_2D => Some(GlslType::USampler2d),
        _ => None,
    }
}

pub(crate) fn shader_stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        ShaderStage::TessellationCtrl => glow::TESS_CONTROL_SHADER,
        ShaderStage::TessellationEval => glow::TESS_EVALUATION_SHADER,
    }
}

pub(crate) fn feedback_format_to_gl(format: TransformFeedbackFormat) -> u32 {
    match format {
        TransformFeedbackFormat::InterleavedAttribs => glow::INTERLEAVED_ATTRIBS,
        TransformFeedbackFormat::SeparateAttribs => glow::SEPARATE_ATTRIBS,
    }
}

pub(crate) fn error_string(raw: u32) -> &'static str {
    match raw {
        glow::NO_ERROR => "NO_ERROR",
        glow::INVALID_ENUM => "INVALID_ENUM",
        glow::INVALID_VALUE => "INVALID_VALUE",
        glow::INVALID_OPERATION => "INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
#[path = "type_map_tests.rs"]
mod tests;
