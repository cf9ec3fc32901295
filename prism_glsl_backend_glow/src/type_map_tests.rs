use super::*;

#[test]
fn common_types_translate() {
    assert_eq!(glsl_type_from_gl(glow::FLOAT), Some(GlslType::Float));
    assert_eq!(glsl_type_from_gl(glow::FLOAT_VEC3), Some(GlslType::Vec3));
    assert_eq!(glsl_type_from_gl(glow::INT_VEC2), Some(GlslType::IVec2));
    assert_eq!(glsl_type_from_gl(glow::UNSIGNED_INT_VEC4), Some(GlslType::UVec4));
    assert_eq!(glsl_type_from_gl(glow::BOOL), Some(GlslType::Bool));
    assert_eq!(glsl_type_from_gl(glow::FLOAT_MAT4), Some(GlslType::Mat4));
    assert_eq!(glsl_type_from_gl(glow::SAMPLER_2D), Some(GlslType::Sampler2d));
    assert_eq!(
        glsl_type_from_gl(glow::SAMPLER_2D_ARRAY_SHADOW),
        Some(GlslType::Sampler2dArrayShadow)
    );
}

#[test]
fn unmodeled_types_map_to_none() {
    assert_eq!(glsl_type_from_gl(glow::IMAGE_2D), None);
    assert_eq!(glsl_type_from_gl(glow::UNSIGNED_INT_ATOMIC_COUNTER), None);
    assert_eq!(glsl_type_from_gl(0), None);
}

#[test]
fn stage_constants() {
    assert_eq!(shader_stage_to_gl(ShaderStage::Vertex), glow::VERTEX_SHADER);
    assert_eq!(shader_stage_to_gl(ShaderStage::Fragment), glow::FRAGMENT_SHADER);
    assert_eq!(shader_stage_to_gl(ShaderStage::Geometry), glow::GEOMETRY_SHADER);
    assert_eq!(shader_stage_to_gl(ShaderStage::TessellationCtrl), glow::TESS_CONTROL_SHADER);
    assert_eq!(shader_stage_to_gl(ShaderStage::TessellationEval), glow::TESS_EVALUATION_SHADER);
}

#[test]
fn feedback_constants() {
    assert_eq!(
        feedback_format_to_gl(TransformFeedbackFormat::InterleavedAttribs),
        glow::INTERLEAVED_ATTRIBS
    );
    assert_eq!(
        feedback_format_to_gl(TransformFeedbackFormat::SeparateAttribs),
        glow::SEPARATE_ATTRIBS
    );
}

#[test]
fn error_strings() {
    assert_eq!(error_string(glow::NO_ERROR), "NO_ERROR");
    assert_eq!(error_string(glow::INVALID_OPERATION), "INVALID_OPERATION");
    assert_eq!(error_string(glow::OUT_OF_MEMORY), "OUT_OF_MEMORY");
    assert_eq!(error_string(0xDEAD), "UNKNOWN");
}
