use super::*;

#[test]
fn scalar_and_vector_sizes() {
    assert_eq!(GlslType::Float.size_bytes(), 4);
    assert_eq!(GlslType::Int.size_bytes(), 4);
    assert_eq!(GlslType::UInt.size_bytes(), 4);
    assert_eq!(GlslType::Bool.size_bytes(), 4);
    assert_eq!(GlslType::Vec2.size_bytes(), 8);
    assert_eq!(GlslType::Vec3.size_bytes(), 12);
    assert_eq!(GlslType::Vec4.size_bytes(), 16);
    assert_eq!(GlslType::IVec4.size_bytes(), 16);
    assert_eq!(GlslType::UVec3.size_bytes(), 12);
}

#[test]
fn matrix_sizes() {
    assert_eq!(GlslType::Mat2.size_bytes(), 16);
    assert_eq!(GlslType::Mat3.size_bytes(), 36);
    assert_eq!(GlslType::Mat4.size_bytes(), 64);
}

#[test]
fn samplers_are_unit_sized() {
    assert_eq!(GlslType::Sampler2d.size_bytes(), 4);
    assert_eq!(GlslType::SamplerCubeShadow.size_bytes(), 4);
    assert_eq!(GlslType::USampler2d.size_bytes(), 4);
}

#[test]
fn sampler_detection() {
    assert!(GlslType::Sampler2d.is_sampler());
    assert!(GlslType::Sampler2dArrayShadow.is_sampler());
    assert!(GlslType::ISampler2d.is_sampler());
    assert!(!GlslType::Vec4.is_sampler());
    assert!(!GlslType::Mat4.is_sampler());
}

#[test]
fn glsl_spellings() {
    assert_eq!(GlslType::Float.name(), "float");
    assert_eq!(GlslType::IVec3.name(), "ivec3");
    assert_eq!(GlslType::Mat4.name(), "mat4");
    assert_eq!(GlslType::Sampler2d.name(), "sampler2D");
    assert_eq!(GlslType::Sampler2dArrayShadow.name(), "sampler2DArrayShadow");
}

#[test]
fn attrib_layouts() {
    assert_eq!(GlslType::Float.attrib_layout(), (1, 1));
    assert_eq!(GlslType::Vec3.attrib_layout(), (3, 1));
    assert_eq!(GlslType::Vec4.attrib_layout(), (4, 1));
    // Matrices consume one location per column.
    assert_eq!(GlslType::Mat2.attrib_layout(), (2, 2));
    assert_eq!(GlslType::Mat3.attrib_layout(), (3, 3));
    assert_eq!(GlslType::Mat4.attrib_layout(), (4, 4));
}

#[test]
fn stage_names() {
    assert_eq!(ShaderStage::Vertex.name(), "vertex");
    assert_eq!(ShaderStage::Fragment.name(), "fragment");
    assert_eq!(ShaderStage::Geometry.name(), "geometry");
    assert_eq!(ShaderStage::TessellationCtrl.name(), "tessellation control");
    assert_eq!(ShaderStage::TessellationEval.name(), "tessellation evaluation");
}
