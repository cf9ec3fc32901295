//! Attribute and uniform semantics
//!
//! Semantics decouple GLSL variable names from their engine-level meaning:
//! a Format can map any name to a semantic, and well-known `pr`-prefixed
//! names resolve through the default tables below.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// Engine-level meaning of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttribSemantic {
    /// Vertex position
    Position,
    /// Vertex normal
    Normal,
    /// Vertex tangent
    Tangent,
    /// Vertex bitangent
    Bitangent,
    /// Vertex color
    Color,
    /// Texture coordinate set 0
    TexCoord0,
    /// Texture coordinate set 1
    TexCoord1,
    /// Texture coordinate set 2
    TexCoord2,
    /// Texture coordinate set 3
    TexCoord3,
    /// Skinning bone indices
    BoneIndex,
    /// Skinning bone weights
    BoneWeight,
    /// No engine-level meaning
    UserDefined,
}

/// Engine-level meaning of a uniform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformSemantic {
    /// Model (object-to-world) matrix
    ModelMatrix,
    /// View (world-to-eye) matrix
    ViewMatrix,
    /// Projection matrix
    ProjectionMatrix,
    /// Combined model-view matrix
    ModelView,
    /// Combined model-view-projection matrix
    ModelViewProjection,
    /// Normal matrix (inverse-transpose of the model-view)
    NormalMatrix,
    /// Viewport size in pixels
    ViewportSize,
    /// Window size in pixels
    WindowSize,
    /// Seconds since application start
    ElapsedSeconds,
    /// No engine-level meaning
    UserDefined,
}

/// Map from attribute name to semantic
pub type AttribSemanticMap = FxHashMap<String, AttribSemantic>;

/// Map from uniform name to semantic
pub type UniformSemanticMap = FxHashMap<String, UniformSemantic>;

static DEFAULT_ATTRIB_SEMANTICS: LazyLock<AttribSemanticMap> = LazyLock::new(|| {
    let mut map = AttribSemanticMap::default();
    map.insert("prPosition".to_string(), AttribSemantic::Position);
    map.insert("prNormal".to_string(), AttribSemantic::Normal);
    map.insert("prTangent".to_string(), AttribSemantic::Tangent);
    map.insert("prBitangent".to_string(), AttribSemantic::Bitangent);
    map.insert("prColor".to_string(), AttribSemantic::Color);
    map.insert("prTexCoord0".to_string(), AttribSemantic::TexCoord0);
    map.insert("prTexCoord1".to_string(), AttribSemantic::TexCoord1);
    map.insert("prTexCoord2".to_string(), AttribSemantic::TexCoord2);
    map.insert("prTexCoord3".to_string(), AttribSemantic::TexCoord3);
    map.insert("prBoneIndex".to_string(), AttribSemantic::BoneIndex);
    map.insert("prBoneWeight".to_string(), AttribSemantic::BoneWeight);
    map
});

static DEFAULT_UNIFORM_SEMANTICS: LazyLock<UniformSemanticMap> = LazyLock::new(|| {
    let mut map = UniformSemanticMap::default();
    map.insert("prModelMatrix".to_string(), UniformSemantic::ModelMatrix);
    map.insert("prViewMatrix".to_string(), UniformSemantic::ViewMatrix);
    map.insert("prProjectionMatrix".to_string(), UniformSemantic::ProjectionMatrix);
    map.insert("prModelView".to_string(), UniformSemantic::ModelView);
    map.insert("prModelViewProjection".to_string(), UniformSemantic::ModelViewProjection);
    map.insert("prNormalMatrix".to_string(), UniformSemantic::NormalMatrix);
    map.insert("prViewportSize".to_string(), UniformSemantic::ViewportSize);
    map.insert("prWindowSize".to_string(), UniformSemantic::WindowSize);
    map.insert("prElapsedSeconds".to_string(), UniformSemantic::ElapsedSeconds);
    map
});

/// Default mapping from attribute name to semantic
///
/// Shared and immutable; per-Format mappings take precedence.
pub fn default_attrib_semantics() -> &'static AttribSemanticMap {
    &DEFAULT_ATTRIB_SEMANTICS
}

/// Default mapping from uniform name to semantic
///
/// Shared and immutable; per-Format mappings take precedence.
pub fn default_uniform_semantics() -> &'static UniformSemanticMap {
    &DEFAULT_UNIFORM_SEMANTICS
}

/// Default GLSL name for an attribute semantic, if one exists
pub(crate) fn default_attrib_name(semantic: AttribSemantic) -> Option<&'static str> {
    DEFAULT_ATTRIB_SEMANTICS
        .iter()
        .find(|(_, s)| **s == semantic)
        .map(|(name, _)| name.as_str())
}

#[cfg(test)]
#[path = "semantic_tests.rs"]
mod tests;
