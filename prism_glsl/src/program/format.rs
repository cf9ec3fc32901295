//! Program construction format
//!
//! [`Format`] collects everything [`GlslProg::new`](crate::program::GlslProg::new)
//! needs before the link: per-stage sources, name/semantic mappings,
//! pre-link bindings, transform-feedback capture, and preprocessing
//! configuration.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::device::{ShaderStage, TransformFeedbackFormat};
use crate::program::preprocessor::{Define, ShaderPreprocessor};
use crate::program::semantic::{
    AttribSemantic, AttribSemanticMap, UniformSemantic, UniformSemanticMap,
};

/// Builder for [`GlslProg`](crate::program::GlslProg) construction
#[derive(Clone)]
pub struct Format {
    pub(crate) vertex: Option<String>,
    pub(crate) fragment: Option<String>,
    pub(crate) geometry: Option<String>,
    pub(crate) tessellation_ctrl: Option<String>,
    pub(crate) tessellation_eval: Option<String>,

    pub(crate) attrib_semantics: AttribSemanticMap,
    pub(crate) uniform_semantics: UniformSemanticMap,

    pub(crate) attrib_locations: FxHashMap<String, u32>,
    pub(crate) semantic_locations: FxHashMap<AttribSemantic, u32>,
    pub(crate) frag_data_locations: FxHashMap<String, u32>,

    pub(crate) feedback_varyings: Vec<String>,
    pub(crate) feedback_format: TransformFeedbackFormat,

    pub(crate) defines: Vec<Define>,
    pub(crate) version: Option<u32>,
    pub(crate) preprocessing_enabled: bool,
    pub(crate) preprocessor: Option<Arc<dyn ShaderPreprocessor>>,

    pub(crate) label: String,
}

impl Default for Format {
    fn default() -> Self {
        let mut semantic_locations = FxHashMap::default();
        // Position lands at 0 unless overridden, matching the fixed-function
        // convention most drivers use anyway.
        semantic_locations.insert(AttribSemantic::Position, 0);

        Self {
            vertex: None,
            fragment: None,
            geometry: None,
            tessellation_ctrl: None,
            tessellation_eval: None,
            attrib_semantics: AttribSemanticMap::default(),
            uniform_semantics: UniformSemanticMap::default(),
            attrib_locations: FxHashMap::default(),
            semantic_locations,
            frag_data_locations: FxHashMap::default(),
            feedback_varyings: Vec::new(),
            feedback_format: TransformFeedbackFormat::InterleavedAttribs,
            defines: Vec::new(),
            version: None,
            preprocessing_enabled: true,
            preprocessor: None,
            label: String::new(),
        }
    }
}

impl Format {
    /// Create a Format with no sources and default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the vertex stage source
    pub fn vertex(mut self, source: impl Into<String>) -> Self {
        self.vertex = Some(source.into());
        self
    }

    /// Supply the fragment stage source
    pub fn fragment(mut self, source: impl Into<String>) -> Self {
        self.fragment = Some(source.into());
        self
    }

    /// Supply the geometry stage source
    pub fn geometry(mut self, source: impl Into<String>) -> Self {
        self.geometry = Some(source.into());
        self
    }

    /// Supply the tessellation control stage source
    pub fn tessellation_ctrl(mut self, source: impl Into<String>) -> Self {
        self.tessellation_ctrl = Some(source.into());
        self
    }

    /// Supply the tessellation evaluation stage source
    pub fn tessellation_eval(mut self, source: impl Into<String>) -> Self {
        self.tessellation_eval = Some(source.into());
        self
    }

    /// Map an attribute name to a semantic for this program
    pub fn attrib(mut self, semantic: AttribSemantic, name: impl Into<String>) -> Self {
        self.attrib_semantics.insert(name.into(), semantic);
        self
    }

    /// Map a uniform name to a semantic for this program
    pub fn uniform_semantic(mut self, semantic: UniformSemantic, name: impl Into<String>) -> Self {
        self.uniform_semantics.insert(name.into(), semantic);
        self
    }

    /// Bind a named attribute to a location before linking
    pub fn attrib_location(mut self, name: impl Into<String>, location: u32) -> Self {
        self.attrib_locations.insert(name.into(), location);
        self
    }

    /// Bind the attribute carrying `semantic` to a location before linking
    pub fn attrib_location_semantic(mut self, semantic: AttribSemantic, location: u32) -> Self {
        self.semantic_locations.insert(semantic, location);
        self
    }

    /// Bind a fragment output name to a color number before linking
    pub fn frag_data_location(mut self, color_number: u32, name: impl Into<String>) -> Self {
        self.frag_data_locations.insert(name.into(), color_number);
        self
    }

    /// Declare the varyings to capture with transform feedback
    pub fn feedback_varyings<I, S>(mut self, varyings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feedback_varyings = varyings.into_iter().map(Into::into).collect();
        self
    }

    /// Set the transform-feedback capture layout
    pub fn feedback_format(mut self, format: TransformFeedbackFormat) -> Self {
        self.feedback_format = format;
        self
    }

    /// Add a valueless `#define` to every stage
    pub fn define(mut self, name: impl Into<String>) -> Self {
        self.defines.push(Define { name: name.into(), value: None });
        self
    }

    /// Add a `#define name value` to every stage
    pub fn define_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defines.push(Define { name: name.into(), value: Some(value.into()) });
        self
    }

    /// Set the `#version` injected into sources that lack one
    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Enable or disable source preprocessing (enabled by default)
    pub fn preprocess(mut self, enabled: bool) -> Self {
        self.preprocessing_enabled = enabled;
        self
    }

    /// Supply a preprocessor, replacing the default directive injector
    pub fn preprocessor(mut self, preprocessor: Arc<dyn ShaderPreprocessor>) -> Self {
        self.preprocessor = Some(preprocessor);
        self
    }

    /// Set the debug label attached to the program object
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    // ----- getters -----

    /// Vertex stage source, if set
    pub fn vertex_source(&self) -> Option<&str> {
        self.vertex.as_deref()
    }

    /// Fragment stage source, if set
    pub fn fragment_source(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Geometry stage source, if set
    pub fn geometry_source(&self) -> Option<&str> {
        self.geometry.as_deref()
    }

    /// Tessellation control stage source, if set
    pub fn tessellation_ctrl_source(&self) -> Option<&str> {
        self.tessellation_ctrl.as_deref()
    }

    /// Tessellation evaluation stage source, if set
    pub fn tessellation_eval_source(&self) -> Option<&str> {
        self.tessellation_eval.as_deref()
    }

    /// Per-program attribute semantic mappings
    pub fn attrib_semantics(&self) -> &AttribSemanticMap {
        &self.attrib_semantics
    }

    /// Per-program uniform semantic mappings
    pub fn uniform_semantics(&self) -> &UniformSemanticMap {
        &self.uniform_semantics
    }

    /// Varyings declared for transform-feedback capture
    pub fn transform_feedback_varyings(&self) -> &[String] {
        &self.feedback_varyings
    }

    /// Transform-feedback capture layout
    pub fn transform_feedback_format(&self) -> TransformFeedbackFormat {
        self.feedback_format
    }

    /// Configured `#define` directives
    pub fn defines(&self) -> &[Define] {
        &self.defines
    }

    /// Configured `#version`, if any
    pub fn glsl_version(&self) -> Option<u32> {
        self.version
    }

    /// Whether preprocessing is enabled
    pub fn preprocessing_enabled(&self) -> bool {
        self.preprocessing_enabled
    }

    /// Debug label
    pub fn debug_label(&self) -> &str {
        &self.label
    }

    pub(crate) fn stage_sources(&self) -> [(ShaderStage, Option<&str>); 5] {
        [
            (ShaderStage::Vertex, self.vertex.as_deref()),
            (ShaderStage::Fragment, self.fragment.as_deref()),
            (ShaderStage::Geometry, self.geometry.as_deref()),
            (ShaderStage::TessellationCtrl, self.tessellation_ctrl.as_deref()),
            (ShaderStage::TessellationEval, self.tessellation_eval.as_deref()),
        ]
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
