//! GLSL program object
//!
//! [`GlslProg`] owns a linked program on a [`GlDevice`], caches the
//! driver-reported reflection data (attributes, uniforms, uniform blocks,
//! transform-feedback varyings), and exposes typed uniform setters that
//! validate against the reflected types instead of trusting the caller.
//!
//! Setter misuse is tolerated: a missing name, a type mismatch, or an
//! out-of-range element is logged once per offender and the upload is
//! skipped, so a hot render loop never spams the log or trips the driver.

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::device::{GlDevice, ProgramHandle, ShaderHandle, TransformFeedbackFormat};
use crate::error::{Error, Result};
use crate::program::format::Format;
use crate::program::preprocessor::{DirectivePreprocessor, ShaderPreprocessor};
use crate::program::reflection::{
    Attribute, TransformFeedbackVarying, Uniform, UniformBlock,
};
use crate::program::semantic::{
    default_attrib_name, default_attrib_semantics, default_uniform_semantics, AttribSemantic,
    UniformSemantic,
};
use crate::program::uniform_value::UniformValue;
use crate::program::value_cache::UniformValueCache;
use crate::{prism_debug, prism_error, prism_warn};

const SOURCE: &str = "prism::glsl";

/// A compiled and linked GLSL program
pub struct GlslProg {
    device: Arc<dyn GlDevice>,
    handle: ProgramHandle,

    attributes: Vec<Attribute>,
    uniforms: Vec<Uniform>,
    uniform_blocks: Vec<UniformBlock>,
    tf_varyings: Vec<TransformFeedbackVarying>,
    tf_format: TransformFeedbackFormat,

    value_cache: RefCell<UniformValueCache>,
    logged_names: RefCell<FxHashSet<String>>,
    logged_locations: RefCell<FxHashSet<i32>>,

    included_files: Vec<PathBuf>,
    label: String,
}

impl GlslProg {
    /// Compile, link, and reflect a program described by `format`
    ///
    /// Stage sources are preprocessed (unless disabled), compiled, and
    /// attached; attribute, fragment-output, and transform-feedback
    /// bindings from the format are applied before the link. On success
    /// all reflection data is cached so queries never touch the driver.
    pub fn new(device: Arc<dyn GlDevice>, format: &Format) -> Result<GlslProg> {
        if format.stage_sources().iter().all(|(_, src)| src.is_none()) {
            return Err(Error::InvalidResource(
                "program format carries no shader sources".to_string(),
            ));
        }

        let handle = device.create_program()?;
        let mut shaders: Vec<ShaderHandle> = Vec::new();
        let mut included_files: Vec<PathBuf> = Vec::new();

        for (stage, source) in format.stage_sources() {
            let Some(source) = source else { continue };

            let processed;
            let source = if format.preprocessing_enabled {
                let result = match &format.preprocessor {
                    Some(pre) => pre.process(source, stage),
                    None => DirectivePreprocessor::new(format.version, &format.defines)
                        .process(source, stage),
                };
                processed = match result {
                    Ok(processed) => processed,
                    Err(err) => {
                        Self::cleanup(&device, handle, &shaders);
                        return Err(err);
                    }
                };
                included_files.extend(processed.included_files.iter().cloned());
                processed.source.as_str()
            } else {
                source
            };

            let shader = match device.create_shader(stage) {
                Ok(shader) => shader,
                Err(err) => {
                    Self::cleanup(&device, handle, &shaders);
                    return Err(err);
                }
            };
            device.shader_source(shader, source);
            device.compile_shader(shader);
            if !device.compile_status(shader) {
                let log = device.shader_info_log(shader);
                prism_error!(SOURCE, "{} shader failed to compile: {}", stage.name(), log);
                device.delete_shader(shader);
                Self::cleanup(&device, handle, &shaders);
                return Err(Error::CompileFailed { stage, log });
            }
            device.attach_shader(handle, shader);
            shaders.push(shader);
        }

        // Pre-link state: explicit locations by name, then by semantic.
        for (name, location) in &format.attrib_locations {
            device.bind_attrib_location(handle, *location, name);
        }
        for (semantic, location) in &format.semantic_locations {
            let name = format
                .attrib_semantics
                .iter()
                .find(|(_, s)| *s == semantic)
                .map(|(name, _)| name.as_str())
                .or_else(|| default_attrib_name(*semantic));
            if let Some(name) = name {
                if !format.attrib_locations.contains_key(name) {
                    device.bind_attrib_location(handle, *location, name);
                }
            }
        }
        for (name, color_number) in &format.frag_data_locations {
            device.bind_frag_data_location(handle, *color_number, name);
        }
        if !format.feedback_varyings.is_empty() {
            device.transform_feedback_varyings(
                handle,
                &format.feedback_varyings,
                format.feedback_format,
            );
        }

        device.link_program(handle);
        if !device.link_status(handle) {
            let log = device.program_info_log(handle);
            prism_error!(SOURCE, "program failed to link: {}", log);
            Self::cleanup(&device, handle, &shaders);
            return Err(Error::LinkFailed(log));
        }

        for shader in &shaders {
            device.detach_shader(handle, *shader);
            device.delete_shader(*shader);
        }

        let mut prog = GlslProg {
            device,
            handle,
            attributes: Vec::new(),
            uniforms: Vec::new(),
            uniform_blocks: Vec::new(),
            tf_varyings: Vec::new(),
            tf_format: format.feedback_format,
            value_cache: RefCell::new(UniformValueCache::new(0)),
            logged_names: RefCell::new(FxHashSet::default()),
            logged_locations: RefCell::new(FxHashSet::default()),
            included_files,
            label: format.label.clone(),
        };
        prog.cache_reflection(format);

        if !prog.label.is_empty() {
            prog.device.object_label(prog.handle, &prog.label);
        }
        prism_debug!(
            SOURCE,
            "linked program {} ({} attributes, {} uniforms, {} blocks, {} varyings)",
            prog.handle.0,
            prog.attributes.len(),
            prog.uniforms.len(),
            prog.uniform_blocks.len(),
            prog.tf_varyings.len()
        );

        Ok(prog)
    }

    fn cleanup(device: &Arc<dyn GlDevice>, handle: ProgramHandle, shaders: &[ShaderHandle]) {
        for shader in shaders {
            device.detach_shader(handle, *shader);
            device.delete_shader(*shader);
        }
        device.delete_program(handle);
    }

    fn cache_reflection(&mut self, format: &Format) {
        let device = &self.device;

        // Blocks first so block-resident uniforms can be routed to their
        // owner while walking the active uniform list.
        let mut member_block: FxHashMap<u32, usize> = FxHashMap::default();
        for block_index in 0..device.active_uniform_block_count(self.handle) {
            let Some(active) = device.active_uniform_block(self.handle, block_index) else {
                continue;
            };
            for uniform_index in &active.uniform_indices {
                member_block.insert(*uniform_index, self.uniform_blocks.len());
            }
            self.uniform_blocks.push(UniformBlock {
                name: active.name,
                data_size: active.data_size,
                index: block_index as i32,
                binding: active.binding,
                active_uniforms: Vec::new(),
                offsets: active.offsets,
                array_strides: active.array_strides,
                matrix_strides: active.matrix_strides,
            });
        }

        let mut total_bytes = 0usize;
        for index in 0..device.active_uniform_count(self.handle) {
            let Some(var) = device.active_uniform(self.handle, index) else { continue };
            if var.name.starts_with("gl_") {
                continue;
            }
            // Arrays are reported as "name[0]"; cache the bare name.
            let name = var.name.strip_suffix("[0]").unwrap_or(&var.name).to_string();
            let semantic = format
                .uniform_semantics
                .get(&name)
                .or_else(|| default_uniform_semantics().get(&name))
                .copied()
                .unwrap_or(UniformSemantic::UserDefined);
            let type_size = var.ty.size_bytes();

            if let Some(block_slot) = member_block.get(&index) {
                self.uniform_blocks[*block_slot].active_uniforms.push(Uniform {
                    name,
                    count: var.count,
                    location: -1,
                    index: index as i32,
                    ty: var.ty,
                    semantic,
                    type_size,
                    byte_offset: 0,
                });
                continue;
            }

            let location = device.uniform_location(self.handle, &name);
            self.uniforms.push(Uniform {
                name,
                count: var.count,
                location,
                index: index as i32,
                ty: var.ty,
                semantic,
                type_size,
                byte_offset: total_bytes,
            });
            total_bytes += type_size * var.count.max(1) as usize;
        }
        self.value_cache = RefCell::new(UniformValueCache::new(total_bytes));

        for index in 0..device.active_attrib_count(self.handle) {
            let Some(var) = device.active_attrib(self.handle, index) else { continue };
            if var.name.starts_with("gl_") {
                continue;
            }
            let location = device.attrib_location(self.handle, &var.name);
            let semantic = format
                .attrib_semantics
                .get(&var.name)
                .or_else(|| default_attrib_semantics().get(&var.name))
                .copied()
                .unwrap_or(AttribSemantic::UserDefined);
            self.attributes.push(Attribute {
                name: var.name,
                count: var.count,
                location,
                ty: var.ty,
                semantic,
            });
        }

        for index in 0..device.transform_feedback_varying_count(self.handle) {
            let Some(var) = device.transform_feedback_varying(self.handle, index) else {
                continue;
            };
            self.tf_varyings.push(TransformFeedbackVarying {
                name: var.name,
                count: var.count,
                ty: var.ty,
            });
        }
    }

    /// Make this program current
    pub fn bind(&self) {
        self.device.use_program(Some(self.handle));
    }

    /// Underlying program handle
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    // ----- uniform setters -----

    /// Set a uniform by name (accepts `name` and `name[i]` forms)
    pub fn uniform<T: UniformValue>(&self, name: &str, value: T) {
        self.set_uniform_by_name(name, &[value], false);
    }

    /// Set a uniform by location
    pub fn uniform_at<T: UniformValue>(&self, location: i32, value: T) {
        self.set_uniform_by_location(location, &[value], false);
    }

    /// Set the elements of a uniform array by name
    pub fn uniform_array<T: UniformValue>(&self, name: &str, values: &[T]) {
        self.set_uniform_by_name(name, values, false);
    }

    /// Set the elements of a uniform array by location
    pub fn uniform_array_at<T: UniformValue>(&self, location: i32, values: &[T]) {
        self.set_uniform_by_location(location, values, false);
    }

    /// Set a matrix uniform by name, optionally transposing on upload
    pub fn uniform_matrix<T: UniformValue>(&self, name: &str, value: T, transpose: bool) {
        self.set_uniform_by_name(name, &[value], transpose);
    }

    /// Set a matrix uniform by location, optionally transposing on upload
    pub fn uniform_matrix_at<T: UniformValue>(&self, location: i32, value: T, transpose: bool) {
        self.set_uniform_by_location(location, &[value], transpose);
    }

    /// Set the elements of a matrix uniform array by name
    pub fn uniform_matrix_array<T: UniformValue>(&self, name: &str, values: &[T], transpose: bool) {
        self.set_uniform_by_name(name, values, transpose);
    }

    fn set_uniform_by_name<T: UniformValue>(&self, name: &str, values: &[T], transpose: bool) {
        let (base, element) = split_array_element(name);
        let Some(uniform) = self.uniforms.iter().find(|u| u.name == base) else {
            self.warn_once_name(name, || {
                format!("uniform \"{}\" not found in program, ignoring", name)
            });
            return;
        };
        self.upload(uniform, name, element, values, transpose);
    }

    fn set_uniform_by_location<T: UniformValue>(
        &self,
        location: i32,
        values: &[T],
        transpose: bool,
    ) {
        let found = self
            .uniforms
            .iter()
            .find(|u| u.location >= 0 && location >= u.location && location < u.location + u.count);
        let Some(uniform) = found else {
            if self.logged_locations.borrow_mut().insert(location) {
                prism_warn!(SOURCE, "no uniform at location {}, ignoring", location);
            }
            return;
        };
        let element = (location - uniform.location) as usize;
        self.upload(uniform, &uniform.name, element, values, transpose);
    }

    fn upload<T: UniformValue>(
        &self,
        uniform: &Uniform,
        logged_as: &str,
        element: usize,
        values: &[T],
        transpose: bool,
    ) {
        if uniform.location < 0 {
            self.warn_once_name(logged_as, || {
                format!(
                    "uniform \"{}\" lives in a uniform block and cannot be set directly",
                    uniform.name
                )
            });
            return;
        }
        if !T::accepted_types().contains(&uniform.ty) {
            self.warn_once_name(logged_as, || {
                format!(
                    "uniform \"{}\" is declared {} but was set with {}, ignoring",
                    uniform.name,
                    uniform.ty.name(),
                    T::glsl_name()
                )
            });
            return;
        }
        if element + values.len() > uniform.count.max(1) as usize {
            self.warn_once_name(logged_as, || {
                format!(
                    "uniform \"{}\" has {} element(s) but {} would be written from element {}",
                    uniform.name,
                    uniform.count,
                    values.len(),
                    element
                )
            });
            return;
        }

        let offset = uniform.byte_offset + element * uniform.type_size;
        let bytes = T::cache_bytes(values);
        if self.value_cache.borrow_mut().check_and_store(offset, &bytes) {
            return;
        }

        self.bind();
        T::upload(
            self.device.as_ref(),
            uniform.location + element as i32,
            values,
            transpose,
        );
    }

    fn warn_once_name(&self, name: &str, message: impl FnOnce() -> String) {
        if self.logged_names.borrow_mut().insert(name.to_string()) {
            prism_warn!(SOURCE, "{}", message());
        }
    }

    // ----- attribute queries -----

    /// Active attribute with the given name
    pub fn find_attrib(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Active attribute carrying the given semantic
    pub fn find_attrib_by_semantic(&self, semantic: AttribSemantic) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.semantic == semantic)
    }

    /// Location of a named attribute
    pub fn attrib_location(&self, name: &str) -> Option<i32> {
        self.find_attrib(name).map(|a| a.location)
    }

    /// Location of the attribute carrying the given semantic
    pub fn attrib_semantic_location(&self, semantic: AttribSemantic) -> Option<i32> {
        self.find_attrib_by_semantic(semantic).map(|a| a.location)
    }

    /// Whether any active attribute carries the given semantic
    pub fn has_attrib_semantic(&self, semantic: AttribSemantic) -> bool {
        self.find_attrib_by_semantic(semantic).is_some()
    }

    /// All active attributes
    pub fn active_attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    // ----- uniform queries -----

    /// Active (non-block) uniform with the given name
    pub fn find_uniform(&self, name: &str) -> Option<&Uniform> {
        let (base, _) = split_array_element(name);
        self.uniforms.iter().find(|u| u.name == base)
    }

    /// Location of a named uniform (resolves `name[i]` to the element location)
    pub fn uniform_location(&self, name: &str) -> Option<i32> {
        let (base, element) = split_array_element(name);
        self.uniforms
            .iter()
            .find(|u| u.name == base && (element as i32) < u.count.max(1))
            .map(|u| u.location + element as i32)
    }

    /// All active uniforms outside uniform blocks
    pub fn active_uniforms(&self) -> &[Uniform] {
        &self.uniforms
    }

    // ----- uniform block queries -----

    /// Active uniform block with the given name
    pub fn find_uniform_block(&self, name: &str) -> Option<&UniformBlock> {
        self.uniform_blocks.iter().find(|b| b.name == name)
    }

    /// Index of a named uniform block
    pub fn uniform_block_index(&self, name: &str) -> Option<i32> {
        self.find_uniform_block(name).map(|b| b.index)
    }

    /// Data size of the block at `index`
    pub fn uniform_block_size(&self, index: i32) -> Option<i32> {
        self.uniform_blocks.iter().find(|b| b.index == index).map(|b| b.data_size)
    }

    /// Assign a named uniform block to a buffer binding point
    pub fn uniform_block_binding(&mut self, name: &str, binding: u32) {
        let Some(slot) = self.uniform_blocks.iter().position(|b| b.name == name) else {
            prism_warn!(SOURCE, "uniform block \"{}\" not found in program, ignoring", name);
            return;
        };
        let index = self.uniform_blocks[slot].index as u32;
        self.device.uniform_block_binding(self.handle, index, binding);
        self.uniform_blocks[slot].binding = binding as i32;
    }

    /// Assign the uniform block at `index` to a buffer binding point
    pub fn uniform_block_binding_at(&mut self, index: i32, binding: u32) {
        let Some(block) = self.uniform_blocks.iter_mut().find(|b| b.index == index) else {
            prism_warn!(SOURCE, "no uniform block at index {}, ignoring", index);
            return;
        };
        block.binding = binding as i32;
        self.device.uniform_block_binding(self.handle, index as u32, binding);
    }

    /// All active uniform blocks
    pub fn active_uniform_blocks(&self) -> &[UniformBlock] {
        &self.uniform_blocks
    }

    // ----- transform feedback queries -----

    /// Captured varying with the given name
    pub fn find_transform_feedback_varying(&self, name: &str) -> Option<&TransformFeedbackVarying> {
        self.tf_varyings.iter().find(|v| v.name == name)
    }

    /// All captured varyings
    pub fn active_transform_feedback_varyings(&self) -> &[TransformFeedbackVarying] {
        &self.tf_varyings
    }

    /// Capture layout declared at link time
    pub fn transform_feedback_format(&self) -> TransformFeedbackFormat {
        self.tf_format
    }

    // ----- misc -----

    /// Debug label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the debug label on this program
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.device.object_label(self.handle, &self.label);
    }

    /// Files pulled in by the preprocessor while building this program
    pub fn included_files(&self) -> &[PathBuf] {
        &self.included_files
    }
}

impl Drop for GlslProg {
    fn drop(&mut self) {
        self.device.delete_program(self.handle);
    }
}

impl std::fmt::Debug for GlslProg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlslProg")
            .field("handle", &self.handle)
            .field("label", &self.label)
            .field("attributes", &self.attributes)
            .field("uniforms", &self.uniforms)
            .field("uniform_blocks", &self.uniform_blocks)
            .field("tf_varyings", &self.tf_varyings)
            .finish()
    }
}

/// Split `name[i]` into the base name and element index; plain names map
/// to element 0.
fn split_array_element(name: &str) -> (&str, usize) {
    if let Some(stripped) = name.strip_suffix(']') {
        if let Some(bracket) = stripped.rfind('[') {
            if let Ok(element) = stripped[bracket + 1..].parse::<usize>() {
                return (&name[..bracket], element);
            }
        }
    }
    (name, 0)
}

#[cfg(test)]
#[path = "glsl_prog_tests.rs"]
mod tests;
