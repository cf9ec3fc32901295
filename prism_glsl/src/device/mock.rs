//! Mock GlDevice for unit tests (no GPU required)
//!
//! The mock is scripted: tests declare the active uniforms, attributes,
//! blocks and varyings the "driver" should report after linking, and can
//! force compile/link failures. Every call and every uniform upload is
//! recorded for assertions.

use std::cell::{Cell, RefCell};

use rustc_hash::FxHashMap;

use crate::device::{
    ActiveUniformBlock, ActiveVar, GlDevice, GlslType, ProgramHandle, ShaderHandle, ShaderStage,
    TransformFeedbackFormat,
};
use crate::error::Result;

/// A scripted active uniform: the driver-reported variable plus its
/// location (-1 for block members).
#[derive(Debug, Clone)]
pub struct MockUniform {
    pub var: ActiveVar,
    pub location: i32,
}

/// A recorded uniform upload
#[derive(Debug, Clone, PartialEq)]
pub enum Upload {
    F32 { location: i32, dim: u8, values: Vec<f32> },
    I32 { location: i32, dim: u8, values: Vec<i32> },
    U32 { location: i32, dim: u8, values: Vec<u32> },
    Matrix { location: i32, dim: u8, transpose: bool, values: Vec<f32> },
}

/// Mock GlDevice that records calls without a GPU
#[derive(Default)]
pub struct MockDevice {
    /// Call trace, one entry per device call
    pub calls: RefCell<Vec<String>>,
    /// Recorded uniform uploads
    pub uploads: RefCell<Vec<Upload>>,
    /// Currently bound program
    pub bound: Cell<Option<ProgramHandle>>,

    /// Stages that should fail to compile, with the info log to report
    pub fail_compile: RefCell<FxHashMap<ShaderStage, String>>,
    /// When set, linking fails with this info log
    pub fail_link: RefCell<Option<String>>,

    /// Scripted active attributes, with their post-link locations
    pub attribs: RefCell<Vec<(ActiveVar, i32)>>,
    /// Scripted active uniforms
    pub uniforms: RefCell<Vec<MockUniform>>,
    /// Scripted uniform blocks
    pub blocks: RefCell<Vec<ActiveUniformBlock>>,
    /// Scripted transform-feedback varyings
    pub varyings: RefCell<Vec<ActiveVar>>,

    next_id: Cell<u32>,
    shader_stages: RefCell<FxHashMap<u32, ShaderStage>>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an active attribute
    pub fn with_attrib(self, name: &str, ty: GlslType, count: i32, location: i32) -> Self {
        self.attribs.borrow_mut().push((
            ActiveVar { name: name.to_string(), ty, count },
            location,
        ));
        self
    }

    /// Script an active uniform (location -1 marks a block member)
    pub fn with_uniform(self, name: &str, ty: GlslType, count: i32, location: i32) -> Self {
        self.uniforms.borrow_mut().push(MockUniform {
            var: ActiveVar { name: name.to_string(), ty, count },
            location,
        });
        self
    }

    /// Script a uniform block
    pub fn with_block(self, block: ActiveUniformBlock) -> Self {
        self.blocks.borrow_mut().push(block);
        self
    }

    /// Script a transform-feedback varying
    pub fn with_varying(self, name: &str, ty: GlslType, count: i32) -> Self {
        self.varyings.borrow_mut().push(ActiveVar { name: name.to_string(), ty, count });
        self
    }

    /// Force compilation of `stage` to fail with `log`
    pub fn fail_compile(self, stage: ShaderStage, log: &str) -> Self {
        self.fail_compile.borrow_mut().insert(stage, log.to_string());
        self
    }

    /// Force linking to fail with `log`
    pub fn fail_link(self, log: &str) -> Self {
        *self.fail_link.borrow_mut() = Some(log.to_string());
        self
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn next(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    /// Calls recorded so far, for order assertions
    pub fn call_trace(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Uploads recorded so far
    pub fn recorded_uploads(&self) -> Vec<Upload> {
        self.uploads.borrow().clone()
    }
}

impl GlDevice for MockDevice {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle> {
        let id = self.next();
        self.shader_stages.borrow_mut().insert(id, stage);
        self.record(format!("create_shader({})", stage.name()));
        Ok(ShaderHandle(id))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        self.record(format!("shader_source({}, {} bytes)", shader.0, source.len()));
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        self.record(format!("compile_shader({})", shader.0));
    }

    fn compile_status(&self, shader: ShaderHandle) -> bool {
        let stages = self.shader_stages.borrow();
        match stages.get(&shader.0) {
            Some(stage) => !self.fail_compile.borrow().contains_key(stage),
            None => false,
        }
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        let stages = self.shader_stages.borrow();
        stages
            .get(&shader.0)
            .and_then(|stage| self.fail_compile.borrow().get(stage).cloned())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        self.record(format!("delete_shader({})", shader.0));
    }

    fn create_program(&self) -> Result<ProgramHandle> {
        let id = self.next();
        self.record("create_program");
        Ok(ProgramHandle(id))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record(format!("attach_shader({}, {})", program.0, shader.0));
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record(format!("detach_shader({}, {})", program.0, shader.0));
    }

    fn bind_attrib_location(&self, _program: ProgramHandle, location: u32, name: &str) {
        self.record(format!("bind_attrib_location({}, {})", location, name));
    }

    fn bind_frag_data_location(&self, _program: ProgramHandle, color_number: u32, name: &str) {
        self.record(format!("bind_frag_data_location({}, {})", color_number, name));
    }

    fn transform_feedback_varyings(
        &self,
        _program: ProgramHandle,
        varyings: &[String],
        format: TransformFeedbackFormat,
    ) {
        self.record(format!(
            "transform_feedback_varyings([{}], {:?})",
            varyings.join(", "),
            format
        ));
    }

    fn link_program(&self, program: ProgramHandle) {
        self.record(format!("link_program({})", program.0));
    }

    fn link_status(&self, _program: ProgramHandle) -> bool {
        self.fail_link.borrow().is_none()
    }

    fn program_info_log(&self, _program: ProgramHandle) -> String {
        self.fail_link.borrow().clone().unwrap_or_default()
    }

    fn delete_program(&self, program: ProgramHandle) {
        self.record(format!("delete_program({})", program.0));
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        self.bound.set(program);
        match program {
            Some(p) => self.record(format!("use_program({})", p.0)),
            None => self.record("use_program(None)"),
        }
    }

    fn active_attrib_count(&self, _program: ProgramHandle) -> u32 {
        self.attribs.borrow().len() as u32
    }

    fn active_attrib(&self, _program: ProgramHandle, index: u32) -> Option<ActiveVar> {
        self.attribs.borrow().get(index as usize).map(|(var, _)| var.clone())
    }

    fn attrib_location(&self, _program: ProgramHandle, name: &str) -> i32 {
        self.attribs
            .borrow()
            .iter()
            .find(|(var, _)| var.name == name)
            .map(|(_, loc)| *loc)
            .unwrap_or(-1)
    }

    fn active_uniform_count(&self, _program: ProgramHandle) -> u32 {
        self.uniforms.borrow().len() as u32
    }

    fn active_uniform(&self, _program: ProgramHandle, index: u32) -> Option<ActiveVar> {
        self.uniforms.borrow().get(index as usize).map(|u| u.var.clone())
    }

    fn uniform_location(&self, _program: ProgramHandle, name: &str) -> i32 {
        // The driver accepts both "name" and "name[0]" for arrays.
        let uniforms = self.uniforms.borrow();
        uniforms
            .iter()
            .find(|u| {
                u.var.name == name
                    || u.var.name == format!("{}[0]", name)
                    || format!("{}[0]", u.var.name) == name
            })
            .map(|u| u.location)
            .unwrap_or(-1)
    }

    fn active_uniform_block_count(&self, _program: ProgramHandle) -> u32 {
        self.blocks.borrow().len() as u32
    }

    fn active_uniform_block(
        &self,
        _program: ProgramHandle,
        block_index: u32,
    ) -> Option<ActiveUniformBlock> {
        self.blocks.borrow().get(block_index as usize).cloned()
    }

    fn uniform_block_binding(&self, _program: ProgramHandle, block_index: u32, binding: u32) {
        self.record(format!("uniform_block_binding({}, {})", block_index, binding));
        if let Some(block) = self.blocks.borrow_mut().get_mut(block_index as usize) {
            block.binding = binding as i32;
        }
    }

    fn transform_feedback_varying_count(&self, _program: ProgramHandle) -> u32 {
        self.varyings.borrow().len() as u32
    }

    fn transform_feedback_varying(&self, _program: ProgramHandle, index: u32) -> Option<ActiveVar> {
        self.varyings.borrow().get(index as usize).cloned()
    }

    fn uniform_f32(&self, location: i32, dim: u8, values: &[f32]) {
        self.uploads.borrow_mut().push(Upload::F32 { location, dim, values: values.to_vec() });
    }

    fn uniform_i32(&self, location: i32, dim: u8, values: &[i32]) {
        self.uploads.borrow_mut().push(Upload::I32 { location, dim, values: values.to_vec() });
    }

    fn uniform_u32(&self, location: i32, dim: u8, values: &[u32]) {
        self.uploads.borrow_mut().push(Upload::U32 { location, dim, values: values.to_vec() });
    }

    fn uniform_matrix(&self, location: i32, dim: u8, transpose: bool, values: &[f32]) {
        self.uploads.borrow_mut().push(Upload::Matrix {
            location,
            dim,
            transpose,
            values: values.to_vec(),
        });
    }

    fn object_label(&self, program: ProgramHandle, label: &str) {
        self.record(format!("object_label({}, {})", program.0, label));
    }
}
