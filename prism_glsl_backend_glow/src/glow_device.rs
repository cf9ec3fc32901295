//! GlDevice over a glow context
//!
//! Handles issued to the program layer are plain integers; the device
//! keeps the id-to-native-object maps so the trait stays independent of
//! glow's handle types. All calls assume the context is current on the
//! calling thread.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use glow::HasContext;
use rustc_hash::FxHashMap;

use prism_glsl::{
    prism_warn, ActiveUniformBlock, ActiveVar, GlDevice, ProgramHandle, Result, ShaderHandle,
    ShaderStage, TransformFeedbackFormat,
};

use crate::type_map::{
    error_string, feedback_format_to_gl, glsl_type_from_gl, shader_stage_to_gl,
};

const SOURCE: &str = "prism::glow";

/// OpenGL device over a [`glow::Context`]
pub struct GlowDevice {
    gl: Arc<glow::Context>,
    shaders: RefCell<FxHashMap<u32, glow::NativeShader>>,
    programs: RefCell<FxHashMap<u32, glow::NativeProgram>>,
    // Varying names declared per program, in declaration order. The driver
    // reports transform-feedback varyings in exactly this order, and glow
    // has no wrapper that returns the reported names.
    feedback_varyings: RefCell<FxHashMap<u32, Vec<String>>>,
    next_id: Cell<u32>,
}

impl GlowDevice {
    /// Wrap a context; the caller keeps it current
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self {
            gl,
            shaders: RefCell::new(FxHashMap::default()),
            programs: RefCell::new(FxHashMap::default()),
            feedback_varyings: RefCell::new(FxHashMap::default()),
            next_id: Cell::new(0),
        }
    }

    /// The wrapped context
    pub fn context(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    /// Drain pending driver errors, logging each one
    ///
    /// Returns true when at least one error was pending.
    pub fn check_error(&self, context: &str) -> bool {
        let mut seen = false;
        loop {
            let raw = unsafe { self.gl.get_error() };
            if raw == glow::NO_ERROR {
                return seen;
            }
            seen = true;
            prism_warn!(SOURCE, "GL error {} after {}", error_string(raw), context);
        }
    }

    fn next(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn shader(&self, handle: ShaderHandle) -> Option<glow::NativeShader> {
        let shader = self.shaders.borrow().get(&handle.0).copied();
        if shader.is_none() {
            prism_warn!(SOURCE, "unknown shader handle {}", handle.0);
        }
        shader
    }

    fn program(&self, handle: ProgramHandle) -> Option<glow::NativeProgram> {
        let program = self.programs.borrow().get(&handle.0).copied();
        if program.is_none() {
            prism_warn!(SOURCE, "unknown program handle {}", handle.0);
        }
        program
    }

    fn location(raw: i32) -> Option<glow::NativeUniformLocation> {
        (raw >= 0).then(|| glow::NativeUniformLocation(raw as u32))
    }
}

impl GlDevice for GlowDevice {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle> {
        let shader = unsafe { self.gl.create_shader(shader_stage_to_gl(stage)) }
            .map_err(|e| prism_glsl::prism_err!(SOURCE, "glCreateShader failed: {}", e))?;
        let id = self.next();
        self.shaders.borrow_mut().insert(id, shader);
        Ok(ShaderHandle(id))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        if let Some(shader) = self.shader(shader) {
            unsafe { self.gl.shader_source(shader, source) };
        }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        if let Some(shader) = self.shader(shader) {
            unsafe { self.gl.compile_shader(shader) };
        }
    }

    fn compile_status(&self, shader: ShaderHandle) -> bool {
        match self.shader(shader) {
            Some(shader) => unsafe { self.gl.get_shader_compile_status(shader) },
            None => false,
        }
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        match self.shader(shader) {
            Some(shader) => unsafe { self.gl.get_shader_info_log(shader) },
            None => String::new(),
        }
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        if let Some(native) = self.shaders.borrow_mut().remove(&shader.0) {
            unsafe { self.gl.delete_shader(native) };
        }
    }

    fn create_program(&self) -> Result<ProgramHandle> {
        let program = unsafe { self.gl.create_program() }
            .map_err(|e| prism_glsl::prism_err!(SOURCE, "glCreateProgram failed: {}", e))?;
        let id = self.next();
        self.programs.borrow_mut().insert(id, program);
        Ok(ProgramHandle(id))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        if let (Some(program), Some(shader)) = (self.program(program), self.shader(shader)) {
            unsafe { self.gl.attach_shader(program, shader) };
        }
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        if let (Some(program), Some(shader)) = (self.program(program), self.shader(shader)) {
            unsafe { self.gl.detach_shader(program, shader) };
        }
    }

    fn bind_attrib_location(&self, program: ProgramHandle, location: u32, name: &str) {
        if let Some(program) = self.program(program) {
            unsafe { self.gl.bind_attrib_location(program, location, name) };
        }
    }

    fn bind_frag_data_location(&self, program: ProgramHandle, color_number: u32, name: &str) {
        if let Some(program) = self.program(program) {
            unsafe { self.gl.bind_frag_data_location(program, color_number, name) };
        }
    }

    fn transform_feedback_varyings(
        &self,
        program: ProgramHandle,
        varyings: &[String],
        format: TransformFeedbackFormat,
    ) {
        if let Some(native) = self.program(program) {
            let names: Vec<&str> = varyings.iter().map(String::as_str).collect();
            unsafe {
                self.gl
                    .transform_feedback_varyings(native, &names, feedback_format_to_gl(format))
            };
            self.feedback_varyings
                .borrow_mut()
                .insert(program.0, varyings.to_vec());
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        if let Some(program) = self.program(program) {
            unsafe { self.gl.link_program(program) };
        }
    }

    fn link_status(&self, program: ProgramHandle) -> bool {
        match self.program(program) {
            Some(program) => unsafe { self.gl.get_program_link_status(program) },
            None => false,
        }
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        match self.program(program) {
            Some(program) => unsafe { self.gl.get_program_info_log(program) },
            None => String::new(),
        }
    }

    fn delete_program(&self, program: ProgramHandle) {
        if let Some(native) = self.programs.borrow_mut().remove(&program.0) {
            self.feedback_varyings.borrow_mut().remove(&program.0);
            unsafe { self.gl.delete_program(native) };
        }
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        let native = program.and_then(|p| self.program(p));
        unsafe { self.gl.use_program(native) };
    }

    fn active_attrib_count(&self, program: ProgramHandle) -> u32 {
        match self.program(program) {
            Some(program) => unsafe { self.gl.get_active_attributes(program) },
            None => 0,
        }
    }

    fn active_attrib(&self, program: ProgramHandle, index: u32) -> Option<ActiveVar> {
        let program = self.program(program)?;
        let info = unsafe { self.gl.get_active_attribute(program, index) }?;
        let Some(ty) = glsl_type_from_gl(info.atype) else {
            prism_warn!(
                SOURCE,
                "attribute \"{}\" has unsupported type {:#x}, skipping",
                info.name,
                info.atype
            );
            return None;
        };
        Some(ActiveVar { name: info.name, ty, count: info.size })
    }

    fn attrib_location(&self, program: ProgramHandle, name: &str) -> i32 {
        match self.program(program) {
            Some(program) => unsafe { self.gl.get_attrib_location(program, name) }
                .map(|loc| loc as i32)
                .unwrap_or(-1),
            None => -1,
        }
    }

    fn active_uniform_count(&self, program: ProgramHandle) -> u32 {
        match self.program(program) {
            Some(program) => unsafe { self.gl.get_active_uniforms(program) },
            None => 0,
        }
    }

    fn active_uniform(&self, program: ProgramHandle, index: u32) -> Option<ActiveVar> {
        let program = self.program(program)?;
        let info = unsafe { self.gl.get_active_uniform(program, index) }?;
        let Some(ty) = glsl_type_from_gl(info.utype) else {
            prism_warn!(
                SOURCE,
                "uniform \"{}\" has unsupported type {:#x}, skipping",
                info.name,
                info.utype
            );
            return None;
        };
        Some(ActiveVar { name: info.name, ty, count: info.size })
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> i32 {
        match self.program(program) {
            Some(program) => unsafe { self.gl.get_uniform_location(program, name) }
                .map(|loc| loc.0 as i32)
                .unwrap_or(-1),
            None => -1,
        }
    }

    fn active_uniform_block_count(&self, program: ProgramHandle) -> u32 {
        let Some(program) = self.program(program) else { return 0 };
        // glow carries no glGetProgramiv wrapper, so the count comes from
        // the program-interface query (GL 4.3). Block indices are
        // contiguous, and every active block has at least one active
        // member, so the count is one past the highest index referenced.
        let uniform_count = unsafe { self.gl.get_active_uniforms(program) };
        let mut max_block = -1i32;
        for index in 0..uniform_count {
            let props = unsafe {
                self.gl
                    .get_program_resource_i32(program, glow::UNIFORM, index, &[glow::BLOCK_INDEX])
            };
            if let Some(block) = props.first() {
                max_block = max_block.max(*block);
            }
        }
        (max_block + 1) as u32
    }

    fn active_uniform_block(
        &self,
        program: ProgramHandle,
        block_index: u32,
    ) -> Option<ActiveUniformBlock> {
        let program = self.program(program)?;
        unsafe {
            let name = self.gl.get_active_uniform_block_name(program, block_index);
            let data_size = self.gl.get_active_uniform_block_parameter_i32(
                program,
                block_index,
                glow::UNIFORM_BLOCK_DATA_SIZE,
            );
            let binding = self.gl.get_active_uniform_block_parameter_i32(
                program,
                block_index,
                glow::UNIFORM_BLOCK_BINDING,
            );
            let member_count = self.gl.get_active_uniform_block_parameter_i32(
                program,
                block_index,
                glow::UNIFORM_BLOCK_ACTIVE_UNIFORMS,
            ) as usize;

            let mut indices = vec![0i32; member_count];
            self.gl.get_active_uniform_block_parameter_i32_slice(
                program,
                block_index,
                glow::UNIFORM_BLOCK_ACTIVE_UNIFORM_INDICES,
                &mut indices,
            );
            let uniform_indices: Vec<u32> = indices.iter().map(|i| *i as u32).collect();

            // glow has no glGetActiveUniformsiv wrapper; member layout
            // comes from the per-resource query instead.
            let mut offsets = Vec::with_capacity(member_count);
            let mut array_strides = Vec::with_capacity(member_count);
            let mut matrix_strides = Vec::with_capacity(member_count);
            for member in &uniform_indices {
                let props = self.gl.get_program_resource_i32(
                    program,
                    glow::UNIFORM,
                    *member,
                    &[glow::OFFSET, glow::ARRAY_STRIDE, glow::MATRIX_STRIDE],
                );
                let mut props = props.into_iter();
                offsets.push(props.next().unwrap_or(-1));
                array_strides.push(props.next().unwrap_or(0));
                matrix_strides.push(props.next().unwrap_or(0));
            }

            Some(ActiveUniformBlock {
                name,
                data_size,
                binding,
                uniform_indices,
                offsets,
                array_strides,
                matrix_strides,
            })
        }
    }

    fn uniform_block_binding(&self, program: ProgramHandle, block_index: u32, binding: u32) {
        if let Some(program) = self.program(program) {
            unsafe { self.gl.uniform_block_binding(program, block_index, binding) };
        }
    }

    fn transform_feedback_varying_count(&self, program: ProgramHandle) -> u32 {
        self.feedback_varyings
            .borrow()
            .get(&program.0)
            .map(|names| names.len() as u32)
            .unwrap_or(0)
    }

    fn transform_feedback_varying(&self, program: ProgramHandle, index: u32) -> Option<ActiveVar> {
        // Varying index i is the i-th declared name; the type and array
        // size come from the program-interface query.
        let name = self
            .feedback_varyings
            .borrow()
            .get(&program.0)?
            .get(index as usize)?
            .clone();
        let native = self.program(program)?;
        let props = unsafe {
            self.gl.get_program_resource_i32(
                native,
                glow::TRANSFORM_FEEDBACK_VARYING,
                index,
                &[glow::TYPE, glow::ARRAY_SIZE],
            )
        };
        let mut props = props.into_iter();
        let gl_type = props.next().unwrap_or(0) as u32;
        let size = props.next().unwrap_or(1);
        let Some(ty) = glsl_type_from_gl(gl_type) else {
            prism_warn!(
                SOURCE,
                "varying \"{}\" has unsupported type {:#x}, skipping",
                name,
                gl_type
            );
            return None;
        };
        Some(ActiveVar { name, ty, count: size })
    }

    fn uniform_f32(&self, location: i32, dim: u8, values: &[f32]) {
        let location = Self::location(location);
        unsafe {
            match dim {
                1 => self.gl.uniform_1_f32_slice(location.as_ref(), values),
                2 => self.gl.uniform_2_f32_slice(location.as_ref(), values),
                3 => self.gl.uniform_3_f32_slice(location.as_ref(), values),
                4 => self.gl.uniform_4_f32_slice(location.as_ref(), values),
                other => prism_warn!(SOURCE, "unsupported float dimension {}", other),
            }
        }
    }

    fn uniform_i32(&self, location: i32, dim: u8, values: &[i32]) {
        let location = Self::location(location);
        unsafe {
            match dim {
                1 => self.gl.uniform_1_i32_slice(location.as_ref(), values),
                2 => self.gl.uniform_2_i32_slice(location.as_ref(), values),
                3 => self.gl.uniform_3_i32_slice(location.as_ref(), values),
                4 => self.gl.uniform_4_i32_slice(location.as_ref(), values),
                other => prism_warn!(SOURCE, "unsupported int dimension {}", other),
            }
        }
    }

    fn uniform_u32(&self, location: i32, dim: u8, values: &[u32]) {
        let location = Self::location(location);
        unsafe {
            match dim {
                1 => self.gl.uniform_1_u32_slice(location.as_ref(), values),
                2 => self.gl.uniform_2_u32_slice(location.as_ref(), values),
                3 => self.gl.uniform_3_u32_slice(location.as_ref(), values),
                4 => self.gl.uniform_4_u32_slice(location.as_ref(), values),
                other => prism_warn!(SOURCE, "unsupported uint dimension {}", other),
            }
        }
    }

    fn uniform_matrix(&self, location: i32, dim: u8, transpose: bool, values: &[f32]) {
        let location = Self::location(location);
        unsafe {
            match dim {
                2 => self
                    .gl
                    .uniform_matrix_2_f32_slice(location.as_ref(), transpose, values),
                3 => self
                    .gl
                    .uniform_matrix_3_f32_slice(location.as_ref(), transpose, values),
                4 => self
                    .gl
                    .uniform_matrix_4_f32_slice(location.as_ref(), transpose, values),
                other => prism_warn!(SOURCE, "unsupported matrix dimension {}", other),
            }
        }
    }

    fn object_label(&self, program: ProgramHandle, label: &str) {
        if !self.gl.supports_debug() {
            return;
        }
        if let Some(native) = self.program(program) {
            unsafe {
                self.gl
                    .object_label(glow::PROGRAM, native.0.get(), Some(label));
            }
        }
    }
}
