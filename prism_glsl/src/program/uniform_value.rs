//! Typed uniform values
//!
//! One trait replaces the per-type setter family: a value knows which GLSL
//! types it may be assigned to, how to fan out to the device upload entry
//! points, and how to present itself as bytes for the redundant-upload
//! cache. Samplers are set through `i32` texture-unit values.

use glam::{IVec2, IVec3, IVec4, Mat2, Mat3, Mat4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4};

use crate::device::{GlDevice, GlslType};

/// A value assignable to a uniform
pub trait UniformValue: Copy {
    /// GLSL types this value may be assigned to
    fn accepted_types() -> &'static [GlslType];

    /// GLSL spelling of the value's own type, for mismatch diagnostics
    fn glsl_name() -> &'static str;

    /// Upload `values` to `location` on the currently bound program
    fn upload(device: &dyn GlDevice, location: i32, values: &[Self], transpose: bool);

    /// Bytes for the redundant-upload cache
    fn cache_bytes(values: &[Self]) -> Vec<u8>;
}

impl UniformValue for f32 {
    fn accepted_types() -> &'static [GlslType] {
        &[GlslType::Float, GlslType::Bool]
    }

    fn glsl_name() -> &'static str {
        "float"
    }

    fn upload(device: &dyn GlDevice, location: i32, values: &[Self], _transpose: bool) {
        device.uniform_f32(location, 1, values);
    }

    fn cache_bytes(values: &[Self]) -> Vec<u8> {
        bytemuck::cast_slice(values).to_vec()
    }
}

impl UniformValue for i32 {
    fn accepted_types() -> &'static [GlslType] {
        &[
            GlslType::Int,
            GlslType::Bool,
            GlslType::Sampler2d,
            GlslType::Sampler3d,
            GlslType::SamplerCube,
            GlslType::Sampler2dShadow,
            GlslType::Sampler2dArray,
            GlslType::SamplerCubeShadow,
            GlslType::Sampler2dArrayShadow,
            GlslType::ISampler2d,
            GlslType::USampler2d,
        ]
    }

    fn glsl_name() -> &'static str {
        "int"
    }

    fn upload(device: &dyn GlDevice, location: i32, values: &[Self], _transpose: bool) {
        device.uniform_i32(location, 1, values);
    }

    fn cache_bytes(values: &[Self]) -> Vec<u8> {
        bytemuck::cast_slice(values).to_vec()
    }
}

impl UniformValue for u32 {
    fn accepted_types() -> &'static [GlslType] {
        &[GlslType::UInt, GlslType::Bool]
    }

    fn glsl_name() -> &'static str {
        "uint"
    }

    fn upload(device: &dyn GlDevice, location: i32, values: &[Self], _transpose: bool) {
        device.uniform_u32(location, 1, values);
    }

    fn cache_bytes(values: &[Self]) -> Vec<u8> {
        bytemuck::cast_slice(values).to_vec()
    }
}

impl UniformValue for bool {
    fn accepted_types() -> &'static [GlslType] {
        &[GlslType::Bool, GlslType::Int]
    }

    fn glsl_name() -> &'static str {
        "bool"
    }

    fn upload(device: &dyn GlDevice, location: i32, values: &[Self], _transpose: bool) {
        let ints: Vec<i32> = values.iter().map(|b| *b as i32).collect();
        device.uniform_i32(location, 1, &ints);
    }

    fn cache_bytes(values: &[Self]) -> Vec<u8> {
        let ints: Vec<i32> = values.iter().map(|b| *b as i32).collect();
        bytemuck::cast_slice(&ints).to_vec()
    }
}

macro_rules! impl_vector_uniform {
    ($ty:ty, $glsl:expr, $glsl_name:expr, $upload:ident, $scalar:ty, $dim:expr) => {
        impl UniformValue for $ty {
            fn accepted_types() -> &'static [GlslType] {
                &[$glsl]
            }

            fn glsl_name() -> &'static str {
                $glsl_name
            }

            fn upload(device: &dyn GlDevice, location: i32, values: &[Self], _transpose: bool) {
                let flat: &[$scalar] = bytemuck::cast_slice(values);
                device.$upload(location, $dim, flat);
            }

            fn cache_bytes(values: &[Self]) -> Vec<u8> {
                bytemuck::cast_slice(values).to_vec()
            }
        }
    };
}

impl_vector_uniform!(Vec2, GlslType::Vec2, "vec2", uniform_f32, f32, 2);
impl_vector_uniform!(Vec3, GlslType::Vec3, "vec3", uniform_f32, f32, 3);
impl_vector_uniform!(Vec4, GlslType::Vec4, "vec4", uniform_f32, f32, 4);
impl_vector_uniform!(IVec2, GlslType::IVec2, "ivec2", uniform_i32, i32, 2);
impl_vector_uniform!(IVec3, GlslType::IVec3, "ivec3", uniform_i32, i32, 3);
impl_vector_uniform!(IVec4, GlslType::IVec4, "ivec4", uniform_i32, i32, 4);
impl_vector_uniform!(UVec2, GlslType::UVec2, "uvec2", uniform_u32, u32, 2);
impl_vector_uniform!(UVec3, GlslType::UVec3, "uvec3", uniform_u32, u32, 3);
impl_vector_uniform!(UVec4, GlslType::UVec4, "uvec4", uniform_u32, u32, 4);

macro_rules! impl_matrix_uniform {
    ($ty:ty, $glsl:expr, $glsl_name:expr, $dim:expr) => {
        impl UniformValue for $ty {
            fn accepted_types() -> &'static [GlslType] {
                &[$glsl]
            }

            fn glsl_name() -> &'static str {
                $glsl_name
            }

            fn upload(device: &dyn GlDevice, location: i32, values: &[Self], transpose: bool) {
                let flat: &[f32] = bytemuck::cast_slice(values);
                device.uniform_matrix(location, $dim, transpose, flat);
            }

            fn cache_bytes(values: &[Self]) -> Vec<u8> {
                bytemuck::cast_slice(values).to_vec()
            }
        }
    };
}

impl_matrix_uniform!(Mat2, GlslType::Mat2, "mat2", 2);
impl_matrix_uniform!(Mat3, GlslType::Mat3, "mat3", 3);
impl_matrix_uniform!(Mat4, GlslType::Mat4, "mat4", 4);

#[cfg(test)]
#[path = "uniform_value_tests.rs"]
mod tests;
