/*!
# Prism GLSL glow backend

OpenGL implementation of the `prism_glsl` device seam over [`glow`].

[`GlowDevice`] wraps a `glow::Context` and exposes it through the
`GlDevice` trait, so `GlslProg` drives real driver calls. Context
creation and window plumbing stay with the application; the device only
assumes the context is current on the calling thread.

```no_run
# fn get_context() -> glow::Context { unimplemented!() }
use std::sync::Arc;
use prism_glsl::{Format, GlslProg};
use prism_glsl_backend_glow::GlowDevice;

let gl = Arc::new(get_context());
let device = Arc::new(GlowDevice::new(gl));
let prog = GlslProg::new(
    device,
    &Format::new()
        .vertex("#version 330\nvoid main() { gl_Position = vec4(0.0); }")
        .fragment("#version 330\nout vec4 c; void main() { c = vec4(1.0); }"),
)?;
prog.bind();
# Ok::<(), prism_glsl::Error>(())
```
*/

mod glow_device;
mod type_map;

pub use glow_device::GlowDevice;
