//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders multiply by the [`Projection`] uniform to reach clip space.

mod ctx;
mod projection;
mod shader_manager;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use projection::Projection;
pub use shader_manager::{Shader, ShaderError, ShaderManager};
