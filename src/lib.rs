//! A software 3D rasterizer: triangle meshes, a camera, Phong materials
//! and point lights in; shaded pixels in a CPU-owned color/depth target
//! out. No hardware graphics API anywhere.
//!
//! The pipeline is fixed-function: a per-vertex transform-and-light
//! stage, winding-based culling, and an active-edge-table scanline fill
//! with per-pixel depth testing, barycentric interpolation and
//! nearest-neighbor texturing. Drawing happens inside a
//! [`pipeline::renderer::Renderer::begin_frame`] bracket against any
//! [`core::surface::Surface`] implementation.

pub mod core;
pub mod io;
pub mod pipeline;
pub mod scene;
