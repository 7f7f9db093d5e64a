//! CPU rasterizer: vertex transform, triangle assembly, edge-function scan
//! conversion, depth testing and per-pixel shading into a software framebuffer.

pub mod app;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod scene;
