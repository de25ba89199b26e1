//! Rendering module
//!
//! `frame` composes draw commands from the simulation state; `canvas` plays
//! them onto the browser's 2D context.

pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use frame::{DrawCommand, SpriteDraw, compose};
