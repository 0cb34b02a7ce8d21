//! Rendering contract toward an external display backend
//!
//! The simulation records what to draw, in order, into a `DrawList`.
//! Backends implement `Canvas`; nothing here touches pixels.

pub mod canvas;
pub mod draw_list;
pub mod hud;

pub use canvas::{Canvas, RecordingCanvas, SpriteHandle, SpriteSheet, replay};
pub use draw_list::{Color, DrawCommand, DrawList};
