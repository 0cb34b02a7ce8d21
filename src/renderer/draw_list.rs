//! Ordered draw commands recorded by the simulation
//!
//! The frame pass interleaves drawing with collision resolution, so the
//! order of commands in a `DrawList` is the on-screen stacking order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::AssetRole;
use crate::sim::geometry::Rect;

/// RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Clear the whole display
    Fill(Color),
    /// Blit a sprite into `rect`, rotated by `rotation` radians (screen space)
    Sprite {
        role: AssetRole,
        rect: Rect,
        rotation: f32,
    },
    /// Straight line
    Line { from: Vec2, to: Vec2, color: Color },
    /// HUD text with its top-left at `pos`
    Text { text: String, pos: Vec2, size: f32 },
}

/// A frame's worth of draw commands
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    pub fn sprite(&mut self, role: AssetRole, rect: Rect, rotation: f32) {
        self.commands.push(DrawCommand::Sprite {
            role,
            rect,
            rotation,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            pos,
            size,
        });
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Roles of every sprite, in draw order
    pub fn sprite_roles(&self) -> Vec<AssetRole> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Sprite { role, .. } => Some(*role),
                _ => None,
            })
            .collect()
    }

    /// All text drawn this frame, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
