//! Display backend seam
//!
//! The game never decodes or composites images itself. It resolves sprite
//! roles to backend handles once at startup and replays each frame's
//! `DrawList` onto a `Canvas`.

use std::collections::BTreeMap;

use glam::Vec2;

use super::draw_list::{Color, DrawCommand, DrawList};
use crate::error::GameError;
use crate::settings::{AssetRole, Settings};
use crate::sim::geometry::Rect;

/// Backend identifier for a loaded image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub String);

/// Something frames can be drawn onto
pub trait Canvas {
    fn fill(&mut self, color: Color);
    fn draw_sprite(&mut self, sprite: &SpriteHandle, rect: Rect, rotation: f32);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32);
    /// Flip the finished frame to the display
    fn present(&mut self);
}

/// Sprite handles for every role, resolved at startup
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    handles: BTreeMap<AssetRole, SpriteHandle>,
}

impl SpriteSheet {
    /// Resolve every role from the settings' sprite table
    pub fn from_settings(settings: &Settings) -> Result<Self, GameError> {
        let mut handles = BTreeMap::new();
        for role in AssetRole::ALL {
            let path = settings
                .sprites
                .get(&role)
                .ok_or(GameError::AssetMissing(role))?;
            handles.insert(role, SpriteHandle(path.clone()));
        }
        log::debug!("Resolved {} sprite roles", handles.len());
        Ok(Self { handles })
    }

    pub fn get(&self, role: AssetRole) -> &SpriteHandle {
        // Construction guarantees every role is present
        &self.handles[&role]
    }
}

/// Replay a recorded frame onto a canvas and present it
pub fn replay<C: Canvas + ?Sized>(draw: &DrawList, sprites: &SpriteSheet, canvas: &mut C) {
    for cmd in &draw.commands {
        match cmd {
            DrawCommand::Fill(color) => canvas.fill(*color),
            DrawCommand::Sprite {
                role,
                rect,
                rotation,
            } => canvas.draw_sprite(sprites.get(*role), *rect, *rotation),
            DrawCommand::Line { from, to, color } => canvas.draw_line(*from, *to, *color),
            DrawCommand::Text { text, pos, size } => canvas.draw_text(text, *pos, *size),
        }
    }
    canvas.present();
}

/// Canvas that keeps the last presented frame (headless runs and tests)
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pending: Vec<String>,
    /// Operations of the most recently presented frame
    pub last_frame: Vec<String>,
    pub frames_presented: u64,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    fn fill(&mut self, color: Color) {
        self.pending.push(format!("fill {color:?}"));
    }

    fn draw_sprite(&mut self, sprite: &SpriteHandle, rect: Rect, _rotation: f32) {
        self.pending.push(format!(
            "sprite {} at ({:.0}, {:.0})",
            sprite.0,
            rect.left(),
            rect.top()
        ));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, _color: Color) {
        self.pending.push(format!(
            "line ({:.0}, {:.0}) -> ({:.0}, {:.0})",
            from.x, from.y, to.x, to.y
        ));
    }

    fn draw_text(&mut self, text: &str, _pos: Vec2, _size: f32) {
        self.pending.push(format!("text {text}"));
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_role_is_fatal() {
        let mut settings = Settings::default();
        settings.sprites.remove(&AssetRole::Explosion);
        let err = SpriteSheet::from_settings(&settings).unwrap_err();
        assert!(matches!(err, GameError::AssetMissing(AssetRole::Explosion)));
    }

    #[test]
    fn test_replay_preserves_order() {
        let sheet = SpriteSheet::from_settings(&Settings::default()).unwrap();
        let mut draw = DrawList::new();
        draw.sprite(AssetRole::Background, Rect::new(0.0, 0.0, 960.0, 720.0), 0.0);
        draw.text("Score: 0", Vec2::new(48.0, 20.0), 46.0);
        draw.line(Vec2::ZERO, Vec2::new(10.0, 10.0), Color::WHITE);

        let mut canvas = RecordingCanvas::new();
        replay(&draw, &sheet, &mut canvas);

        assert_eq!(canvas.frames_presented, 1);
        assert_eq!(
            canvas.last_frame,
            vec![
                "sprite img/background.png at (0, 0)".to_string(),
                "text Score: 0".to_string(),
                "line (0, 0) -> (10, 10)".to_string(),
            ]
        );
    }
}
