//! HUD overlays: score, per-city missile stock and the game-over screen

use glam::Vec2;

use super::draw_list::{Color, DrawList};
use crate::sim::entity::City;

const SCORE_TEXT_SIZE: f32 = 46.0;
const STOCK_TEXT_SIZE: f32 = 18.0;
const GAME_OVER_TEXT_SIZE: f32 = 58.0;

pub fn score_label(score: u64) -> String {
    format!("Score: {score}")
}

/// Score readout near the top-left corner
pub fn draw_score(draw: &mut DrawList, score: u64, display_width: u32) {
    draw.text(
        score_label(score),
        Vec2::new(display_width as f32 * 0.05, 20.0),
        SCORE_TEXT_SIZE,
    );
}

/// "Missiles: N" under a live city
pub fn draw_missile_stock(draw: &mut DrawList, city: &City) {
    draw.text(
        format!("Missiles: {}", city.missile_stock),
        Vec2::new(city.rect.left() + 50.0, city.rect.bottom() + 10.0),
        STOCK_TEXT_SIZE,
    );
}

/// Black screen with the banner and the final score
pub fn draw_game_over(draw: &mut DrawList, score: u64, display_width: u32, display_height: u32) {
    draw.fill(Color::BLACK);
    draw.text(
        "GAME OVER.",
        Vec2::new(display_width as f32 * 0.40, display_height as f32 * 0.40),
        GAME_OVER_TEXT_SIZE,
    );
    draw_score(draw, score, display_width);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_list::DrawCommand;

    #[test]
    fn test_game_over_screen() {
        let mut draw = DrawList::new();
        draw_game_over(&mut draw, 1234, 960, 720);
        assert_eq!(draw.commands[0], DrawCommand::Fill(Color::BLACK));
        assert_eq!(draw.texts(), vec!["GAME OVER.", "Score: 1234"]);
    }

    #[test]
    fn test_stock_label_sits_under_city() {
        let city = City::new(1, 0);
        let mut draw = DrawList::new();
        draw_missile_stock(&mut draw, &city);
        match &draw.commands[0] {
            DrawCommand::Text { text, pos, .. } => {
                assert_eq!(text, "Missiles: 10");
                assert_eq!(*pos, Vec2::new(180.0, 670.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
