//! Frame composition
//!
//! Turns the current scene into a vertex list in scene coordinates. Pure: no
//! GPU access, so it can be tested natively.

use glam::Vec2;

use super::shapes;
use super::vertex::{Palette, Vertex, with_alpha};
use crate::consts::MAX_LIVES;
use crate::scene::{GameOverScreen, Scene};
use crate::settings::Settings;
use crate::sim::{GameState, Item, ItemKind, PowerUpKind, Rect, Window};

/// Height of a window's title bar
const TITLE_BAR: f32 = 18.0;
/// Player opacity while invincible
const INVINCIBLE_ALPHA: f32 = 0.5;
/// Battery opacity for the "off" half of a blink under reduced motion
const DIMMED_ALPHA: f32 = 0.35;

/// Vertices for the whole scene at wall-clock `time` (seconds)
pub fn scene_vertices(scene: &Scene, scene_size: Vec2, settings: &Settings, time: f64) -> Vec<Vertex> {
    let palette = Palette::new(settings.high_contrast);
    let mut out = shapes::rect(&Rect::new(Vec2::ZERO, scene_size), palette.background);

    match scene {
        Scene::Start => start_screen(&mut out, &palette, settings, time),
        Scene::Game(state) => game(&mut out, state, &palette, settings),
        Scene::GameOver(screen) => game_over_screen(&mut out, screen, &palette),
    }
    out
}

fn game(out: &mut Vec<Vertex>, state: &GameState, palette: &Palette, settings: &Settings) {
    out.extend(shapes::rect(&state.left_wall, palette.wall));
    out.extend(shapes::rect(&state.right_wall, palette.wall));
    let floor = Rect::new(
        Vec2::new(state.arena.center.x, state.arena.bottom() - 4.0),
        Vec2::new(state.arena.size.x, 8.0),
    );
    out.extend(shapes::rect(&floor, palette.floor));

    for window in &state.windows {
        draw_window(out, window, palette);
    }
    for item in &state.items {
        draw_item(out, item, palette);
    }

    // Player: a compact computer with a face
    let alpha = if state.power_ups.is_active(PowerUpKind::Invincibility) {
        INVINCIBLE_ALPHA
    } else {
        1.0
    };
    let body = state.player.bounds();
    out.extend(shapes::rect(&body, with_alpha(palette.player, alpha)));
    let screen = Rect::new(
        body.center + Vec2::new(0.0, body.size.y * 0.12),
        body.size * Vec2::new(0.7, 0.5),
    );
    out.extend(shapes::rect(&screen, with_alpha(palette.window_body, alpha)));
    let eye = Vec2::splat(body.size.x * 0.08);
    for dx in [-0.15, 0.15] {
        let center = screen.center + Vec2::new(body.size.x * dx, screen.size.y * 0.15);
        out.extend(shapes::rect(&Rect::new(center, eye), with_alpha(palette.player_face, alpha)));
    }

    // HUD
    out.extend(shapes::number(
        state.score,
        state.hud.score_label.center,
        state.hud.score_label.size.y * 0.8,
        palette.text,
    ));

    let battery_alpha = match (state.battery_visible, settings.reduced_motion) {
        (true, _) => Some(1.0),
        (false, true) => Some(DIMMED_ALPHA),
        (false, false) => None,
    };
    if let Some(alpha) = battery_alpha {
        let cell = if state.lives <= 1 {
            palette.battery_low
        } else {
            palette.battery_cell
        };
        out.extend(shapes::battery(
            &state.hud.battery,
            state.battery.cells(),
            MAX_LIVES as u32,
            with_alpha(palette.battery, alpha),
            with_alpha(cell, alpha),
        ));
    }

    if state.power_ups.is_active(PowerUpKind::DoubleScore) {
        let badge = state.hud.double_indicator;
        out.extend(shapes::rect(&badge, palette.double_score));
        let height = badge.size.y * 0.6;
        out.extend(shapes::digit(2, badge.center, height, palette.window_border));
    }
}

fn draw_window(out: &mut Vec<Vertex>, window: &Window, palette: &Palette) {
    let bounds = window.bounds();
    out.extend(shapes::rect(&bounds, palette.window_body));
    let title = Rect::new(
        Vec2::new(bounds.center.x, bounds.top() - TITLE_BAR / 2.0),
        Vec2::new(bounds.size.x, TITLE_BAR),
    );
    out.extend(shapes::rect(&title, palette.window_title));
    // Close box
    let close = Rect::new(
        Vec2::new(bounds.left() + TITLE_BAR, title.center.y),
        Vec2::splat(TITLE_BAR * 0.6),
    );
    out.extend(shapes::outline(&close, 1.5, palette.window_border));
    out.extend(shapes::outline(&bounds, 2.0, palette.window_border));
}

fn draw_item(out: &mut Vec<Vertex>, item: &Item, palette: &Palette) {
    let bounds = item.bounds();
    match item.kind {
        ItemKind::Good(_) => {
            out.extend(shapes::rect(&bounds.inset(4.0), palette.good_item));
            out.extend(shapes::outline(&bounds.inset(4.0), 2.0, palette.window_border));
        }
        ItemKind::Bad(_) => {
            let inner = bounds.inset(4.0);
            out.extend(shapes::rect(&inner, palette.bad_item));
            let (l, r, b, t) = (inner.left(), inner.right(), inner.bottom(), inner.top());
            out.extend(shapes::line(Vec2::new(l, b), Vec2::new(r, t), 4.0, palette.window_border));
            out.extend(shapes::line(Vec2::new(l, t), Vec2::new(r, b), 4.0, palette.window_border));
        }
        ItemKind::PowerUp(kind) => {
            let radius = bounds.size.x / 2.0;
            out.extend(shapes::circle(bounds.center, radius, palette.window_border, 24));
            out.extend(shapes::circle(bounds.center, radius - 3.0, palette.power_up(kind), 24));
        }
    }
}

fn start_screen(out: &mut Vec<Vertex>, palette: &Palette, settings: &Settings, time: f64) {
    // Classic desktop computer with a pulsing prompt
    let case = Rect::new(Vec2::new(0.0, 20.0), Vec2::new(220.0, 260.0));
    out.extend(shapes::rect(&case, palette.player));
    let screen = Rect::new(Vec2::new(0.0, 60.0), Vec2::new(170.0, 130.0));
    out.extend(shapes::rect(&screen, palette.window_body));
    out.extend(shapes::outline(&case, 3.0, palette.window_border));

    let pulse = if settings.reduced_motion {
        1.0
    } else {
        0.6 + 0.4 * (time * 3.0).sin().abs() as f32
    };
    let slot = Rect::new(Vec2::new(0.0, -60.0), Vec2::new(90.0, 10.0));
    out.extend(shapes::rect(&slot, with_alpha(palette.window_border, pulse)));
}

fn game_over_screen(out: &mut Vec<Vertex>, screen: &GameOverScreen, palette: &Palette) {
    let card = Rect::new(Vec2::new(0.0, 40.0), Vec2::new(420.0, 260.0));
    out.extend(shapes::rect(&card, palette.window_body));
    let title = Rect::new(
        Vec2::new(0.0, card.top() - TITLE_BAR / 2.0),
        Vec2::new(card.size.x, TITLE_BAR),
    );
    out.extend(shapes::rect(&title, palette.window_title));
    out.extend(shapes::outline(&card, 2.0, palette.window_border));
    out.extend(shapes::number(screen.score, Vec2::new(0.0, 50.0), 90.0, palette.window_border));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::lives::BlinkSequence;
    use crate::sim::test_state;

    fn render_game(state: GameState, settings: &Settings) -> Vec<Vertex> {
        let size = state.scene_size;
        scene_vertices(&Scene::Game(Box::new(state)), size, settings, 0.0)
    }

    fn has_color(vertices: &[Vertex], color: [f32; 4]) -> bool {
        vertices.iter().any(|v| v.color == color)
    }

    #[test]
    fn test_invincible_player_is_translucent() {
        let settings = Settings::default();
        let palette = Palette::new(false);
        let mut state = test_state(1);

        let opaque = render_game(state.clone(), &settings);
        assert!(has_color(&opaque, palette.player));

        state.power_ups.activate(PowerUpKind::Invincibility, 0.0);
        let faded = render_game(state, &settings);
        assert!(has_color(&faded, with_alpha(palette.player, INVINCIBLE_ALPHA)));
        assert!(!has_color(&faded, palette.player));
    }

    #[test]
    fn test_double_score_badge() {
        let settings = Settings::default();
        let palette = Palette::new(false);
        let mut state = test_state(1);
        assert!(!has_color(&render_game(state.clone(), &settings), palette.double_score));
        state.power_ups.activate(PowerUpKind::DoubleScore, 0.0);
        assert!(has_color(&render_game(state, &settings), palette.double_score));
    }

    #[test]
    fn test_battery_hidden_during_blink() {
        let palette = Palette::new(false);
        let mut state = test_state(1);
        state.blink = Some(BlinkSequence { started_at: 0.0 });
        state.battery_visible = false;

        let hidden = render_game(state.clone(), &Settings::default());
        assert!(!has_color(&hidden, palette.battery));

        let reduced = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let dimmed = render_game(state, &reduced);
        assert!(has_color(&dimmed, with_alpha(palette.battery, DIMMED_ALPHA)));
    }

    #[test]
    fn test_high_contrast_palette() {
        let settings = Settings {
            high_contrast: true,
            ..Settings::default()
        };
        let vertices = scene_vertices(&Scene::Start, Vec2::new(1024.0, 768.0), &settings, 0.0);
        assert_eq!(vertices[0].color, Palette::HIGH_CONTRAST.background);
    }

    #[test]
    fn test_game_over_screen_draws_score() {
        let settings = Settings::default();
        let size = Vec2::new(1024.0, 768.0);
        let zero = scene_vertices(&Scene::GameOver(GameOverScreen::new(0)), size, &settings, 0.0);
        let eighty_eight =
            scene_vertices(&Scene::GameOver(GameOverScreen::new(88)), size, &settings, 0.0);
        // "0" lights 6 segments, "88" lights 14
        assert_eq!(eighty_eight.len() - zero.len(), (14 - 6) * 6);
    }
}
