//! Shape generation for the shared scene elements

use glam::Vec2;

use super::{Color, DrawCmd, DrawList, TextAlign, palette};
use crate::settings::Settings;
use crate::sim::collision::Rect;
use crate::sim::state::{PlayerBody, ScorePopup, TrailDot};

/// Radius of one trail dot
const TRAIL_DOT_RADIUS: f32 = 3.0;
/// Halo blur around the ball
const GLOW_BLUR: f32 = 12.0;
const POPUP_FONT_PX: f32 = 18.0;
const HUD_FONT_PX: f32 = 20.0;

/// The player's ball, with the teal halo unless effects are reduced
pub fn ball(player: &PlayerBody, settings: &Settings, list: &mut DrawList) {
    list.push(DrawCmd::Circle {
        center: player.pos,
        radius: player.radius,
        color: palette::BALL,
        glow: settings.effective_glow().then_some((palette::TEAL, GLOW_BLUR)),
    });
}

/// Trail dots and "+1" popups
pub fn effects(
    trail: &[TrailDot],
    popups: &[ScorePopup],
    popup_life: f32,
    settings: &Settings,
    list: &mut DrawList,
) {
    if settings.effective_trails() {
        for dot in trail {
            list.push(DrawCmd::Circle {
                center: dot.pos,
                radius: TRAIL_DOT_RADIUS,
                color: palette::TEAL.with_alpha(dot.alpha),
                glow: None,
            });
        }
    }

    if settings.effective_popups() {
        for popup in popups {
            // Fade out over the popup's lifetime
            let alpha = if popup_life > 0.0 { popup.life / popup_life } else { 0.0 };
            list.push(DrawCmd::Text {
                pos: popup.pos,
                text: "+1".to_string(),
                size_px: POPUP_FONT_PX,
                color: palette::TEAL.with_alpha(alpha),
                align: TextAlign::Left,
            });
        }
    }
}

/// Score and best in the top-left corner
pub fn hud(score: u32, best: u32, settings: &Settings, list: &mut DrawList) {
    list.push(DrawCmd::Text {
        pos: Vec2::new(16.0, 28.0),
        text: format!("Score: {}", score),
        size_px: HUD_FONT_PX,
        color: palette::TEXT,
        align: TextAlign::Left,
    });
    if settings.show_best {
        list.push(DrawCmd::Text {
            pos: Vec2::new(16.0, 52.0),
            text: format!("Best: {}", best),
            size_px: HUD_FONT_PX,
            color: palette::MUTED,
            align: TextAlign::Left,
        });
    }
}

/// Filled rectangle with a one-pixel border
pub fn outlined_rect(rect: Rect, fill: Color, border: Color, list: &mut DrawList) {
    list.push(DrawCmd::Rect { rect, color: border });
    list.push(DrawCmd::Rect {
        rect: Rect::new(rect.x + 1.0, rect.y + 1.0, (rect.w - 2.0).max(0.0), (rect.h - 2.0).max(0.0)),
        color: fill,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_skips_effects() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let trail = [TrailDot {
            pos: Vec2::ZERO,
            alpha: 1.0,
        }];
        let popups = [ScorePopup {
            pos: Vec2::ZERO,
            life: 30.0,
        }];
        let mut list = DrawList::new();
        effects(&trail, &popups, 30.0, &settings, &mut list);
        assert!(list.is_empty());

        let player = PlayerBody::new(Vec2::new(10.0, 10.0), 5.0);
        ball(&player, &settings, &mut list);
        assert!(matches!(list.cmds[0], DrawCmd::Circle { glow: None, .. }));
    }

    #[test]
    fn test_popup_fades_with_life() {
        let popups = [ScorePopup {
            pos: Vec2::ZERO,
            life: 15.0,
        }];
        let mut list = DrawList::new();
        effects(&[], &popups, 30.0, &Settings::default(), &mut list);
        match &list.cmds[0] {
            DrawCmd::Text { text, color, .. } => {
                assert_eq!(text, "+1");
                assert_eq!(color.a, 0.5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_hud_hides_best() {
        let settings = Settings {
            show_best: false,
            ..Settings::default()
        };
        let mut list = DrawList::new();
        hud(4, 9, &settings, &mut list);
        assert_eq!(list.len(), 1);
    }
}
