//! Rendering module
//!
//! Scenes are turned into a flat [`DrawList`] of 2D primitives each frame.
//! The list is backend-agnostic; on the web it is replayed onto a Canvas2D
//! context by [`canvas::CanvasRenderer`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::collision::Rect;
use crate::sim::{FlyerState, RunnerState};
use crate::tictactoe::{Mark, TicTacToeMatch};

/// sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Club palette
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0, 0, 0);
    pub const TEAL: Color = Color::rgb(20, 184, 166);
    pub const BALL: Color = Color::rgb(255, 255, 255);
    pub const TEXT: Color = Color::rgb(255, 255, 255);
    pub const MUTED: Color = Color::rgb(156, 163, 175);
    pub const CELL: Color = Color::rgb(23, 23, 23);
    pub const CELL_BORDER: Color = Color::rgb(39, 39, 42);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole surface
    Clear(Color),
    Rect {
        rect: Rect,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        /// Blur radius of a halo in the given color
        glow: Option<(Color, f32)>,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        size_px: f32,
        color: Color,
        align: TextAlign,
    },
}

/// Commands for one frame, in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}

/// Anything that can paint itself into a draw list
pub trait Scene {
    fn draw(&self, view: &SceneView, list: &mut DrawList);
}

/// Frame-level inputs a scene needs besides its own state
#[derive(Debug, Clone)]
pub struct SceneView<'a> {
    pub settings: &'a Settings,
    pub best: u32,
}

impl Scene for RunnerState {
    fn draw(&self, view: &SceneView, list: &mut DrawList) {
        list.push(DrawCmd::Clear(palette::BACKGROUND));
        list.push(DrawCmd::Line {
            from: Vec2::new(0.0, self.ground_y),
            to: Vec2::new(self.width, self.ground_y),
            width: 2.0,
            color: palette::TEAL,
        });
        for ob in &self.obstacles {
            list.push(DrawCmd::Rect {
                rect: ob.rect(),
                color: palette::TEAL,
            });
        }
        shapes::effects(&self.trail, &self.popups, self.effects.popup_life, view.settings, list);
        shapes::ball(&self.player, view.settings, list);
        shapes::hud(self.score, view.best, view.settings, list);
    }
}

impl Scene for FlyerState {
    fn draw(&self, view: &SceneView, list: &mut DrawList) {
        list.push(DrawCmd::Clear(palette::BACKGROUND));
        for pipe in &self.pipes {
            for rect in [pipe.top_rect(), pipe.bottom_rect(self.height)] {
                list.push(DrawCmd::Rect {
                    rect,
                    color: palette::TEAL,
                });
            }
        }
        shapes::effects(&self.trail, &self.popups, self.effects.popup_life, view.settings, list);
        shapes::ball(&self.player, view.settings, list);
        shapes::hud(self.score, view.best, view.settings, list);
    }
}

/// Where the tic-tac-toe cells sit on a square canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub origin: Vec2,
    pub cell: f32,
    pub gap: f32,
}

impl BoardLayout {
    /// Space reserved above the grid for the status line
    const STATUS_HEIGHT: f32 = 48.0;

    /// Fit a 3x3 grid into `width` x `height`, below the status line
    pub fn fit(width: f32, height: f32) -> Self {
        let gap = 8.0;
        let available = (width.min(height - Self::STATUS_HEIGHT) - 4.0 * gap).max(3.0);
        let cell = available / 3.0;
        let grid = 3.0 * cell + 4.0 * gap;
        Self {
            origin: Vec2::new((width - grid) / 2.0, Self::STATUS_HEIGHT),
            cell,
            gap,
        }
    }

    pub fn cell_rect(&self, slot: usize) -> Rect {
        let (row, col) = ((slot / 3) as f32, (slot % 3) as f32);
        Rect::new(
            self.origin.x + self.gap + col * (self.cell + self.gap),
            self.origin.y + self.gap + row * (self.cell + self.gap),
            self.cell,
            self.cell,
        )
    }

    /// Slot under a pointer, if any (gaps belong to no slot)
    pub fn slot_at(&self, point: Vec2) -> Option<usize> {
        (0..9).find(|&slot| {
            let r = self.cell_rect(slot);
            point.x >= r.x && point.x < r.right() && point.y >= r.y && point.y < r.bottom()
        })
    }
}

/// A match drawn on a canvas of known size
pub struct BoardScene<'a> {
    pub game: &'a TicTacToeMatch,
    pub layout: BoardLayout,
    pub width: f32,
}

impl Scene for BoardScene<'_> {
    fn draw(&self, _view: &SceneView, list: &mut DrawList) {
        list.push(DrawCmd::Clear(palette::BACKGROUND));
        list.push(DrawCmd::Text {
            pos: Vec2::new(self.width / 2.0, 30.0),
            text: self.game.status().to_string(),
            size_px: 20.0,
            color: palette::TEXT,
            align: TextAlign::Center,
        });

        let winning = self.game.winning_line();
        for slot in 0..9 {
            let rect = self.layout.cell_rect(slot);
            let highlighted = winning.is_some_and(|line| line.contains(&slot));
            let (fill, border) = if highlighted {
                (palette::TEAL.with_alpha(0.3), palette::TEAL)
            } else {
                (palette::CELL, palette::CELL_BORDER)
            };
            shapes::outlined_rect(rect, fill, border, list);

            if let Some(mark) = self.game.board().get(slot) {
                let color = match mark {
                    Mark::Human => palette::TEXT,
                    Mark::Bot => palette::TEAL,
                };
                list.push(DrawCmd::Text {
                    // Baseline a little below the center so glyphs sit centered
                    pos: Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h * 0.62),
                    text: mark.symbol().to_string(),
                    size_px: rect.h * 0.45,
                    color,
                    align: TextAlign::Center,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{EffectsTuning, RunnerTuning};

    #[test]
    fn test_color_css() {
        assert_eq!(palette::TEAL.to_css(), "#14b8a6");
        assert_eq!(palette::TEAL.with_alpha(0.5).to_css(), "rgba(20,184,166,0.500)");
    }

    #[test]
    fn test_runner_scene_order() {
        let mut state = RunnerState::new(RunnerTuning::default(), EffectsTuning::default(), 1000.0, 420.0, 1);
        crate::sim::Arcade::tick(&mut state);
        let settings = Settings::default();
        let view = SceneView {
            settings: &settings,
            best: 3,
        };
        let mut list = DrawList::new();
        state.draw(&view, &mut list);
        assert!(matches!(list.cmds[0], DrawCmd::Clear(_)));
        assert!(matches!(list.cmds[1], DrawCmd::Line { .. }));
        assert!(list.cmds.iter().any(|c| matches!(c, DrawCmd::Rect { .. })));
        let texts: Vec<&str> = list
            .cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Score: 0", "Best: 3"]);
    }

    #[test]
    fn test_board_layout_hit_testing() {
        let layout = BoardLayout::fit(400.0, 448.0);
        for slot in 0..9 {
            let r = layout.cell_rect(slot);
            let center = Vec2::new(r.x + r.w / 2.0, r.y + r.h / 2.0);
            assert_eq!(layout.slot_at(center), Some(slot));
        }
        // Status line and the gap between cells hit nothing
        assert_eq!(layout.slot_at(Vec2::new(200.0, 10.0)), None);
        let first = layout.cell_rect(0);
        assert_eq!(layout.slot_at(Vec2::new(first.right() + 1.0, first.y + 5.0)), None);
    }

    #[test]
    fn test_board_scene_draws_marks() {
        let mut game = TicTacToeMatch::new();
        let t = game.human_move(4).unwrap().unwrap();
        game.apply_bot_move(t);
        let settings = Settings::default();
        let view = SceneView {
            settings: &settings,
            best: 0,
        };
        let scene = BoardScene {
            game: &game,
            layout: BoardLayout::fit(400.0, 448.0),
            width: 400.0,
        };
        let mut list = DrawList::new();
        scene.draw(&view, &mut list);
        let marks = list
            .cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Text { text, .. } if text == "X" || text == "O"))
            .count();
        assert_eq!(marks, 2);
    }
}
