//! MelloTap: flappy-style dodger
//!
//! Gravity pulls the ball down, every tap flaps it up. Pipes scroll in at a
//! constant pace while their opening narrows with score. Touching a pipe or
//! leaving the canvas ends the run.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::circle_rect_overlap;
use super::pools::{self, SpawnTimer};
use super::state::{EndReason, GameEvent, Pipe, PlayerBody, RngState, ScorePopup, TrailDot};
use super::tick::{Arcade, TickOutcome};
use crate::GameKind;
use crate::tuning::{EffectsTuning, FlyerTuning};

/// Complete flyer state
#[derive(Debug, Clone)]
pub struct FlyerState {
    pub tuning: FlyerTuning,
    pub effects: EffectsTuning,
    pub rng_state: RngState,
    rng: Pcg32,
    pub width: f32,
    pub height: f32,
    pub player: PlayerBody,
    pub pipes: Vec<Pipe>,
    pub trail: Vec<TrailDot>,
    pub popups: Vec<ScorePopup>,
    pub spawn: SpawnTimer,
    pub score: u32,
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl FlyerState {
    pub fn new(tuning: FlyerTuning, effects: EffectsTuning, width: f32, height: f32, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        Self {
            rng: rng_state.to_rng(),
            rng_state,
            width,
            height,
            player: Self::initial_player(&tuning),
            pipes: Vec::new(),
            trail: Vec::new(),
            popups: Vec::new(),
            spawn: SpawnTimer::default(),
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
            effects,
        }
    }

    pub fn for_viewport(viewport_width: f32, seed: u64) -> Self {
        let tuning = FlyerTuning::default();
        let (width, height) = tuning.canvas_size(viewport_width);
        Self::new(tuning, EffectsTuning::default(), width, height, seed)
    }

    fn initial_player(tuning: &FlyerTuning) -> PlayerBody {
        PlayerBody::new(
            Vec2::new(tuning.player_x, tuning.player_start_y),
            tuning.player_radius,
        )
    }

    fn spawn_pipe(&mut self, gap: f32) {
        let gap_y = self.tuning.gap_center_min + self.rng.random::<f32>() * self.tuning.gap_center_jitter;
        self.pipes.push(Pipe {
            x: self.width + self.tuning.spawn_offset,
            gap_y,
            width: self.tuning.pipe_width,
            gap,
            passed: false,
        });
    }

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        self.events.push(GameEvent::Ended(reason));
        TickOutcome::Ended(reason)
    }
}

impl Arcade for FlyerState {
    const KIND: GameKind = GameKind::Flyer;

    fn tick(&mut self) -> TickOutcome {
        self.time_ticks += 1;
        let difficulty = self.tuning.curve.at(self.score);

        self.player.integrate(difficulty.gravity);
        if self.player.out_of_bounds(self.height) {
            return self.end(EndReason::OutOfBounds);
        }

        if self.spawn.tick() {
            self.spawn_pipe(difficulty.gap);
            self.spawn.reset_to(difficulty.spawn_interval);
        }

        // Every live pipe uses the current gap, not the one it spawned with
        for pipe in &mut self.pipes {
            pipe.gap = difficulty.gap;
        }
        pools::advance(&mut self.pipes, difficulty.speed);

        let player = &self.player;
        let height = self.height;
        let hit = self.pipes.iter().any(|pipe| {
            circle_rect_overlap(player.pos, player.radius, &pipe.top_rect())
                || circle_rect_overlap(player.pos, player.radius, &pipe.bottom_rect(height))
        });
        if hit {
            return self.end(EndReason::Collision);
        }

        let awarded = pools::award_passes(&mut self.pipes, self.player.back_edge());
        for _ in 0..awarded {
            self.score += 1;
            self.popups.push(ScorePopup {
                pos: self.player.pos + Vec2::new(12.0, -20.0),
                life: self.effects.popup_life,
            });
            self.events.push(GameEvent::Scored { score: self.score });
        }

        pools::retire_offscreen(&mut self.pipes, 0.0);
        pools::update_trail(&mut self.trail, self.tuning.trail_drift, self.effects.trail_fade);
        pools::update_popups(&mut self.popups, self.effects.popup_rise);

        TickOutcome::Running
    }

    fn trigger_jump(&mut self) -> bool {
        self.player.flap(self.tuning.flap_strength);
        pools::burst_trail(&mut self.trail, &mut self.rng, &self.player, self.tuning.trail_burst);
        self.events.push(GameEvent::Jumped);
        true
    }

    fn reset(&mut self) {
        self.player = Self::initial_player(&self.tuning);
        self.pipes.clear();
        self.trail.clear();
        self.popups.clear();
        self.spawn = SpawnTimer::default();
        self.score = 0;
        self.time_ticks = 0;
        self.events.clear();
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn autopilot(&self) -> bool {
        // Aim for the middle of the next opening, or the canvas center when
        // no pipe is ahead. Flap once the ball sinks below the target while
        // already falling.
        let target_y = self
            .pipes
            .iter()
            .filter(|p| p.x + p.width > self.player.back_edge())
            .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
            .map(|p| p.gap_y + p.gap * 0.15)
            .unwrap_or(self.height / 2.0);
        self.player.pos.y > target_y && self.player.vel_y > 0.0
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flyer(seed: u64) -> FlyerState {
        FlyerState::new(FlyerTuning::default(), EffectsTuning::default(), 800.0, 480.0, seed)
    }

    fn pipe(x: f32, gap_y: f32) -> Pipe {
        Pipe {
            x,
            gap_y,
            width: 40.0,
            gap: 150.0,
            passed: false,
        }
    }

    #[test]
    fn test_first_tick_spawns_pipe() {
        let mut state = flyer(5);
        assert_eq!(state.tick(), TickOutcome::Running);
        assert_eq!(state.pipes.len(), 1);
        let p = &state.pipes[0];
        assert!((p.x - 836.4).abs() < 1e-3);
        assert!(p.gap_y >= 120.0 && p.gap_y <= 360.0);
        assert_eq!(p.gap, 150.0);
        assert_eq!(state.spawn.remaining, 110.0);
    }

    #[test]
    fn test_falls_out_of_bounds_without_input() {
        let mut state = flyer(5);
        let mut ended = None;
        for _ in 0..200 {
            if let TickOutcome::Ended(reason) = state.tick() {
                ended = Some(reason);
                break;
            }
        }
        assert_eq!(ended, Some(EndReason::OutOfBounds));
        assert!(state.player.pos.y + state.player.radius > 480.0);
    }

    #[test]
    fn test_flap_always_accepted() {
        let mut state = flyer(5);
        assert!(state.trigger_jump());
        assert!(state.trigger_jump());
        assert_eq!(state.player.vel_y, -4.8);
        assert_eq!(state.trail.len(), 16);
    }

    #[test]
    fn test_hitting_top_ends_run() {
        let mut state = flyer(5);
        state.player.pos.y = 15.0;
        state.trigger_jump();
        assert_eq!(state.tick(), TickOutcome::Ended(EndReason::OutOfBounds));
    }

    #[test]
    fn test_pipe_collision() {
        let mut state = flyer(5);
        state.spawn.reset_to(1000.0);
        // Opening at 100 +/- 75, player at 250 sits in the lower pipe
        state.pipes.push(pipe(state.player.pos.x, 100.0));
        assert_eq!(state.tick(), TickOutcome::Ended(EndReason::Collision));
    }

    #[test]
    fn test_upper_pipe_collision() {
        let mut state = flyer(5);
        state.spawn.reset_to(1000.0);
        // Opening at 400 +/- 75, player at 250 sits in the upper pipe
        let p = pipe(state.player.pos.x, 400.0);
        assert!(p.top_rect().bottom() > state.player.pos.y + state.player.radius);
        state.pipes.push(p);
        assert_eq!(state.tick(), TickOutcome::Ended(EndReason::Collision));
    }

    #[test]
    fn test_passing_through_gap_scores_once() {
        let mut state = flyer(5);
        state.spawn.reset_to(1000.0);
        state.player.vel_y = -0.23;
        // Trailing edge at 105 + 40 - 3.6 = 141.4, past the back edge (146)
        state.pipes.push(pipe(105.0, 250.0));
        assert_eq!(state.tick(), TickOutcome::Running);
        assert_eq!(state.score, 1);
        assert_eq!(state.popups.len(), 1);
        state.player.vel_y = -0.23;
        state.tick();
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_gap_tracks_score() {
        let mut state = flyer(5);
        state.spawn.reset_to(1000.0);
        state.pipes.push(pipe(600.0, 250.0));
        state.score = 40;
        state.player.vel_y = -0.23;
        state.tick();
        assert_eq!(state.pipes[0].gap, 90.0);
    }

    #[test]
    fn test_pipes_retire_at_left_edge() {
        let mut state = flyer(5);
        state.spawn.reset_to(1000.0);
        let mut gone = pipe(-37.0, 250.0);
        gone.passed = true;
        state.pipes.push(gone);
        state.player.vel_y = -0.23;
        state.tick();
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = flyer(8);
        for _ in 0..50 {
            state.trigger_jump();
            state.tick();
        }
        state.reset();
        assert_eq!(state.player, flyer(8).player);
        assert!(state.pipes.is_empty());
        assert!(state.trail.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut state = flyer(11);
        for _ in 0..2000 {
            if state.autopilot() {
                state.trigger_jump();
            }
            if state.tick().is_ended() {
                break;
            }
        }
        assert!(state.score > 0);
    }
}
