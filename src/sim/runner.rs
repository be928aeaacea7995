//! MelloRush: endless runner
//!
//! The ball sits on a ground line and jumps over obstacles that scroll in
//! from the right. Speed, gravity and obstacle density all grow with score.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::circle_rect_overlap;
use super::pools::{self, SpawnTimer};
use super::state::{EndReason, GameEvent, Obstacle, PlayerBody, RngState, ScorePopup, TrailDot};
use super::tick::{Arcade, TickOutcome};
use crate::GameKind;
use crate::tuning::{EffectsTuning, RunnerTuning};

/// Complete runner state
#[derive(Debug, Clone)]
pub struct RunnerState {
    pub tuning: RunnerTuning,
    pub effects: EffectsTuning,
    pub rng_state: RngState,
    rng: Pcg32,
    pub width: f32,
    pub height: f32,
    /// y of the ground line, recomputed on resize
    pub ground_y: f32,
    pub player: PlayerBody,
    pub obstacles: Vec<Obstacle>,
    pub trail: Vec<TrailDot>,
    pub popups: Vec<ScorePopup>,
    pub spawn: SpawnTimer,
    pub score: u32,
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl RunnerState {
    pub fn new(tuning: RunnerTuning, effects: EffectsTuning, width: f32, height: f32, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let ground_y = height - tuning.ground_margin;
        let player = Self::initial_player(&tuning, ground_y);
        Self {
            rng: rng_state.to_rng(),
            rng_state,
            width,
            height,
            ground_y,
            player,
            obstacles: Vec::new(),
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

    /// Canvas sized for a viewport, with the shipped balance
    pub fn for_viewport(viewport_width: f32, seed: u64) -> Self {
        let tuning = RunnerTuning::default();
        let (width, height) = tuning.canvas_size(viewport_width);
        Self::new(tuning, EffectsTuning::default(), width, height, seed)
    }

    fn initial_player(tuning: &RunnerTuning, ground_y: f32) -> PlayerBody {
        let mut player = PlayerBody::new(
            Vec2::new(tuning.player_x, ground_y - tuning.player_radius),
            tuning.player_radius,
        );
        player.grounded = true;
        player
    }

    fn spawn_obstacle(&mut self, height_bonus: f32) {
        let t = &self.tuning;
        let h = t.obstacle_base_height + self.rng.random::<f32>() * t.obstacle_height_jitter + height_bonus;
        let w = t.obstacle_min_width + self.rng.random::<f32>() * t.obstacle_width_jitter;
        self.obstacles.push(Obstacle {
            x: self.width + t.spawn_offset,
            y: self.ground_y - h,
            w,
            h,
            passed: false,
        });
    }
}

impl Arcade for RunnerState {
    const KIND: GameKind = GameKind::Runner;

    fn tick(&mut self) -> TickOutcome {
        self.time_ticks += 1;
        let difficulty = self.tuning.curve.at(self.score);

        self.player.integrate(difficulty.gravity);
        self.player.clamp_to_ground(self.ground_y);

        if self.spawn.tick() {
            self.spawn_obstacle(difficulty.height_bonus);
            self.spawn.reset_to(difficulty.spawn_interval);
        }

        pools::advance(&mut self.obstacles, difficulty.speed);

        let awarded = pools::award_passes(&mut self.obstacles, self.player.back_edge());
        for _ in 0..awarded {
            self.score += 1;
            self.popups.push(ScorePopup {
                pos: self.player.pos + Vec2::new(10.0, -30.0),
                life: self.effects.popup_life,
            });
            self.events.push(GameEvent::Scored { score: self.score });
        }

        let player = &self.player;
        if self
            .obstacles
            .iter()
            .any(|ob| circle_rect_overlap(player.pos, player.radius, &ob.rect()))
        {
            self.events.push(GameEvent::Ended(EndReason::Collision));
            return TickOutcome::Ended(EndReason::Collision);
        }

        pools::retire_offscreen(&mut self.obstacles, -self.tuning.retire_margin);
        pools::update_trail(
            &mut self.trail,
            difficulty.speed * self.tuning.trail_drift_factor,
            self.effects.trail_fade,
        );
        pools::update_popups(&mut self.popups, self.effects.popup_rise);

        TickOutcome::Running
    }

    fn trigger_jump(&mut self) -> bool {
        if !self.player.try_jump(self.tuning.jump_strength) {
            return false;
        }
        pools::burst_trail(&mut self.trail, &mut self.rng, &self.player, self.tuning.trail_burst);
        self.events.push(GameEvent::Jumped);
        true
    }

    fn reset(&mut self) {
        self.player = Self::initial_player(&self.tuning, self.ground_y);
        self.obstacles.clear();
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
        self.ground_y = height - self.tuning.ground_margin;
        // A grounded player moves with the ground line; mid-jump the next
        // ground clamp catches up
        if self.player.grounded {
            self.player.pos.y = self.ground_y - self.player.radius;
            self.player.vel_y = 0.0;
        }
        // Obstacles stand on the ground, keep them there
        for ob in &mut self.obstacles {
            ob.y = self.ground_y - ob.h;
        }
    }

    fn autopilot(&self) -> bool {
        if !self.player.grounded {
            return false;
        }
        // Jump when the nearest unpassed obstacle is about to reach the player.
        // A jump is in the air for 2 * |jump| / gravity ticks; take off so the
        // apex lands roughly over the obstacle.
        let difficulty = self.tuning.curve.at(self.score);
        let airtime = 2.0 * self.tuning.jump_strength.abs() / difficulty.gravity;
        let lead = difficulty.speed * airtime * 0.35;
        self.obstacles
            .iter()
            .filter(|ob| !ob.passed && ob.x + ob.w > self.player.back_edge())
            .map(|ob| ob.x - (self.player.pos.x + self.player.radius))
            .any(|gap| gap > 0.0 && gap < lead)
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::run_ticks;

    fn runner(seed: u64) -> RunnerState {
        RunnerState::new(RunnerTuning::default(), EffectsTuning::default(), 1000.0, 420.0, seed)
    }

    #[test]
    fn test_initial_state() {
        let state = runner(1);
        assert_eq!(state.ground_y, 360.0);
        assert_eq!(state.player.pos, Vec2::new(80.0, 342.0));
        assert!(state.player.grounded);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_first_tick_spawns_obstacle() {
        let mut state = runner(1);
        assert_eq!(state.tick(), TickOutcome::Running);
        assert_eq!(state.obstacles.len(), 1);
        let ob = &state.obstacles[0];
        // Spawned at width + 20, then moved by the base speed
        assert_eq!(ob.x, 1014.0);
        assert!(ob.h >= 30.0 && ob.h <= 80.0);
        assert!(ob.w >= 22.0 && ob.w <= 58.0);
        assert!((ob.y + ob.h - state.ground_y).abs() < 1e-3);
        assert_eq!(state.spawn.remaining, 115.0);
    }

    #[test]
    fn test_player_stays_on_ground_without_input() {
        let mut state = runner(1);
        for _ in 0..10 {
            state.tick();
        }
        assert_eq!(state.player.pos.y, 342.0);
        assert_eq!(state.player.vel_y, 0.0);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut state = runner(1);
        assert!(state.trigger_jump());
        assert_eq!(state.trail.len(), 10);
        assert!(!state.trigger_jump());
        state.tick();
        assert!(state.player.pos.y < 342.0);
        assert!(!state.trigger_jump());
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_jump_lands_again() {
        let mut state = runner(1);
        state.trigger_jump();
        // 16.5 / 0.85 ≈ 19.4 ticks up, same down
        for _ in 0..45 {
            state.tick();
            state.obstacles.clear();
        }
        assert!(state.player.grounded);
        assert_eq!(state.player.pos.y, 342.0);
    }

    #[test]
    fn test_collision_ends_session() {
        let mut state = runner(1);
        state.spawn.reset_to(1000.0);
        state.obstacles.push(Obstacle {
            x: state.player.pos.x + 20.0,
            y: state.ground_y - 40.0,
            w: 30.0,
            h: 40.0,
            passed: false,
        });
        assert_eq!(state.tick(), TickOutcome::Ended(EndReason::Collision));
        assert!(state.drain_events().contains(&GameEvent::Ended(EndReason::Collision)));
    }

    #[test]
    fn test_cleared_obstacle_scores_once() {
        let mut state = runner(1);
        state.spawn.reset_to(1000.0);
        // Trailing edge at 31 + 30 - 6 = 55 after one tick, left of the back edge (62)
        state.obstacles.push(Obstacle {
            x: 31.0,
            y: state.ground_y - 40.0,
            w: 30.0,
            h: 40.0,
            passed: false,
        });
        // Above the obstacle, so no collision
        state.player.pos.y = 100.0;
        state.player.grounded = false;
        state.tick();
        assert_eq!(state.score, 1);
        assert_eq!(state.popups.len(), 1);
        state.tick();
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_obstacles_retire_offscreen() {
        let mut state = runner(1);
        state.spawn.reset_to(1000.0);
        state.obstacles.push(Obstacle {
            x: -60.0,
            y: state.ground_y - 40.0,
            w: 15.0,
            h: 40.0,
            passed: true,
        });
        state.tick();
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = runner(3);
        state.trigger_jump();
        run_ticks(&mut state, 300);
        state.reset();
        let fresh = runner(3);
        assert_eq!(state.player, fresh.player);
        assert!(state.obstacles.is_empty());
        assert!(state.trail.is_empty());
        assert!(state.popups.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.spawn, SpawnTimer::default());
    }

    #[test]
    fn test_resize_moves_ground_line() {
        let mut state = runner(1);
        state.tick();
        state.resize(500.0, 320.0);
        assert_eq!(state.ground_y, 260.0);
        assert_eq!(state.player.pos.y, 242.0);
        let ob = &state.obstacles[0];
        assert!((ob.y + ob.h - 260.0).abs() < 1e-3);
    }

    #[test]
    fn test_resize_mid_jump_keeps_flight() {
        let mut state = runner(1);
        state.obstacles.clear();
        state.spawn.reset_to(1000.0);
        state.trigger_jump();
        for _ in 0..5 {
            state.tick();
        }
        let (y, vel_y) = (state.player.pos.y, state.player.vel_y);
        assert!(vel_y < 0.0);

        state.resize(500.0, 320.0);
        assert_eq!(state.ground_y, 260.0);
        assert!(!state.player.grounded);
        assert_eq!(state.player.pos.y, y);
        assert_eq!(state.player.vel_y, vel_y);
    }

    #[test]
    fn test_determinism() {
        let mut a = runner(99999);
        let mut b = runner(99999);
        for i in 0..400 {
            if i % 37 == 0 {
                a.trigger_jump();
                b.trigger_jump();
            }
            let (oa, ob) = (a.tick(), b.tick());
            assert_eq!(oa, ob);
            if oa.is_ended() {
                break;
            }
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.player, b.player);
    }

    #[test]
    fn test_autopilot_clears_obstacles() {
        let mut state = runner(42);
        for _ in 0..3000 {
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
