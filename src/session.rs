//! One play-through of an arcade game, from start to the name prompt
//!
//! Phases: `Idle -> Running <-> Paused`, `Running -> Ended` on a collision
//! or leaving the canvas, `Ended -> Running` on restart. Entering `Ended`
//! freezes the score and compares it with the personal best; only a strictly
//! greater score updates the best and opens the identity prompt.

use std::fmt;

use crate::consts::ANONYMOUS_NAME;
use crate::highscores::LocalRecords;
use crate::leaderboard::{EntryError, Leaderboard, LeaderboardEntry};
use crate::platform::now_iso;
use crate::sim::{Arcade, EndReason, GameEvent, TickOutcome};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Before the first start
    Idle,
    Running,
    Paused,
    /// Run over, score frozen
    Ended,
}

/// What the player typed into the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub contact: Option<String>,
}

impl Identity {
    pub fn new(name: &str, contact: &str) -> Self {
        Self {
            name: name.to_string(),
            contact: Some(contact.to_string()),
        }
    }

    /// Trimmed name; a blank contact becomes `None`
    pub fn normalized(self) -> Self {
        let contact = self
            .contact
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        Self {
            name: self.name.trim().to_string(),
            contact,
        }
    }
}

/// Why a prompt submission was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    NoOpenPrompt,
    MissingName,
    InvalidEntry(EntryError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NoOpenPrompt => write!(f, "no score is waiting to be submitted"),
            SubmitError::MissingName => write!(f, "a name is required"),
            SubmitError::InvalidEntry(e) => write!(f, "invalid entry: {}", e),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::InvalidEntry(e) => Some(e),
            _ => None,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndSummary {
    pub score: u32,
    /// Personal best after this run
    pub best: u32,
    pub new_best: bool,
    pub reason: EndReason,
}

/// Single owner of a game, its records and the leaderboard client
#[derive(Debug)]
pub struct Session<G: Arcade, L: Leaderboard> {
    game: G,
    leaderboard: L,
    records: LocalRecords,
    phase: SessionPhase,
    /// Score awaiting a name, while the prompt is open
    pending_score: Option<u32>,
    last_end: Option<EndSummary>,
}

impl<G: Arcade, L: Leaderboard> Session<G, L> {
    pub fn new(game: G, leaderboard: L, records: LocalRecords) -> Self {
        Self {
            game,
            leaderboard,
            records,
            phase: SessionPhase::Idle,
            pending_score: None,
            last_end: None,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn leaderboard(&self) -> &L {
        &self.leaderboard
    }

    pub fn records(&self) -> &LocalRecords {
        &self.records
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.game.score()
    }

    pub fn best(&self) -> u32 {
        self.records.best(G::KIND)
    }

    pub fn prompt_open(&self) -> bool {
        self.pending_score.is_some()
    }

    pub fn last_end(&self) -> Option<EndSummary> {
        self.last_end
    }

    /// First start from `Idle`, or a restart after `Ended`
    pub fn start(&mut self) -> bool {
        match self.phase {
            SessionPhase::Idle => {
                log::info!("{} started", G::KIND);
                self.phase = SessionPhase::Running;
                true
            }
            SessionPhase::Ended => {
                self.restart();
                true
            }
            SessionPhase::Running | SessionPhase::Paused => false,
        }
    }

    /// Fresh game, straight into `Running`. Closes an open prompt unsent.
    pub fn restart(&mut self) {
        if self.pending_score.take().is_some() {
            log::info!("Prompt closed by restart");
        }
        self.game.reset();
        self.phase = SessionPhase::Running;
        log::info!("{} restarted", G::KIND);
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.phase = SessionPhase::Paused;
        log::info!("{} paused", G::KIND);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != SessionPhase::Paused {
            return false;
        }
        self.phase = SessionPhase::Running;
        log::info!("{} resumed", G::KIND);
        true
    }

    /// The one-button input: jump while running, otherwise start, restart
    /// or resume. An open prompt never blocks a restart. Returns true when
    /// the frame loop has to be started.
    pub fn press(&mut self) -> bool {
        match self.phase {
            SessionPhase::Running => {
                self.trigger_jump();
                false
            }
            SessionPhase::Paused => self.resume(),
            SessionPhase::Idle | SessionPhase::Ended => self.start(),
        }
    }

    /// Jump or flap; ignored unless running
    pub fn trigger_jump(&mut self) -> bool {
        self.phase == SessionPhase::Running && self.game.trigger_jump()
    }

    /// One simulation tick. Returns the summary on the tick the run ends.
    pub fn tick(&mut self) -> Option<EndSummary> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        match self.game.tick() {
            TickOutcome::Running => None,
            TickOutcome::Ended(reason) => Some(self.finish(reason)),
        }
    }

    /// Up to `steps` ticks, stopping at the end of the run
    pub fn advance(&mut self, steps: u32) -> Option<EndSummary> {
        for _ in 0..steps {
            if let Some(summary) = self.tick() {
                return Some(summary);
            }
        }
        None
    }

    /// One autopilot tick: jump if the demo player wants to, then tick
    pub fn autoplay_tick(&mut self) -> Option<EndSummary> {
        if self.phase == SessionPhase::Running && self.game.autopilot() {
            self.game.trigger_jump();
        }
        self.tick()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(width, height);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }

    fn finish(&mut self, reason: EndReason) -> EndSummary {
        self.phase = SessionPhase::Ended;
        let score = self.game.score();
        let new_best = self.records.record_best(G::KIND, score);
        if new_best {
            log::info!("{} new personal best: {}", G::KIND, score);
            self.records.save();
            self.pending_score = Some(score);
        } else {
            log::info!("{} over ({:?}) with {}", G::KIND, reason, score);
        }
        let summary = EndSummary {
            score,
            best: self.best(),
            new_best,
            reason,
        };
        self.last_end = Some(summary);
        summary
    }

    /// Send the pending score under `identity`. A blank name is recorded as
    /// "Unbekannt". On error nothing changes and the prompt stays open.
    pub fn submit_identity(&mut self, identity: Identity) -> Result<LeaderboardEntry, SubmitError> {
        let score = self.pending_score.ok_or(SubmitError::NoOpenPrompt)?;
        let identity = identity.normalized();
        let name = if identity.name.is_empty() {
            ANONYMOUS_NAME.to_string()
        } else {
            identity.name
        };

        let entry = LeaderboardEntry {
            game: G::KIND,
            name,
            score: i64::from(score),
            contact: identity.contact,
            date: now_iso(),
        };
        entry.validate().map_err(SubmitError::InvalidEntry)?;

        self.pending_score = None;
        self.records.add_to_hall(G::KIND, &entry.name, score);
        self.records.save();
        log::info!("Submitting {} score {} for {}", entry.game, entry.score, entry.name);
        self.leaderboard.submit(entry.clone());
        Ok(entry)
    }

    /// Close the prompt without sending anything
    pub fn dismiss_prompt(&mut self) {
        self.pending_score = None;
    }
}
