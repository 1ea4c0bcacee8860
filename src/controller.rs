//! Game loop controller
//!
//! Owns the game state and drives it one tick at a time through a
//! host-provided scheduler. Every tick request carries a fresh token and only
//! the pending token is honoured, so a callback that arrives late (after a
//! crash, or from an older run) is dropped instead of advancing the game.

use std::collections::VecDeque;

use crate::sim::{self, GameState, Obstacle, Rect, Steer, TickOutcome};

/// Identifies one requested tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

impl TickToken {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Host capability for cooperative scheduling.
///
/// After `request_tick(token)` the host must call
/// [`LoopController::on_tick`] with that token at its next scheduling
/// quantum (an animation frame in the browser), never from inside the
/// request itself.
pub trait TickScheduler {
    fn request_tick(&mut self, token: TickToken);
}

/// Receives what the player should see
pub trait Presenter {
    /// A new run began; hide the start control and zero the score display
    fn run_started(&mut self) {}
    /// Called once per tick while running
    fn present(&mut self, frame: &Frame<'_>);
    /// The run ended; show the final score and the restart control
    fn run_ended(&mut self, summary: &RunSummary);
}

/// Snapshot handed to the presenter after each tick
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub player: Rect,
    pub obstacles: &'a [Obstacle],
    pub score: u64,
    pub speed: f32,
}

impl<'a> Frame<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            player: state.player.bounds(),
            obstacles: &state.obstacles,
            score: state.run.score,
            speed: state.run.speed,
        }
    }
}

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub final_score: u64,
    /// Ticks simulated, including the one that crashed
    pub ticks: u64,
    /// Speed reached when the run ended
    pub top_speed: f32,
}

/// External input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    MoveLeft,
    MoveRight,
}

/// Idle/Running state machine around [`sim::tick`]
pub struct LoopController<S, P> {
    state: GameState,
    scheduler: S,
    presenter: P,
    /// The only tick allowed to run next
    pending: Option<TickToken>,
    next_token: u64,
    run_ticks: u64,
}

impl<S: TickScheduler, P: Presenter> LoopController<S, P> {
    pub fn new(state: GameState, scheduler: S, presenter: P) -> Self {
        Self {
            state,
            scheduler,
            presenter,
            pending: None,
            next_token: 1,
            run_ticks: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn is_running(&self) -> bool {
        self.state.run.running()
    }

    /// Token of the tick currently awaited, if any
    pub fn pending_tick(&self) -> Option<TickToken> {
        self.pending
    }

    /// Dispatch an input command. Returns true if it changed anything.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
        }
    }

    pub fn steer(&mut self, steer: Steer) -> bool {
        match steer {
            Steer::Left => self.move_left(),
            Steer::Right => self.move_right(),
        }
    }

    /// Idle -> Running. Ignored while a run is in progress.
    pub fn start(&mut self) -> bool {
        if self.state.run.running() {
            log::debug!("Start ignored, run already in progress");
            return false;
        }

        self.state.begin_run();
        self.run_ticks = 0;
        log::info!("Run started (seed {})", self.state.seed);

        self.presenter.run_started();
        self.schedule();
        true
    }

    pub fn move_left(&mut self) -> bool {
        let moved = self.state.move_left();
        if moved {
            log::trace!("Lane -> {}", self.state.player.lane);
        }
        moved
    }

    pub fn move_right(&mut self) -> bool {
        let moved = self.state.move_right();
        if moved {
            log::trace!("Lane -> {}", self.state.player.lane);
        }
        moved
    }

    /// End the current run without a crash (host abort).
    ///
    /// The awaited tick token becomes stale. Returns `None` while idle.
    pub fn stop(&mut self) -> Option<RunSummary> {
        if !self.state.run.running() {
            return None;
        }
        self.state.end_run();
        self.pending = None;

        let summary = self.summary(self.state.run.score);
        log::info!(
            "Run stopped: score {} after {} ticks",
            summary.final_score,
            summary.ticks
        );
        self.presenter.run_ended(&summary);
        Some(summary)
    }

    /// Run the tick identified by `token`.
    ///
    /// Returns `None` (and changes nothing) if the token is not the pending
    /// one or the game is idle.
    pub fn on_tick(&mut self, token: TickToken) -> Option<TickOutcome> {
        if self.pending != Some(token) || !self.state.run.running() {
            log::debug!("Dropping stale tick {}", token.id());
            return None;
        }
        self.pending = None;

        let outcome = sim::tick(&mut self.state);
        self.run_ticks += 1;
        self.presenter.present(&Frame::of(&self.state));

        match outcome {
            TickOutcome::Advanced { .. } => self.schedule(),
            TickOutcome::Crashed {
                final_score,
                obstacle_id,
            } => {
                let summary = self.summary(final_score);
                log::info!(
                    "Run ended: score {} after {} ticks (hit obstacle {})",
                    final_score,
                    summary.ticks,
                    obstacle_id
                );
                self.presenter.run_ended(&summary);
            }
            TickOutcome::Idle => {}
        }

        Some(outcome)
    }

    fn summary(&self, final_score: u64) -> RunSummary {
        RunSummary {
            final_score,
            ticks: self.run_ticks,
            top_speed: self.state.run.speed,
        }
    }

    fn schedule(&mut self) {
        let token = TickToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);
        self.scheduler.request_tick(token);
    }
}

impl<P: Presenter> LoopController<ManualScheduler, P> {
    /// Deliver the oldest queued tick, if any
    pub fn pump(&mut self) -> Option<TickOutcome> {
        let token = self.scheduler.next_due()?;
        self.on_tick(token)
    }
}

/// Scheduler whose ticks are delivered by the caller draining a queue.
///
/// Used by the native headless demo and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    queue: VecDeque<TickToken>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest requested tick
    pub fn next_due(&mut self) -> Option<TickToken> {
        self.queue.pop_front()
    }

    /// Forget every queued tick
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl TickScheduler for ManualScheduler {
    fn request_tick(&mut self, token: TickToken) {
        self.queue.push_back(token);
    }
}
