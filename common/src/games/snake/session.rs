use std::sync::Arc;
use std::time::Duration;
use ringbuffer::{AllocRingBuffer, RingBuffer};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

use crate::log;
use super::bot_controller::BotController;
use super::coordinator::GameCoordinator;
use super::game_state::{DerivedEvent, GameEvent, GameState};
use super::settings::GameSettings;
use super::types::Direction;

pub const DEFAULT_HISTORY_CAPACITY: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    TogglePause,
    Reset,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryEntry {
    Input(GameEvent),
    Derived(DerivedEvent),
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub tick_interval: Duration,
    pub autopilot: bool,
    pub max_ticks: Option<u64>,
    pub stop_on_game_over: bool,
    pub history_capacity: usize,
}

impl From<&GameSettings> for SessionOptions {
    fn from(settings: &GameSettings) -> Self {
        Self {
            tick_interval: settings.tick_interval(),
            autopilot: settings.autopilot,
            max_ticks: None,
            stop_on_game_over: true,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug)]
pub struct SessionSummary {
    pub ticks: u64,
    pub final_state: Arc<GameState>,
    pub history: Vec<HistoryEntry>,
}

struct Session {
    coordinator: GameCoordinator,
    history: AllocRingBuffer<HistoryEntry>,
    direction_changed_since_move: bool,
}

impl Session {
    fn dispatch(&mut self, event: GameEvent) -> Vec<DerivedEvent> {
        let derived = self.coordinator.handle_event(event);
        self.history.enqueue(HistoryEntry::Input(event));
        for derived_event in &derived {
            self.history.enqueue(HistoryEntry::Derived(*derived_event));
        }
        derived
    }

    /// At most one accepted turn per tick, so two quick key presses cannot
    /// fold the snake back onto its neck before it has moved.
    fn turn(&mut self, direction: Direction) {
        if self.direction_changed_since_move {
            return;
        }
        let before = self.coordinator.state().direction;
        self.dispatch(GameEvent::DirectionChanged { direction });
        self.direction_changed_since_move = self.coordinator.state().direction != before;
    }

    fn tick(&mut self, autopilot: bool) {
        if autopilot {
            let state = self.coordinator.state();
            if let Some(direction) = BotController::calculate_move(&state, self.coordinator.detector()) {
                self.turn(direction);
            }
        }
        self.dispatch(GameEvent::MoveRequested);
        self.direction_changed_since_move = false;
    }
}

/// Drives `coordinator` with a `MoveRequested` every `tick_interval`, applying
/// queued commands between ticks. Commands take priority over a due tick.
pub async fn run_game_loop(
    coordinator: GameCoordinator,
    options: SessionOptions,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
) -> SessionSummary {
    let mut session = Session {
        coordinator,
        history: AllocRingBuffer::new(options.history_capacity.max(1)),
        direction_changed_since_move: false,
    };
    let mut tick_interval_timer = interval(options.tick_interval);
    tick_interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut commands_open = true;
    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            biased;

            command = commands.recv(), if commands_open => {
                match command {
                    Some(SessionCommand::Turn(direction)) => session.turn(direction),
                    Some(SessionCommand::TogglePause) => {
                        session.dispatch(GameEvent::TogglePause);
                    }
                    Some(SessionCommand::Reset) => {
                        session.dispatch(GameEvent::GameReset);
                        session.direction_changed_since_move = false;
                    }
                    Some(SessionCommand::Stop) => {
                        log!("Session stopped after {} ticks", ticks);
                        break;
                    }
                    None => commands_open = false,
                }
            }

            _ = tick_interval_timer.tick() => {
                session.tick(options.autopilot);
                ticks += 1;

                if options.stop_on_game_over && session.coordinator.state().game_over {
                    log!("Game over after {} ticks", ticks);
                    break;
                }
                if options.max_ticks.is_some_and(|max| ticks >= max) {
                    break;
                }
            }
        }
    }

    SessionSummary {
        ticks,
        final_state: session.coordinator.state(),
        history: session.history.to_vec(),
    }
}
