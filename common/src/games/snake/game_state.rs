use serde::{Deserialize, Serialize};

use super::types::{ColorPosition, Direction, FoodItem, Position, Segment};

/// Immutable snapshot published after every state-changing event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub snake: Vec<Segment>,
    pub foods: Vec<FoodItem>,
    pub direction: Direction,
    pub game_over: bool,
    pub score: u32,
    pub is_paused: bool,
    pub color_positions: Vec<ColorPosition>,
}

impl GameState {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().map(|segment| segment.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    DirectionChanged { direction: Direction },
    MoveRequested,
    TogglePause,
    GameReset,
}

/// Side effects of a processed [`GameEvent`], already applied to the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DerivedEvent {
    SnakeCollided,
    FoodEaten { food_item: FoodItem },
}
