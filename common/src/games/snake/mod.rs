mod bot_controller;
mod collision;
mod coordinator;
mod food;
mod game_state;
mod session;
mod settings;
mod snake;
mod types;

pub use bot_controller::BotController;
pub use collision::CollisionDetector;
pub use coordinator::{GameCoordinator, StateListener, SubscriptionId};
pub use food::FoodSet;
pub use game_state::{DerivedEvent, GameEvent, GameState};
pub use session::{
    run_game_loop, HistoryEntry, SessionCommand, SessionOptions, SessionSummary,
    DEFAULT_HISTORY_CAPACITY,
};
pub use settings::{GameSettings, DEFAULT_TICK_INTERVAL_MS};
pub use snake::{PendingGrowth, SnakeState, SnakeStatus, INITIAL_DIRECTION};
pub use types::{
    CollisionKind, ColorPosition, Direction, FoodItem, FruitType, Position, Segment, FOOD_COUNT,
    FRUIT_TYPE_COUNT, GRID_SIZE,
};
