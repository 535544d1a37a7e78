use super::collision::CollisionDetector;
use super::game_state::GameState;
use super::types::{Direction, Position};

/// Autopilot used by headless sessions: heads for the nearest food along a
/// direction that does not end the game on the next tick.
pub struct BotController;

impl BotController {
    pub fn calculate_move(state: &GameState, detector: &CollisionDetector) -> Option<Direction> {
        if state.game_over || state.is_paused {
            return None;
        }
        let head = state.head()?;

        let safe_directions: Vec<Direction> = Self::get_valid_directions(state.direction)
            .into_iter()
            .filter(|&direction| {
                !detector.check_collision_for_next_move(head, direction, &state.snake)
            })
            .collect();

        let Some(target) = Self::find_nearest_food(head, state) else {
            return safe_directions.first().copied();
        };

        safe_directions
            .into_iter()
            .min_by_key(|&direction| {
                let next = detector.next_position(head, direction);
                // Prefer keeping the heading on ties so the snake does not zigzag.
                (next.manhattan_distance(target), direction != state.direction)
            })
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    fn find_nearest_food(from: Position, state: &GameState) -> Option<Position> {
        state
            .foods
            .iter()
            .map(|food| food.position)
            .min_by_key(|position| from.manhattan_distance(*position))
    }
}
