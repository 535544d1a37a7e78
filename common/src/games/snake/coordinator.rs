use std::sync::Arc;

use crate::games::SessionRng;
use crate::log;
use super::collision::CollisionDetector;
use super::food::FoodSet;
use super::game_state::{DerivedEvent, GameEvent, GameState};
use super::settings::GameSettings;
use super::snake::SnakeState;

pub type StateListener = Box<dyn FnMut(&Arc<GameState>) + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single writer of the game. Events go in through [`handle_event`], snapshots
/// come out through [`state`] and subscribed listeners.
///
/// [`handle_event`]: GameCoordinator::handle_event
/// [`state`]: GameCoordinator::state
pub struct GameCoordinator {
    detector: CollisionDetector,
    food_set: FoodSet,
    snake: SnakeState,
    score: u32,
    state: Arc<GameState>,
    listeners: Vec<(SubscriptionId, StateListener)>,
    next_subscription_id: u64,
}

impl GameCoordinator {
    pub fn new(grid_size: i32, food_count: usize, rng: SessionRng) -> Self {
        let detector = CollisionDetector::new(grid_size);
        let snake = SnakeState::new(grid_size);
        let food_set = FoodSet::new(grid_size, food_count, rng, &snake.occupied_cells());
        let state = Arc::new(Self::build_state(&snake, &food_set, 0));

        Self {
            detector,
            food_set,
            snake,
            score: 0,
            state,
            listeners: Vec::new(),
            next_subscription_id: 0,
        }
    }

    pub fn from_settings(settings: &GameSettings) -> Self {
        let rng = SessionRng::from_optional_seed(settings.seed);
        log!(
            "New game: grid {}x{}, {} food, seed {}",
            settings.grid_size,
            settings.grid_size,
            settings.food_count,
            rng.seed()
        );
        Self::new(settings.grid_size, settings.food_count, rng)
    }

    pub fn state(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    pub fn detector(&self) -> &CollisionDetector {
        &self.detector
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<GameState>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn handle_event(&mut self, event: GameEvent) -> Vec<DerivedEvent> {
        let derived = match event {
            GameEvent::MoveRequested => self.handle_move(),
            GameEvent::DirectionChanged { direction } => {
                self.snake.change_direction(direction);
                Vec::new()
            }
            GameEvent::TogglePause => {
                self.snake.toggle_pause();
                Vec::new()
            }
            GameEvent::GameReset => {
                self.snake.reset();
                self.food_set.reset(&self.snake.occupied_cells());
                self.score = 0;
                log!("Game reset");
                Vec::new()
            }
        };

        self.publish();
        derived
    }

    fn handle_move(&mut self) -> Vec<DerivedEvent> {
        if self.snake.is_game_over() || self.snake.is_paused() {
            return Vec::new();
        }

        let head = self.snake.head().position;
        let next_head = self.detector.next_position(head, self.snake.direction());

        if let Some(kind) = self.detector.collision_kind(next_head, self.snake.segments()) {
            self.snake.snake_collided();
            log!(
                "{:?} collision at ({}, {}), final score {}",
                kind,
                next_head.x,
                next_head.y,
                self.score
            );
            return vec![DerivedEvent::SnakeCollided];
        }

        let mut derived = Vec::new();
        let eaten = self
            .detector
            .check_food_collision(next_head, self.food_set.foods())
            .copied();

        if let Some(food_item) = eaten {
            self.food_set
                .replace_food_at_position(food_item.position, &self.snake.occupied_cells());
            self.score += 1;
            self.snake.food_eaten(food_item.fruit_type);
            log!(
                "Ate fruit {} at ({}, {}), score {}",
                food_item.fruit_type.value(),
                food_item.position.x,
                food_item.position.y,
                self.score
            );
            derived.push(DerivedEvent::FoodEaten { food_item });
        }

        self.snake.move_snake();
        derived
    }

    fn build_state(snake: &SnakeState, food_set: &FoodSet, score: u32) -> GameState {
        GameState {
            snake: snake.segments().iter().copied().collect(),
            foods: food_set.foods().to_vec(),
            direction: snake.direction(),
            game_over: snake.is_game_over(),
            score,
            is_paused: snake.is_paused(),
            color_positions: snake.color_positions(),
        }
    }

    /// Swaps in a fresh snapshot and notifies listeners in subscription order.
    /// Events that leave the state untouched publish nothing.
    fn publish(&mut self) {
        let next = Self::build_state(&self.snake, &self.food_set, self.score);
        if *self.state == next {
            return;
        }

        self.state = Arc::new(next);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use crate::games::snake::types::{Direction, Position, FOOD_COUNT, GRID_SIZE};

    fn create_coordinator(seed: u64) -> GameCoordinator {
        GameCoordinator::new(GRID_SIZE, FOOD_COUNT, SessionRng::new(seed))
    }

    fn counting_listener(coordinator: &mut GameCoordinator) -> (SubscriptionId, Arc<Mutex<usize>>) {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        let id = coordinator.subscribe(move |_| *counter.lock().unwrap() += 1);
        (id, calls)
    }

    fn positions(state: &GameState) -> Vec<Position> {
        state.snake.iter().map(|segment| segment.position).collect()
    }

    #[test]
    fn test_initial_state() {
        let coordinator = create_coordinator(1);
        let state = coordinator.state();
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert!(!state.is_paused);
        assert_eq!(positions(&state), vec![Position::new(10, 10), Position::new(10, 11)]);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.foods.len(), FOOD_COUNT);
        assert!(state.color_positions.is_empty());
        for food in &state.foods {
            assert!(!positions(&state).contains(&food.position));
        }
    }

    #[test]
    fn test_direction_changed() {
        let mut coordinator = create_coordinator(2);
        let derived = coordinator.handle_event(GameEvent::DirectionChanged { direction: Direction::Right });
        assert!(derived.is_empty());
        assert_eq!(coordinator.state().direction, Direction::Right);
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut coordinator = create_coordinator(3);
        coordinator.handle_event(GameEvent::DirectionChanged { direction: Direction::Down });
        assert_eq!(coordinator.state().direction, Direction::Up);
    }

    #[test]
    fn test_toggle_pause_twice() {
        let mut coordinator = create_coordinator(4);
        coordinator.handle_event(GameEvent::TogglePause);
        assert!(coordinator.state().is_paused);
        coordinator.handle_event(GameEvent::TogglePause);
        assert!(!coordinator.state().is_paused);
    }

    #[test]
    fn test_paused_game_is_inert() {
        let mut coordinator = create_coordinator(5);
        let before = coordinator.state();
        coordinator.handle_event(GameEvent::TogglePause);

        let derived = coordinator.handle_event(GameEvent::MoveRequested);
        coordinator.handle_event(GameEvent::DirectionChanged { direction: Direction::Left });

        assert!(derived.is_empty());
        let state = coordinator.state();
        assert_eq!(state.snake, before.snake);
        assert_eq!(state.direction, before.direction);
    }

    #[test]
    fn test_runs_into_top_wall() {
        let mut coordinator = create_coordinator(6);
        for _ in 0..10 {
            let derived = coordinator.handle_event(GameEvent::MoveRequested);
            assert!(!derived.contains(&DerivedEvent::SnakeCollided));
        }
        assert_eq!(coordinator.state().head(), Some(Position::new(10, 0)));
        assert!(!coordinator.state().game_over);

        let derived = coordinator.handle_event(GameEvent::MoveRequested);
        assert_eq!(derived, vec![DerivedEvent::SnakeCollided]);
        let state = coordinator.state();
        assert!(state.game_over);
        assert_eq!(state.head(), Some(Position::new(10, 0)));
    }

    #[test]
    fn test_game_over_rejects_moves_and_pause() {
        let mut coordinator = GameCoordinator::new(4, 1, SessionRng::new(7));
        for _ in 0..3 {
            coordinator.handle_event(GameEvent::MoveRequested);
        }
        assert!(coordinator.state().game_over);
        let frozen = coordinator.state();

        assert!(coordinator.handle_event(GameEvent::MoveRequested).is_empty());
        coordinator.handle_event(GameEvent::TogglePause);
        coordinator.handle_event(GameEvent::DirectionChanged { direction: Direction::Right });

        assert_eq!(coordinator.state(), frozen);
        assert!(!coordinator.state().is_paused);
    }

    #[test]
    fn test_eating_scores_grows_and_tags_head() {
        // 14 food items fill every free cell of a 4x4 grid around the snake.
        let mut coordinator = GameCoordinator::new(4, 14, SessionRng::new(8));
        let target = Position::new(2, 1);
        let food = *coordinator
            .state()
            .foods
            .iter()
            .find(|food| food.position == target)
            .unwrap();

        let derived = coordinator.handle_event(GameEvent::MoveRequested);

        assert_eq!(derived, vec![DerivedEvent::FoodEaten { food_item: food }]);
        let state = coordinator.state();
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake[0].position, target);
        assert_eq!(state.snake[0].fruit_type, Some(food.fruit_type));
        assert_eq!(state.snake[1].fruit_type, None);
        assert_eq!(state.foods.len(), 13);
        assert_eq!(state.color_positions.len(), 1);
        assert_eq!(state.color_positions[0].position, target);
    }

    #[test]
    fn test_replacement_food_avoids_snake_and_other_food() {
        let target = Position::new(2, 1);
        let mut coordinator = (0..)
            .map(|seed| GameCoordinator::new(5, 22, SessionRng::new(seed)))
            .find(|c| c.state().foods.iter().any(|food| food.position == target))
            .unwrap();

        let derived = coordinator.handle_event(GameEvent::MoveRequested);
        assert_eq!(derived.len(), 1);

        let state = coordinator.state();
        assert_eq!(state.foods.len(), 22);
        let food_cells: HashSet<Position> = state.foods.iter().map(|f| f.position).collect();
        assert_eq!(food_cells.len(), 22);
        for cell in positions(&state) {
            assert!(!food_cells.contains(&cell));
        }
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut coordinator = GameCoordinator::new(4, 14, SessionRng::new(9));
        coordinator.handle_event(GameEvent::MoveRequested);
        coordinator.handle_event(GameEvent::MoveRequested);
        coordinator.handle_event(GameEvent::MoveRequested);
        coordinator.handle_event(GameEvent::TogglePause);

        coordinator.handle_event(GameEvent::GameReset);

        let state = coordinator.state();
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert!(!state.is_paused);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(positions(&state), vec![Position::new(2, 2), Position::new(2, 3)]);
        assert!(state.color_positions.is_empty());
        assert_eq!(state.foods.len(), 14);
    }

    #[test]
    fn test_subscribers_notified_until_unsubscribed() {
        let mut coordinator = create_coordinator(10);
        let (id, calls) = counting_listener(&mut coordinator);

        coordinator.handle_event(GameEvent::TogglePause);
        assert_eq!(*calls.lock().unwrap(), 1);

        assert!(coordinator.unsubscribe(id));
        coordinator.handle_event(GameEvent::TogglePause);
        assert_eq!(*calls.lock().unwrap(), 1);
        assert!(!coordinator.unsubscribe(id));
    }

    #[test]
    fn test_subscribers_notified_in_registration_order() {
        let mut coordinator = create_coordinator(11);
        let order = Arc::new(Mutex::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            coordinator.subscribe(move |_| order.lock().unwrap().push(name));
        }

        coordinator.handle_event(GameEvent::MoveRequested);

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_listener_receives_current_snapshot() {
        let mut coordinator = create_coordinator(12);
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        coordinator.subscribe(move |state| *sink.lock().unwrap() = Some(Arc::clone(state)));

        coordinator.handle_event(GameEvent::DirectionChanged { direction: Direction::Left });

        let seen = seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen, coordinator.state());
        assert_eq!(seen.direction, Direction::Left);
    }

    #[test]
    fn test_inert_events_do_not_notify() {
        let mut coordinator = create_coordinator(13);
        let (_, calls) = counting_listener(&mut coordinator);

        coordinator.handle_event(GameEvent::DirectionChanged { direction: Direction::Up });
        coordinator.handle_event(GameEvent::DirectionChanged { direction: Direction::Down });
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_published_snapshots_are_never_mutated() {
        let mut coordinator = create_coordinator(14);
        let before = coordinator.state();
        let copy = (*before).clone();

        coordinator.handle_event(GameEvent::MoveRequested);
        coordinator.handle_event(GameEvent::GameReset);

        assert_eq!(*before, copy);
        assert!(!Arc::ptr_eq(&before, &coordinator.state()));
    }
}
