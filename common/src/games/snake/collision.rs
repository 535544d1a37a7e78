use super::types::{CollisionKind, Direction, FoodItem, Position, Segment, GRID_SIZE};

/// Geometric predicates over a square grid. Holds nothing but the grid size.
#[derive(Clone, Copy, Debug)]
pub struct CollisionDetector {
    grid_size: i32,
}

impl Default for CollisionDetector {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}

impl CollisionDetector {
    pub fn new(grid_size: i32) -> Self {
        Self { grid_size }
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    pub fn next_position(&self, head: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(head.x + dx, head.y + dy)
    }

    pub fn is_wall_collision(&self, position: Position) -> bool {
        position.x < 0
            || position.x >= self.grid_size
            || position.y < 0
            || position.y >= self.grid_size
    }

    /// `snake[0]` is the current head and is never compared against.
    pub fn is_self_collision<'a>(
        &self,
        head: Position,
        snake: impl IntoIterator<Item = &'a Segment>,
    ) -> bool {
        snake
            .into_iter()
            .skip(1)
            .any(|segment| segment.position == head)
    }

    pub fn collision_kind<'a>(
        &self,
        head: Position,
        snake: impl IntoIterator<Item = &'a Segment>,
    ) -> Option<CollisionKind> {
        if self.is_wall_collision(head) {
            Some(CollisionKind::Wall)
        } else if self.is_self_collision(head, snake) {
            Some(CollisionKind::SelfCollision)
        } else {
            None
        }
    }

    pub fn check_collision<'a>(
        &self,
        head: Position,
        snake: impl IntoIterator<Item = &'a Segment>,
    ) -> bool {
        self.collision_kind(head, snake).is_some()
    }

    pub fn check_collision_for_next_move<'a>(
        &self,
        head: Position,
        direction: Direction,
        snake: impl IntoIterator<Item = &'a Segment>,
    ) -> bool {
        self.check_collision(self.next_position(head, direction), snake)
    }

    pub fn check_food_collision<'f>(
        &self,
        position: Position,
        foods: &'f [FoodItem],
    ) -> Option<&'f FoodItem> {
        foods.iter().find(|food| food.position == position)
    }
}
