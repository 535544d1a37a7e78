use std::collections::VecDeque;

use super::types::{ColorPosition, Direction, FruitType, Position, Segment, GRID_SIZE};

pub const INITIAL_DIRECTION: Direction = Direction::Up;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnakeStatus {
    Active,
    Paused,
    GameOver,
}

/// Growth claimed by an eaten fruit, consumed by the next move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingGrowth {
    None,
    Grow(FruitType),
}

#[derive(Clone, Debug)]
pub struct SnakeState {
    body: VecDeque<Segment>,
    direction: Direction,
    status: SnakeStatus,
    pending_growth: PendingGrowth,
    spawn: Position,
}

impl Default for SnakeState {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}

impl SnakeState {
    /// Spawns at the grid centre with the tail one cell below, heading up.
    pub fn new(grid_size: i32) -> Self {
        let spawn = Position::new(grid_size / 2, grid_size / 2);
        Self {
            body: Self::spawn_body(spawn),
            direction: INITIAL_DIRECTION,
            status: SnakeStatus::Active,
            pending_growth: PendingGrowth::None,
            spawn,
        }
    }

    fn spawn_body(spawn: Position) -> VecDeque<Segment> {
        VecDeque::from([
            Segment::plain(spawn),
            Segment::plain(Position::new(spawn.x, spawn.y + 1)),
        ])
    }

    pub fn segments(&self) -> &VecDeque<Segment> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Segment {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn status(&self) -> SnakeStatus {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.status == SnakeStatus::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.status == SnakeStatus::GameOver
    }

    pub fn pending_growth(&self) -> PendingGrowth {
        self.pending_growth
    }

    pub fn occupied_cells(&self) -> Vec<Position> {
        self.body.iter().map(|segment| segment.position).collect()
    }

    pub fn color_positions(&self) -> Vec<ColorPosition> {
        self.body
            .iter()
            .filter_map(|segment| {
                segment.fruit_type.map(|fruit_type| ColorPosition {
                    position: segment.position,
                    fruit_type,
                })
            })
            .collect()
    }

    pub fn change_direction(&mut self, direction: Direction) {
        if self.status != SnakeStatus::Active || direction.is_opposite(&self.direction) {
            return;
        }
        self.direction = direction;
    }

    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            SnakeStatus::Active => SnakeStatus::Paused,
            SnakeStatus::Paused => SnakeStatus::Active,
            SnakeStatus::GameOver => SnakeStatus::GameOver,
        };
    }

    /// Advances one cell. A pending growth keeps the tail and tags the new
    /// head with the eaten fruit; otherwise the head tag is copied forward
    /// (a two-segment snake has no trail yet) and the tail is dropped.
    pub fn move_snake(&mut self) {
        if self.status != SnakeStatus::Active {
            return;
        }

        let head = self.head();
        let (dx, dy) = self.direction.delta();
        let position = Position::new(head.position.x + dx, head.position.y + dy);

        match std::mem::replace(&mut self.pending_growth, PendingGrowth::None) {
            PendingGrowth::Grow(fruit_type) => {
                self.body.push_front(Segment::tagged(position, fruit_type));
            }
            PendingGrowth::None => {
                let fruit_type = if self.body.len() == 2 { None } else { head.fruit_type };
                self.body.push_front(Segment { position, fruit_type });
                self.body.pop_back();
            }
        }
    }

    pub fn snake_collided(&mut self) {
        self.status = SnakeStatus::GameOver;
    }

    pub fn food_eaten(&mut self, fruit_type: FruitType) {
        self.pending_growth = PendingGrowth::Grow(fruit_type);
    }

    pub fn reset(&mut self) {
        self.body = Self::spawn_body(self.spawn);
        self.direction = INITIAL_DIRECTION;
        self.status = SnakeStatus::Active;
        self.pending_growth = PendingGrowth::None;
    }
}
