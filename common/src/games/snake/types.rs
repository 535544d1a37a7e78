use serde::{Deserialize, Serialize};

pub const GRID_SIZE: i32 = 20;
pub const FOOD_COUNT: usize = 10;
pub const FRUIT_TYPE_COUNT: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit grid vector; `y` grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }
}

impl TryFrom<(i32, i32)> for Direction {
    type Error = String;

    fn try_from(vector: (i32, i32)) -> Result<Self, Self::Error> {
        match vector {
            (0, -1) => Ok(Direction::Up),
            (0, 1) => Ok(Direction::Down),
            (-1, 0) => Ok(Direction::Left),
            (1, 0) => Ok(Direction::Right),
            (x, y) => Err(format!("({}, {}) is not a cardinal unit direction", x, y)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FruitType(u8);

impl FruitType {
    pub fn new(value: u8) -> Result<Self, String> {
        if value < FRUIT_TYPE_COUNT {
            Ok(Self(value))
        } else {
            Err(format!(
                "Fruit type {} is out of range 0..{}",
                value, FRUIT_TYPE_COUNT
            ))
        }
    }

    /// Folds any byte into range; used for values sampled by the engine itself.
    pub(crate) fn wrapping(value: u8) -> Self {
        Self(value % FRUIT_TYPE_COUNT)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for FruitType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FruitType> for u8 {
    fn from(fruit_type: FruitType) -> Self {
        fruit_type.0
    }
}

/// One snake cell. Collisions compare `position` only; the fruit tag is
/// presentation state carried along the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub position: Position,
    pub fruit_type: Option<FruitType>,
}

impl Segment {
    pub fn plain(position: Position) -> Self {
        Self { position, fruit_type: None }
    }

    pub fn tagged(position: Position, fruit_type: FruitType) -> Self {
        Self { position, fruit_type: Some(fruit_type) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub position: Position,
    pub fruit_type: FruitType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPosition {
    pub position: Position,
    pub fruit_type: FruitType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionKind {
    Wall,
    SelfCollision,
}
