use std::collections::HashSet;

use crate::games::SessionRng;
use crate::log;
use super::types::{FoodItem, FruitType, Position, FRUIT_TYPE_COUNT};

#[derive(Clone, Debug)]
pub struct FoodSet {
    foods: Vec<FoodItem>,
    grid_size: i32,
    food_count: usize,
    rng: SessionRng,
}

impl FoodSet {
    /// Builds the set and places the first batch around `occupied_cells`.
    pub fn new(grid_size: i32, food_count: usize, rng: SessionRng, occupied_cells: &[Position]) -> Self {
        let mut food_set = Self {
            foods: Vec::with_capacity(food_count),
            grid_size,
            food_count,
            rng,
        };
        food_set.initialize(occupied_cells);
        food_set
    }

    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    pub fn food_count(&self) -> usize {
        self.food_count
    }

    pub fn initialize(&mut self, occupied_cells: &[Position]) {
        let blocked: HashSet<Position> = occupied_cells.iter().copied().collect();
        let mut free_cells = self.free_cells(&blocked);

        self.foods.clear();
        while self.foods.len() < self.food_count {
            let Some(index) = self.rng.pick_index(free_cells.len()) else {
                log!(
                    "Grid is full, placed {} of {} food items",
                    self.foods.len(),
                    self.food_count
                );
                break;
            };
            let position = free_cells.swap_remove(index);
            let fruit_type = self.random_fruit_type();
            self.foods.push(FoodItem { position, fruit_type });
        }
    }

    pub fn check_food_collision(&self, position: Position) -> Option<&FoodItem> {
        self.foods.iter().find(|food| food.position == position)
    }

    pub fn is_position_occupied_by_food(&self, position: Position) -> bool {
        self.check_food_collision(position).is_some()
    }

    /// Swaps the item at `position` for a fresh one in the same slot. The new
    /// item avoids `occupied_cells` and every current food cell, including the
    /// one being replaced. When nothing is free the item is dropped.
    pub fn replace_food_at_position(&mut self, position: Position, occupied_cells: &[Position]) {
        let Some(slot) = self.foods.iter().position(|food| food.position == position) else {
            return;
        };

        let blocked: HashSet<Position> = occupied_cells
            .iter()
            .copied()
            .chain(self.foods.iter().map(|food| food.position))
            .collect();
        let free_cells = self.free_cells(&blocked);

        match self.rng.pick_index(free_cells.len()) {
            Some(index) => {
                let fruit_type = self.random_fruit_type();
                self.foods[slot] = FoodItem { position: free_cells[index], fruit_type };
            }
            None => {
                self.foods.remove(slot);
                log!(
                    "No free cell for replacement food, {} items remain",
                    self.foods.len()
                );
            }
        }
    }

    pub fn reset(&mut self, occupied_cells: &[Position]) {
        self.initialize(occupied_cells);
    }

    fn free_cells(&self, blocked: &HashSet<Position>) -> Vec<Position> {
        (0..self.grid_size)
            .flat_map(|y| (0..self.grid_size).map(move |x| Position::new(x, y)))
            .filter(|cell| !blocked.contains(cell))
            .collect()
    }

    fn random_fruit_type(&mut self) -> FruitType {
        FruitType::wrapping(self.rng.random_range(0..FRUIT_TYPE_COUNT))
    }
}
