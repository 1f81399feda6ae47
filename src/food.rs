use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::Coords;

pub struct FoodRng {
    rng: StdRng,
    seed: u64,
}

impl FoodRng {
    pub fn new(seed: u64) -> Self {
        FoodRng { rng: StdRng::seed_from_u64(seed), seed }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Picks a cell with an even row and an even column inside the border.
    ///
    /// Row and column are redrawn independently until each is even. The snake
    /// body is not consulted, so food may land under it.
    pub fn spawn(&mut self, board: &Board) -> Coords {
        let mut row = 1;
        while row % 2 != 0 {
            row = self.rng.gen_range(board.food_rows());
        }

        let mut col = 1;
        while col % 2 != 0 {
            col = self.rng.gen_range(board.food_columns());
        }

        (row, col)
    }
}
