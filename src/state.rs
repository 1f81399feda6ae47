use crate::board::Board;
use crate::food::FoodRng;
use crate::snake::{DeathReason, Direction, MoveResult, Snake, INITIAL_LENGTH};
use crate::{log, Coords};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOver {
    pub reason: DeathReason,
    pub score: usize,
}

impl GameOver {
    pub fn message(&self) -> String {
        format!("You loose! Your score is: {}", self.score)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake moved. `new_food` is set when it ate and food was respawned.
    Moved { new_food: Option<Coords> },
    GameOver(GameOver),
}

pub struct GameState {
    board: Board,
    snake: Snake,
    food: Coords,
    rng: FoodRng,
}

impl GameState {
    pub fn new(board: Board, mut rng: FoodRng) -> Self {
        let food = rng.spawn(&board);
        Self::from_parts(board, Snake::default(), food, rng)
    }

    pub fn from_parts(board: Board, snake: Snake, food: Coords, rng: FoodRng) -> Self {
        GameState { board, snake, food, rng }
    }

    #[cfg(test)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(INITIAL_LENGTH)
    }

    pub fn set_direction(&mut self, requested: Direction) {
        if !self.snake.set_direction(requested) {
            log!(
                "Ignored reversal {:?} while heading {:?}, keeping {:?}",
                requested,
                self.snake.heading(),
                self.snake.direction()
            );
        }
    }

    /// Advances the game by one tick.
    pub fn step(&mut self) -> StepOutcome {
        match self.snake.move_step(&self.board) {
            MoveResult::Crashed(reason) => StepOutcome::GameOver(GameOver { reason, score: self.score() }),
            MoveResult::Moved { new_head, .. } => {
                if new_head != self.food {
                    return StepOutcome::Moved { new_food: None };
                }

                self.snake.grow();
                self.food = self.rng.spawn(&self.board);
                log!("Food eaten at {:?}, next at {:?}, score {}", new_head, self.food, self.score());

                StepOutcome::Moved { new_food: Some(self.food) }
            }
        }
    }
}
