use std::collections::VecDeque;

use crate::board::Board;
use crate::Coords;

pub const INITIAL_BODY: [Coords; 3] = [(2, 6), (2, 4), (2, 2)];
pub const INITIAL_LENGTH: usize = INITIAL_BODY.len();

/// Per-tick displacement as `(rows, columns)`.
///
/// Horizontal moves cover two columns so a step looks about as long as a
/// vertical one on a terminal whose cells are twice as tall as wide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Direction {
    d_row: i32,
    d_col: i32,
}

impl Direction {
    pub const UP: Direction = Direction { d_row: -1, d_col: 0 };
    pub const DOWN: Direction = Direction { d_row: 1, d_col: 0 };
    pub const LEFT: Direction = Direction { d_row: 0, d_col: -2 };
    pub const RIGHT: Direction = Direction { d_row: 0, d_col: 2 };
    pub const STILL: Direction = Direction { d_row: 0, d_col: 0 };

    /// Builds a direction from a raw vector; anything but the five legal
    /// steps yields `None`.
    pub fn new(d_row: i32, d_col: i32) -> Option<Self> {
        [Self::UP, Self::DOWN, Self::LEFT, Self::RIGHT, Self::STILL]
            .into_iter()
            .find(|dir| dir.d_row == d_row && dir.d_col == d_col)
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.d_row + other.d_row == 0 && self.d_col + other.d_col == 0
    }

    pub fn apply(&self, (row, col): Coords) -> Coords {
        (row + self.d_row, col + self.d_col)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords, old_tail: Coords },
    Crashed(DeathReason),
}

#[derive(Clone, Debug)]
pub struct Snake {
    // Head first
    body: VecDeque<Coords>,
    heading: Direction,
    pending: Direction,
}

impl Snake {
    pub fn new(body: impl IntoIterator<Item = Coords>, direction: Direction) -> Self {
        let body: VecDeque<Coords> = body.into_iter().collect();
        debug_assert!(!body.is_empty(), "snake body must not be empty");

        Snake { body, heading: direction, pending: direction }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn tail(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    /// Direction the snake moved in on the last step.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Direction the next step will use.
    pub fn direction(&self) -> Direction {
        self.pending
    }

    /// Queues a turn for the next step. A turn straight back against the
    /// queued direction, or against the last step, is refused. Returns whether
    /// the request was taken.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if requested.is_opposite(&self.pending) || requested.is_opposite(&self.heading) {
            return false;
        }

        self.pending = requested;
        true
    }

    pub fn move_step(&mut self, board: &Board) -> MoveResult {
        self.heading = self.pending;
        let new_head = self.heading.apply(self.head());

        if !board.is_in_bounds(new_head) {
            return MoveResult::Crashed(DeathReason::WallCollision);
        }

        if self.contains(new_head) {
            return MoveResult::Crashed(DeathReason::SelfCollision);
        }

        self.body.push_front(new_head);
        let old_tail = self.body.pop_back().unwrap_or(new_head);

        MoveResult::Moved { new_head, old_tail }
    }

    /// Doubles the tail cell so it stays occupied for one extra step.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push_back(tail);
    }
}

impl Default for Snake {
    fn default() -> Self {
        Snake::new(INITIAL_BODY, Direction::RIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(24, 80).unwrap()
    }

    fn body_of(snake: &Snake) -> Vec<Coords> {
        snake.body().iter().copied().collect()
    }

    #[test]
    fn test_step_right_advances_head_and_drops_tail() {
        let mut snake = Snake::default();

        let result = snake.move_step(&board());

        assert_eq!(result, MoveResult::Moved { new_head: (2, 8), old_tail: (2, 2) });
        assert_eq!(body_of(&snake), vec![(2, 8), (2, 6), (2, 4)]);
    }

    #[test]
    fn test_reverse_request_is_ignored() {
        let mut snake = Snake::default();

        assert!(!snake.set_direction(Direction::LEFT));

        assert_eq!(snake.direction(), Direction::RIGHT);
        assert_eq!(snake.heading(), Direction::RIGHT);
    }

    #[test]
    fn test_only_latest_turn_between_steps_is_used() {
        let mut snake = Snake::default();

        assert!(snake.set_direction(Direction::UP));
        assert!(snake.set_direction(Direction::RIGHT));
        snake.move_step(&board());

        assert_eq!(snake.head(), (2, 8));
        assert_eq!(snake.heading(), Direction::RIGHT);
    }

    #[test]
    fn test_reversing_queued_turn_is_ignored() {
        let mut snake = Snake::default();

        assert!(snake.set_direction(Direction::UP));
        assert!(!snake.set_direction(Direction::DOWN));

        assert_eq!(snake.direction(), Direction::UP);
    }

    #[test]
    fn test_two_quick_turns_cannot_reverse() {
        let mut snake = Snake::default();

        assert!(snake.set_direction(Direction::UP));
        assert!(!snake.set_direction(Direction::LEFT));
        assert_eq!(snake.direction(), Direction::UP);
    }

    #[test]
    fn test_wall_collision() {
        let mut snake = Snake::default();
        snake.set_direction(Direction::UP);

        assert_eq!(snake.move_step(&board()), MoveResult::Crashed(DeathReason::WallCollision));
        assert_eq!(body_of(&snake), INITIAL_BODY.to_vec());
    }

    #[test]
    fn test_self_collision() {
        let mut snake = Snake::new([(3, 4), (3, 6), (4, 6), (4, 4), (4, 2)], Direction::LEFT);
        snake.set_direction(Direction::DOWN);

        assert_eq!(snake.move_step(&board()), MoveResult::Crashed(DeathReason::SelfCollision));
    }

    #[test]
    fn test_grow_duplicates_tail() {
        let mut snake = Snake::default();

        snake.grow();

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), (2, 2));

        snake.move_step(&board());
        assert_eq!(body_of(&snake), vec![(2, 8), (2, 6), (2, 4), (2, 2)]);
    }

    #[test]
    fn test_standing_still_runs_into_own_head() {
        let mut snake = Snake::default();

        assert!(snake.set_direction(Direction::STILL));

        assert_eq!(snake.move_step(&board()), MoveResult::Crashed(DeathReason::SelfCollision));
    }

    #[test]
    fn test_direction_new_accepts_only_legal_vectors() {
        assert_eq!(Direction::new(0, 2), Some(Direction::RIGHT));
        assert_eq!(Direction::new(-1, 0), Some(Direction::UP));
        assert_eq!(Direction::new(0, 0), Some(Direction::STILL));
        assert_eq!(Direction::new(0, 1), None);
        assert_eq!(Direction::new(1, 2), None);
    }

    #[test]
    fn test_opposites() {
        assert!(Direction::UP.is_opposite(&Direction::DOWN));
        assert!(Direction::LEFT.is_opposite(&Direction::RIGHT));
        assert!(!Direction::UP.is_opposite(&Direction::LEFT));
        assert!(Direction::STILL.is_opposite(&Direction::STILL));
    }
}
