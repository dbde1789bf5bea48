//! Single-tick movement and collision.
//!
//! [`advance`] is the only state transition of the simulation. It never
//! mutates its inputs; the caller decides whether to commit the result.

use crate::board::{Board, Edge};
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Outcome of moving the snake one cell.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StepResult {
    /// The snake after the move.
    pub snake: Snake,
    /// Where the tail was before the move; a new segment grows here.
    pub trail_point: Position,
    /// The new head hit a wall or another segment.
    pub collided: bool,
    /// The new head landed on the apple.
    pub ate_apple: bool,
}

/// Moves `snake` one cell in `direction` and reports what the head ran into.
///
/// Leaving the board through a portal re-enters at the opposite portal.
/// Wall, body and apple checks all run against the post-move body and are
/// independent of each other.
#[must_use]
pub fn advance(
    snake: &Snake,
    board: &Board,
    apple: Option<Position>,
    direction: Direction,
) -> StepResult {
    let head = next_head(snake.head(), board, direction);
    let trail_point = snake.tail();
    let moved = snake.shifted(head, direction);

    let hit_wall = board.is_wall(head);
    let hit_body = moved.head_overlaps_body();
    let ate_apple = apple == Some(head);

    StepResult {
        snake: moved,
        trail_point,
        collided: hit_wall || hit_body,
        ate_apple,
    }
}

/// Returns the cell the head moves into, wrapping through portals.
#[must_use]
pub fn next_head(head: Position, board: &Board, direction: Direction) -> Position {
    let candidate = head.stepped(direction);
    if board.contains(candidate) {
        return candidate;
    }

    let exit = Edge::exited_by(direction);
    if board.portal(exit) == head {
        board.portal(exit.opposite())
    } else {
        candidate
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{advance, next_head};
    use crate::board::{Board, Edge};
    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    const GRID: GridSize = GridSize {
        width: 80,
        height: 40,
    };

    fn open_board() -> Board {
        Board::from_obstacles(GRID, 5, Vec::new())
    }

    #[test]
    fn straight_run_moves_head_five_cells() {
        let board = open_board();
        let mut snake = Snake::new(Position { x: 40, y: 20 }, 10, 20);

        for _ in 0..5 {
            let step = advance(&snake, &board, None, Direction::Right);
            assert!(!step.collided);
            assert!(!step.ate_apple);
            snake = step.snake;
        }

        assert_eq!(snake.head(), Position { x: 45, y: 20 });
        assert_eq!(snake.len(), 10);
    }

    #[test]
    fn every_portal_wraps_to_its_opposite() {
        let board = open_board();

        for edge in Edge::ALL {
            let direction = match edge {
                Edge::Top => Direction::Up,
                Edge::Bottom => Direction::Down,
                Edge::Left => Direction::Left,
                Edge::Right => Direction::Right,
            };
            let from = board.portal(edge);

            let landed = next_head(from, &board, direction);

            assert_eq!(landed, board.portal(edge.opposite()), "wrapping through {edge:?}");
        }
    }

    #[test]
    fn top_portal_keeps_column() {
        let board = open_board();
        let snake = Snake::with_body(
            vec![Position { x: 40, y: 1 }, Position { x: 40, y: 2 }],
            Direction::Up,
            4,
        );

        let step = advance(&snake, &board, None, Direction::Up);

        assert!(!step.collided);
        assert_eq!(step.snake.head(), Position { x: 40, y: 40 });
        assert_eq!(step.snake.segments()[1], Position { x: 40, y: 1 });
    }

    #[test]
    fn plain_border_cell_is_a_collision() {
        let board = open_board();
        let snake = Snake::with_body(
            vec![Position { x: 10, y: 2 }, Position { x: 10, y: 3 }],
            Direction::Up,
            4,
        );

        let step = advance(&snake, &board, None, Direction::Up);

        assert!(step.collided);
        assert_eq!(step.snake.head(), Position { x: 10, y: 1 });
    }

    #[test]
    fn obstacle_cell_is_a_collision() {
        let board = Board::from_obstacles(GRID, 5, vec![Position { x: 42, y: 18 }]);
        let snake = Snake::new(Position { x: 41, y: 20 }, 3, 5);

        let step = advance(&snake, &board, None, Direction::Right);

        assert!(step.collided);
    }

    #[test]
    fn running_into_own_body_is_a_collision() {
        let board = open_board();
        let snake = Snake::with_body(
            vec![
                Position { x: 10, y: 10 },
                Position { x: 11, y: 10 },
                Position { x: 11, y: 11 },
                Position { x: 10, y: 11 },
                Position { x: 9, y: 11 },
            ],
            Direction::Down,
            8,
        );

        let step = advance(&snake, &board, None, Direction::Down);

        assert!(step.collided);
    }

    #[test]
    fn chasing_the_tail_is_safe() {
        let board = open_board();
        let snake = Snake::with_body(
            vec![
                Position { x: 10, y: 10 },
                Position { x: 11, y: 10 },
                Position { x: 11, y: 11 },
                Position { x: 10, y: 11 },
            ],
            Direction::Down,
            8,
        );

        let step = advance(&snake, &board, None, Direction::Down);

        assert!(!step.collided);
        assert_eq!(step.trail_point, Position { x: 10, y: 11 });
    }

    #[test]
    fn apple_under_new_head_is_eaten() {
        let board = open_board();
        let snake = Snake::new(Position { x: 40, y: 20 }, 3, 5);

        let step = advance(&snake, &board, Some(Position { x: 41, y: 20 }), Direction::Right);

        assert!(step.ate_apple);
        assert!(!step.collided);
    }

    #[test]
    fn input_snake_is_untouched() {
        let board = open_board();
        let snake = Snake::new(Position { x: 40, y: 20 }, 3, 5);
        let before = snake.clone();

        let _ = advance(&snake, &board, None, Direction::Up);

        assert_eq!(snake, before);
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_trail_point_is_former_tail(
            x in 12i32..70,
            y in 3i32..38,
            len in 1usize..10,
            direction in direction_strategy(),
        ) {
            let board = open_board();
            let snake = Snake::new(Position { x, y }, len, 20);

            let step = advance(&snake, &board, None, direction);

            prop_assert_eq!(step.trail_point, snake.tail());
            prop_assert_eq!(step.snake.len(), snake.len());
            prop_assert_eq!(&step.snake.segments()[1..], &snake.segments()[..len - 1]);
        }

        #[test]
        fn prop_grown_tail_restores_former_tail(
            len in 2usize..10,
            direction in prop_oneof![Just(Direction::Up), Just(Direction::Down), Just(Direction::Right)],
        ) {
            let board = open_board();
            let mut snake = Snake::new(Position { x: 40, y: 20 }, len, 20);
            let old_tail = snake.tail();

            let step = advance(&snake, &board, None, direction);
            snake = step.snake;
            snake.grow(step.trail_point);

            prop_assert_eq!(snake.tail(), old_tail);
            prop_assert_eq!(snake.len(), len + 1);
        }
    }
}
