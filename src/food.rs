use log::warn;
use rand::Rng;

use crate::board::Board;
use crate::snake::{Position, Snake};

/// Random draws attempted before falling back to enumerating free cells.
const MAX_RANDOM_ATTEMPTS: usize = 10_000;

/// Picks a cell for the next apple that is neither a wall nor under the snake.
///
/// Draws uniformly over the whole grid and rejects occupied cells. On a
/// crowded board the draw falls back to choosing among the free cells
/// directly, so the call always terminates.
///
/// # Panics
///
/// Panics if the board has no free cell at all.
#[must_use]
pub fn spawn_apple<R: Rng + ?Sized>(rng: &mut R, board: &Board, snake: &Snake) -> Position {
    let size = board.size();
    let is_free = |position: Position| !board.is_wall(position) && !snake.occupies(position);

    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(1..=i32::from(size.width)),
            y: rng.gen_range(1..=i32::from(size.height)),
        };
        if is_free(candidate) {
            return candidate;
        }
    }

    warn!("apple placement fell back to free-cell scan");
    let candidates: Vec<Position> = board
        .cells()
        .map(|(position, _)| position)
        .filter(|position| is_free(*position))
        .collect();

    assert!(
        !candidates.is_empty(),
        "spawn_apple: no free cells on the board ({}x{})",
        size.width,
        size.height,
    );

    candidates[rng.gen_range(0..candidates.len())]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    use super::spawn_apple;
    use crate::board::Board;
    use crate::config::{GameConfig, GridSize};
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    #[test]
    fn apple_never_lands_on_wall_or_snake() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let board = Board::generate(
                config.grid,
                config.obstacle_count,
                config.obstacle_size,
                config.forbidden_zone(),
                &mut rng,
            );
            let snake = Snake::new(config.start_position(), 10, 20);

            for _ in 0..100 {
                let apple = spawn_apple(&mut rng, &board, &snake);
                assert!(!board.is_wall(apple));
                assert!(!snake.occupies(apple));
                assert!(board.contains(apple));
            }
        }
    }

    #[test]
    fn crowded_board_still_finds_last_free_cell() {
        // 5x5 board: 3x3 interior plus portals. Cover the interior except one cell.
        let board = Board::from_obstacles(
            GridSize {
                width: 5,
                height: 5,
            },
            1,
            Vec::new(),
        );
        let body: Vec<Position> = (2..=4)
            .flat_map(|y| (2..=4).map(move |x| Position { x, y }))
            .filter(|position| *position != Position { x: 3, y: 3 })
            .collect();
        let snake = Snake::with_body(body, Direction::Right, 8);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..20 {
            let apple = spawn_apple(&mut rng, &board, &snake);
            assert!(apple == Position { x: 3, y: 3 } || board.is_portal(apple));
        }
    }

    #[test]
    fn stuck_random_draws_fall_back_to_free_cell_scan() {
        let board = Board::from_obstacles(
            GridSize {
                width: 5,
                height: 5,
            },
            1,
            Vec::new(),
        );
        let snake = Snake::with_body(vec![Position { x: 3, y: 3 }], Direction::Right, 8);
        // A constant generator keeps drawing the (1, 1) corner wall.
        let mut rng = StepRng::new(0, 0);

        let apple = spawn_apple(&mut rng, &board, &snake);

        assert!(!board.is_wall(apple));
        assert!(!snake.occupies(apple));
        assert_eq!(apple, Position { x: 2, y: 1 });
    }
}
