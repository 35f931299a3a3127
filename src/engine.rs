use log::debug;
use rand::Rng;

use crate::config::Board;
use crate::error::Result;
use crate::food;
use crate::snake::{Direction, Snake};
use crate::Coords;

/// State after one movement step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub snake: Snake,
    pub food: Coords,
    pub ate_food: bool,
    pub collided: bool,
}

/// Moves `snake` one cell in `direction`.
///
/// The tail is dropped unless the new head lands on `food`, so moving into the
/// cell the tail is leaving is not a collision. On a collision the snake and
/// food come back unchanged. Only fails when the snake grows to cover the
/// whole board and no cell is left for new food.
pub fn advance<R: Rng + ?Sized>(
    snake: &Snake,
    direction: Direction,
    food: Coords,
    board: &Board,
    rng: &mut R,
) -> Result<Step> {
    let crashed = || Step { snake: snake.clone(), food, ate_food: false, collided: true };

    let new_head = match snake.next_head(direction, board.cell_size) {
        Some(pos) => pos,
        None => return Ok(crashed()),
    };
    let ate_food = new_head == food;

    let mut moved = snake.clone();
    if !ate_food {
        moved.drop_tail();
    }

    if moved.contains(&new_head) {
        debug!("self collision at {:?}", new_head);
        return Ok(crashed());
    }
    if !board.contains(new_head) {
        debug!("wall collision at {:?}", new_head);
        return Ok(crashed());
    }

    moved.push_head(new_head);

    let food = if ate_food {
        food::place(board, moved.body(), rng)?
    } else {
        food
    };

    Ok(Step { snake: moved, food, ate_food, collided: false })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SnakeError;
    use crate::snake::Direction::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    fn snake(segments: &[Coords]) -> Snake {
        Snake::from_segments(segments.iter().copied())
    }

    #[test]
    fn plain_move_keeps_length() {
        let board = Board::default();
        let start = snake(&[(100, 100), (80, 100), (60, 100)]);

        let step = advance(&start, Down, (300, 300), &board, &mut rng()).unwrap();
        assert!(!step.collided && !step.ate_food);
        assert_eq!(step.snake.segments(), vec![(100, 120), (100, 100), (80, 100)]);
        assert_eq!(step.food, (300, 300));
    }

    #[test]
    fn eating_grows_and_respawns_food() {
        let board = Board::default();
        let start = snake(&[(100, 100), (80, 100), (60, 100)]);

        let step = advance(&start, Right, (120, 100), &board, &mut rng()).unwrap();
        assert!(step.ate_food && !step.collided);
        assert_eq!(step.snake.segments(), vec![(120, 100), (100, 100), (80, 100), (60, 100)]);
        assert!(!step.snake.contains(&step.food));
        assert!(board.contains(step.food) && board.is_aligned(step.food));
    }

    #[test]
    fn every_wall_collides() {
        let board = Board::new(100, 100, 20);
        let cases = [
            ((0, 40), Left),
            ((80, 40), Right),
            ((40, 0), Up),
            ((40, 80), Down),
        ];

        for &(head, dir) in cases.iter() {
            let start = Snake::new(head, 1, dir, 20);
            let step = advance(&start, dir, (40, 40), &board, &mut rng()).unwrap();
            assert!(step.collided, "{:?} from {:?} should hit the wall", dir, head);
            assert_eq!(step.snake, start);
        }
    }

    #[test]
    fn biting_the_body_collides() {
        let board = Board::default();
        // Body curls down, right and back up past the head.
        let start = snake(&[(40, 40), (40, 60), (60, 60), (60, 40), (60, 20)]);

        let step = advance(&start, Right, (200, 200), &board, &mut rng()).unwrap();
        assert!(step.collided);
    }

    #[test]
    fn following_the_tail_is_allowed() {
        let board = Board::default();
        // 2x2 loop: the head moves into the cell the tail is vacating.
        let start = snake(&[(40, 40), (40, 60), (60, 60), (60, 40)]);

        let step = advance(&start, Right, (200, 200), &board, &mut rng()).unwrap();
        assert!(!step.collided);
        assert_eq!(step.snake.segments(), vec![(60, 40), (40, 40), (40, 60), (60, 60)]);
    }

    #[test]
    fn tail_stays_put_when_eating() {
        let board = Board::default();
        let start = snake(&[(40, 40), (40, 60), (60, 60), (60, 40)]);

        let step = advance(&start, Up, (40, 20), &board, &mut rng()).unwrap();
        assert!(step.ate_food);
        assert_eq!(step.snake.len(), 5);
        assert_eq!(step.snake.tail(), Some((60, 40)));
    }

    #[test]
    fn filling_the_board_is_exhaustion() {
        let board = Board::new(40, 20, 20);
        let start = snake(&[(0, 0)]);

        let err = advance(&start, Right, (20, 0), &board, &mut rng()).unwrap_err();
        assert!(matches!(err, SnakeError::BoardExhausted));
    }
}
