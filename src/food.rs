use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::config::Board;
use crate::error::{Result, SnakeError};
use crate::Coords;

/// Picks a cell uniformly among those not in `occupied`.
///
/// Fails with [`SnakeError::BoardExhausted`] instead of retrying when every
/// cell is taken.
pub fn place<'a, I, R>(board: &Board, occupied: I, rng: &mut R) -> Result<Coords>
where
    I: IntoIterator<Item = &'a Coords>,
    R: Rng + ?Sized,
{
    let occupied: HashSet<Coords> = occupied.into_iter().copied().collect();

    board
        .cells()
        .filter(|pos| !occupied.contains(pos))
        .choose(rng)
        .ok_or(SnakeError::BoardExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_lands_on_the_snake() {
        let board = Board::new(100, 100, 20);
        let snake = vec![(0, 0), (20, 0), (40, 0), (60, 0), (80, 0)];
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let food = place(&board, &snake, &mut rng).unwrap();
            assert!(!snake.contains(&food));
            assert!(board.contains(food) && board.is_aligned(food));
        }
    }

    #[test]
    fn finds_the_last_free_cell() {
        let board = Board::new(40, 40, 20);
        let occupied = vec![(0, 0), (20, 0), (0, 20)];
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(place(&board, &occupied, &mut rng).unwrap(), (20, 20));
    }

    #[test]
    fn full_board_is_exhausted() {
        let board = Board::new(40, 40, 20);
        let occupied: Vec<_> = board.cells().collect();
        let mut rng = StdRng::seed_from_u64(1);

        let err = place(&board, &occupied, &mut rng).unwrap_err();
        assert!(matches!(err, SnakeError::BoardExhausted));
    }

    #[test]
    fn reaches_every_free_cell() {
        let board = Board::new(60, 60, 20);
        let occupied = vec![(20, 20)];
        let mut rng = StdRng::seed_from_u64(42);

        let seen: HashSet<Coords> =
            (0..500).map(|_| place(&board, &occupied, &mut rng).unwrap()).collect();
        assert_eq!(seen.len(), 8);
    }
}
