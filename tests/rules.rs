use rand::rngs::StdRng;
use rand::SeedableRng;
use snake_board::{
    advance, Board, Direction, EndReason, GameConfig, JsonFileStore, Leaderboard, Session, Snake,
};

fn start_snake() -> Snake {
    Snake::from_segments(vec![(100, 100), (80, 100), (60, 100)])
}

#[test]
fn eating_food_moves_grows_and_scores() {
    let config = GameConfig::default();
    let dir = tempfile::tempdir().unwrap();
    let mut leaderboard = Leaderboard::open(&dir.path().join("highscores.json"));

    let mut session = Session::with_state(
        &config,
        "Ann",
        start_snake(),
        Direction::Right,
        (120, 100),
        StdRng::seed_from_u64(9),
    );
    session.tick(&mut leaderboard);

    assert_eq!(session.score(), 10);
    assert_eq!(
        session.snake().segments(),
        vec![(120, 100), (100, 100), (80, 100), (60, 100)]
    );
    for old in [(100, 100), (80, 100), (60, 100)].iter() {
        assert_ne!(session.food(), *old);
    }
    assert!(!session.snake().contains(&session.food()));
}

#[test]
fn length_only_changes_when_eating() {
    let board = Board::default();
    let mut rng = StdRng::seed_from_u64(21);
    let mut snake = start_snake();
    let mut food = (140, 100);

    // a clockwise loop that never touches the walls
    let route = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];
    let mut eaten = 0;
    for i in 0..200 {
        let dir = route[(i / 3) % route.len()];
        let before = snake.len();
        let step = advance(&snake, dir, food, &board, &mut rng).unwrap();
        assert!(!step.collided, "tick {} collided", i);

        if step.ate_food {
            eaten += 1;
            assert_eq!(step.snake.len(), before + 1);
            assert!(!step.snake.contains(&step.food));
        } else {
            assert_eq!(step.snake.len(), before);
            assert_eq!(step.food, food);
        }
        snake = step.snake;
        food = step.food;
    }
    assert!(eaten >= 1);
}

#[test]
fn leaving_the_board_anywhere_collides() {
    let board = Board::new(100, 60, 20);
    let mut rng = StdRng::seed_from_u64(4);

    for x in (0..100).step_by(20) {
        let top = Snake::from_segments(vec![(x, 0)]);
        assert!(advance(&top, Direction::Up, (40, 40), &board, &mut rng).unwrap().collided);

        let bottom = Snake::from_segments(vec![(x, 40)]);
        assert!(advance(&bottom, Direction::Down, (40, 20), &board, &mut rng).unwrap().collided);
    }
    for y in (0..60).step_by(20) {
        let left = Snake::from_segments(vec![(0, y)]);
        assert!(advance(&left, Direction::Left, (40, 40), &board, &mut rng).unwrap().collided);

        let right = Snake::from_segments(vec![(80, y)]);
        assert!(advance(&right, Direction::Right, (40, 20), &board, &mut rng).unwrap().collided);
    }
}

#[test]
fn a_full_game_ends_on_the_leaderboard_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscores.json");
    let config = GameConfig { leaderboard_path: path.clone(), ..Default::default() };

    let mut leaderboard =
        Leaderboard::load(Box::new(JsonFileStore::new(path.clone())), config.leaderboard_capacity);
    let mut session = Session::with_state(
        &config,
        "  Cam  ",
        start_snake(),
        Direction::Right,
        (120, 100),
        StdRng::seed_from_u64(2),
    );

    // a second request in the same tick replaces the first
    session.set_intended_direction(Direction::Up);
    session.set_intended_direction(Direction::Right);
    session.tick(&mut leaderboard);
    assert_eq!(session.score(), 10);
    assert_eq!(session.heading(), Direction::Right);

    session.set_intended_direction(Direction::Up);
    while session.is_running() {
        session.tick(&mut leaderboard);
    }

    let outcome = session.outcome().unwrap();
    assert_eq!(outcome.reason, EndReason::Collision);
    assert!(outcome.score >= 10);
    assert!(outcome.qualified);

    let reloaded = Leaderboard::open(&path);
    assert_eq!(reloaded.top_entry(), ("Cam", outcome.score));
}

#[test]
fn scenario_scores_on_a_full_board() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscores.json");

    let mut leaderboard = Leaderboard::open(&path);
    for (name, score) in [("A", 50), ("B", 40), ("C", 30), ("D", 20), ("E", 10)].iter() {
        assert!(leaderboard.submit(name, *score));
    }

    assert!(!leaderboard.submit("Bea", 15));
    assert!(leaderboard.submit("Cam", 25));

    let reloaded = Leaderboard::open(&path);
    let scores: Vec<u32> = reloaded.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![50, 40, 30, 25, 20]);
    assert_eq!(reloaded.entries()[3].name, "Cam");
}
