use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Board, GameConfig};
use crate::engine::advance;
use crate::error::Result;
use crate::food;
use crate::leaderboard::Leaderboard;
use crate::scheduler::Ticker;
use crate::snake::{Direction, Snake};
use crate::Coords;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Running,
    GameOver,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndReason {
    Collision,
    /// No free cell left for food: the snake covers the board.
    BoardFilled,
    /// The player left before the game ended; nothing is submitted.
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub score: u32,
    pub qualified: bool,
    pub reason: EndReason,
}

/// One game, from the first tick to game over. Start a new session to play
/// again.
pub struct Session {
    board: Board,
    food_reward: u32,
    player_name: String,
    snake: Snake,
    food: Coords,
    heading: Direction,
    intended: Direction,
    score: u32,
    state: SessionState,
    active: bool,
    outcome: Option<GameOutcome>,
    ticker: Ticker,
    rng: StdRng,
}

impl Session {
    pub fn new(config: &GameConfig, player_name: &str) -> Result<Self> {
        Session::with_rng(config, player_name, StdRng::from_entropy())
    }

    pub fn with_rng(config: &GameConfig, player_name: &str, mut rng: StdRng) -> Result<Self> {
        let snake = Snake::from_segments(config.initial_snake.iter().copied());
        let food = food::place(&config.board, snake.body(), &mut rng)?;

        Ok(Session::with_state(config, player_name, snake, config.initial_heading, food, rng))
    }

    /// Session resuming from an arbitrary position.
    pub fn with_state(
        config: &GameConfig,
        player_name: &str,
        snake: Snake,
        heading: Direction,
        food: Coords,
        rng: StdRng,
    ) -> Self {
        let player_name = config.player_name(player_name);
        info!("{} starts a game on a {}x{} board", player_name, config.board.columns(), config.board.rows());

        Session {
            board: config.board,
            food_reward: config.food_reward,
            player_name,
            snake,
            food,
            heading,
            intended: heading,
            score: 0,
            state: SessionState::Running,
            active: true,
            outcome: None,
            ticker: Ticker::start(config.tick_interval(), Instant::now()),
            rng,
        }
    }

    /// Start accepting direction input.
    pub fn activate(&mut self) {
        if self.state == SessionState::Running {
            self.active = true;
        }
    }

    /// Stop accepting direction input.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Queues `direction` for the next tick. A reversal of the current
    /// heading is dropped.
    pub fn set_intended_direction(&mut self, direction: Direction) {
        if self.state != SessionState::Running || !self.active {
            return;
        }
        if direction.is_reverse_of(self.heading) {
            debug!("ignoring reversal {:?} while heading {:?}", direction, self.heading);
            return;
        }
        self.intended = direction;
    }

    /// Like [`Session::set_intended_direction`], for textual input. Unknown
    /// tokens are ignored.
    pub fn set_intended_direction_token(&mut self, token: &str) {
        if let Some(direction) = Direction::from_token(token) {
            self.set_intended_direction(direction);
        }
    }

    /// Runs one movement step. Does nothing once the game is over.
    pub fn tick(&mut self, leaderboard: &mut Leaderboard) -> SessionState {
        if self.state == SessionState::GameOver {
            return self.state;
        }

        self.heading = self.intended;

        match advance(&self.snake, self.heading, self.food, &self.board, &mut self.rng) {
            Ok(step) if step.collided => self.finish(EndReason::Collision, leaderboard),
            Ok(step) => {
                if step.ate_food {
                    self.score += self.food_reward;
                    debug!("food eaten, score {} length {}", self.score, step.snake.len());
                }
                self.snake = step.snake;
                self.food = step.food;
            }
            // food placement is the only way a step can fail
            Err(e) => {
                warn!("{}, ending the game", e);
                // the winning move still counts
                if let Some(head) = self.snake.next_head(self.heading, self.board.cell_size) {
                    self.snake.push_head(head);
                }
                self.score += self.food_reward;
                self.finish(EndReason::BoardFilled, leaderboard);
            }
        }

        self.state
    }

    /// Ticks if the schedule says one is due. Returns whether it did.
    pub fn pump(&mut self, now: Instant, leaderboard: &mut Leaderboard) -> bool {
        if self.state == SessionState::GameOver || !self.ticker.due(now) {
            return false;
        }
        self.tick(leaderboard);
        true
    }

    /// How long until the next tick is due. `None` once the game is over,
    /// as nothing is scheduled after that.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        match self.state {
            SessionState::Running => Some(self.ticker.until_next(now)),
            SessionState::GameOver => None,
        }
    }

    /// Leaves the game without submitting the score.
    pub fn abandon(&mut self) {
        if self.state == SessionState::GameOver {
            return;
        }
        info!("{} left the game with {}", self.player_name, self.score);
        self.state = SessionState::GameOver;
        self.active = false;
        self.outcome = Some(GameOutcome { score: self.score, qualified: false, reason: EndReason::Abandoned });
    }

    fn finish(&mut self, reason: EndReason, leaderboard: &mut Leaderboard) {
        self.state = SessionState::GameOver;
        self.active = false;

        let qualified = leaderboard.submit(&self.player_name, self.score);
        info!("game over ({:?}) for {}: score {}, qualified {}", reason, self.player_name, self.score, qualified);

        self.outcome = Some(GameOutcome { score: self.score, qualified, reason });
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Set once the game is over.
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }
}
