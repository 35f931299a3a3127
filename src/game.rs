use std::thread::sleep;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};

use snake_board::snake::head_char;
use snake_board::{
    Coords, Direction, EndReason, GameConfig, GameOutcome, Leaderboard, Result, Session, SnakeError,
};

use crate::term::{TermCoords, TermInt, TermManager};

const MAX_NAME_LEN: usize = 20;
const CELL_WIDTH: TermInt = 2;

const SNAKE_BODY_CELL: &str = "██";
const FOOD_CELL: &str = "()";
const DEAD_SNAKE_CELL: &str = "XX";
const EMPTY_CELL: &str = "  ";

/// What the player picked on the home screen.
enum Choice {
    Play(String),
    Quit,
}

/// How a screen was left.
enum Flow {
    Home,
    Quit,
}

pub struct SnakeGame {
    config: GameConfig,
    term: TermManager,
    leaderboard: Leaderboard,
    last_name: String,
    origin: TermCoords,
}

impl SnakeGame {
    pub fn new(config: GameConfig, leaderboard: Leaderboard, name: Option<String>) -> Result<Self> {
        let term = TermManager::new()?;
        let last_name = name.unwrap_or_else(|| config.default_player_name.clone());
        Ok(SnakeGame { config, term, leaderboard, last_name, origin: (0, 0) })
    }

    pub fn initialize(&mut self) -> Result<()> {
        let (w, h) = self.term.get_terminal_size();
        let inner = self.board_size();

        // score line above, help line below, plus the frame
        let needed = (inner.0 + 2, inner.1 + 4);
        if w < needed.0 || h < needed.1 {
            return Err(SnakeError::Terminal(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("terminal is {}x{}, the board needs {}x{}", w, h, needed.0, needed.1),
            )));
        }

        self.origin = ((w - needed.0) / 2, (h - needed.1) / 2 + 1);
        self.term.setup()?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()?;
        Ok(())
    }

    /// Home screen, game, end screen, home screen... until the player quits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.home()? {
                Choice::Play(name) => {
                    if let Flow::Quit = self.play(&name)? {
                        return Ok(());
                    }
                }
                Choice::Quit => return Ok(()),
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn home(&mut self) -> Result<Choice> {
        self.term.clear()?;
        let mut typed = self.last_name.clone();

        loop {
            self.show_home(&typed)?;

            let key = self.term.read_key_blocking()?;
            match key.code {
                _ if is_ctrl_c(&key) => return Ok(Choice::Quit),
                KeyCode::Esc => return Ok(Choice::Quit),
                KeyCode::Enter => {
                    let name = self.config.player_name(&typed);
                    self.last_name = name.clone();
                    return Ok(Choice::Play(name));
                }
                KeyCode::Backspace => {
                    typed.pop();
                }
                KeyCode::Char(c) if !c.is_control() && typed.chars().count() < MAX_NAME_LEN => {
                    typed.push(c);
                }
                _ => {}
            }
        }
    }

    fn show_home(&mut self, typed: &str) -> Result<()> {
        let (top_name, top_score) = self.leaderboard.top_entry();
        let high_score = format!("High Score: {} ({})", top_score, top_name);
        let name_line = format!("Name: {}_", typed);

        let table: Vec<String> = self
            .leaderboard
            .entries()
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {:<20} {:>6}", i + 1, e.name, e.score))
            .collect();

        let mut lines: Vec<&str> = vec!["Welcome to Snake!", "", high_score.as_str(), ""];
        lines.extend(table.iter().map(String::as_str));
        if !table.is_empty() {
            lines.push("");
        }
        lines.extend_from_slice(&[name_line.as_str(), "", "Enter to start game", "Esc to exit"]);

        self.term.show_message(&lines)?;
        Ok(())
    }

    fn play(&mut self, name: &str) -> Result<Flow> {
        let mut session = Session::new(&self.config, name)?;
        session.activate();

        self.term.clear()?;
        let inner = self.board_size();
        self.term.draw_borders(self.origin, inner)?;
        self.term.print_str_at(
            (self.origin.0, self.origin.1 + inner.1 + 2),
            "Arrows/WASD to move, Esc back to home, Ctrl+C to quit",
        )?;

        let mut drawn_snake: Vec<Coords> = vec![];
        let mut drawn_food = None;
        self.render(&session, &mut drawn_snake, &mut drawn_food)?;

        while let Some(wait) = session.next_tick_in(Instant::now()) {
            if let Some(key) = self.term.poll_key(wait)? {
                match key.code {
                    _ if is_ctrl_c(&key) => {
                        session.abandon();
                        return Ok(Flow::Quit);
                    }
                    KeyCode::Esc => {
                        session.abandon();
                        return Ok(Flow::Home);
                    }
                    _ => {
                        if let Some(dir) = key_direction(&key) {
                            session.set_intended_direction(dir);
                        }
                    }
                }
            }

            if session.pump(Instant::now(), &mut self.leaderboard) {
                self.render(&session, &mut drawn_snake, &mut drawn_food)?;
            }
        }

        session.deactivate();
        match session.outcome() {
            Some(outcome) => self.game_over(&session, outcome.clone()),
            None => Ok(Flow::Home),
        }
    }

    fn game_over(&mut self, session: &Session, outcome: GameOutcome) -> Result<Flow> {
        if outcome.reason == EndReason::Collision {
            for &pos in session.snake().body() {
                self.print_cell(pos, DEAD_SNAKE_CELL)?;
            }
        }

        let title = match outcome.reason {
            EndReason::BoardFilled => "YOU FILLED THE BOARD",
            _ => "GAME OVER",
        };
        let final_score = format!("Final Score: {}", outcome.score);

        let mut lines = vec![title];
        if outcome.qualified {
            lines.push("NEW HIGH SCORE!");
        }
        lines.push("");
        lines.push(final_score.as_str());

        if let Some(e) = self.leaderboard.take_persist_error() {
            warn!("showing save failure to the player: {}", e);
            lines.push("");
            lines.push("Could not save high scores.");
        }

        self.term.show_message(&lines)?;

        // Keys pressed during the end screen are dropped, except Ctrl+C.
        let deadline = Instant::now() + self.config.game_over_delay();
        while Instant::now() < deadline {
            if self.term.read_key_events_queue()?.iter().any(is_ctrl_c) {
                return Ok(Flow::Quit);
            }
            sleep(Duration::from_millis(20));
        }

        info!("back to the home screen");
        Ok(Flow::Home)
    }

    fn render(
        &mut self,
        session: &Session,
        drawn_snake: &mut Vec<Coords>,
        drawn_food: &mut Option<Coords>,
    ) -> Result<()> {
        for pos in drawn_snake.drain(..) {
            self.print_cell(pos, EMPTY_CELL)?;
        }
        if let Some(food) = drawn_food.take() {
            self.print_cell(food, EMPTY_CELL)?;
        }

        self.print_cell(session.food(), FOOD_CELL)?;
        *drawn_food = Some(session.food());

        let head = head_char(session.heading()).to_string().repeat(CELL_WIDTH as usize);
        for (i, &pos) in session.snake().body().iter().enumerate() {
            let cell = if i == 0 {head.as_str()} else {SNAKE_BODY_CELL};
            self.print_cell(pos, cell)?;
            drawn_snake.push(pos);
        }

        let score = format!("Score: {:<8} Player: {}", session.score(), session.player_name());
        self.term.print_str_at((self.origin.0, self.origin.1 - 1), &score)?;
        self.term.flush()?;
        Ok(())
    }

    fn print_cell(&mut self, pos: Coords, cell: &str) -> Result<()> {
        let board = self.config.board;
        if !board.contains(pos) {
            return Ok(());
        }

        let (col, row) = board.cell_of(pos);
        let x = self.origin.0 + 1 + col as TermInt * CELL_WIDTH;
        let y = self.origin.1 + 1 + row as TermInt;
        self.term.print_str_at((x, y), cell)?;
        Ok(())
    }

    fn board_size(&self) -> TermCoords {
        let board = &self.config.board;
        (board.columns() as TermInt * CELL_WIDTH, board.rows() as TermInt)
    }
}

/// Arrow keys and WASD. Every other key is not a direction.
fn key_direction(ev: &KeyEvent) -> Option<Direction> {
    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
