use crate::ai::{agent_for, Agent, Difficulty};
use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{GameState, Move, Player, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::{info, warn};

pub struct App {
    config: AppConfig,
    game_state: GameState,
    computer: Option<Box<dyn Agent>>,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let game_state = GameState::with_board(config.game.empty_board(), config.game.rules());
        let mut app = App {
            config,
            game_state,
            computer: None,
            selected_column: COLS / 2, // Start in middle
            should_quit: false,
            message: None,
        };
        app.rebuild_computer();
        app
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::other(e.to_string()))?;

            if self.should_quit {
                break;
            }

            if self.is_computer_turn() {
                self.play_computer_move();
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn computer_player(&self) -> Option<Player> {
        self.computer.as_ref().map(|_| self.config.computer.plays)
    }

    fn is_computer_turn(&self) -> bool {
        !self.game_state.is_terminal()
            && self.computer_player() == Some(self.game_state.current_player())
    }

    fn rebuild_computer(&mut self) {
        let settings = &self.config.computer;
        self.computer = settings
            .enabled
            .then(|| agent_for(settings.difficulty, settings.seed));
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('d') => {
                self.play_human_move(Move::drop(self.selected_column));
            }
            KeyCode::Char('p') => {
                self.play_human_move(Move::pop(self.selected_column));
            }
            KeyCode::Char('r') => {
                self.restart();
                self.message = Some("New game started!".to_string());
            }
            KeyCode::Char('c') => {
                self.config.computer.enabled = !self.config.computer.enabled;
                self.rebuild_computer();
                self.message = Some(format!("Mode: {}", self.mode_label()));
            }
            KeyCode::Char('s') => {
                self.config.computer.plays = self.config.computer.plays.other();
                self.message = Some(format!(
                    "Computer now plays {}",
                    self.config.computer.plays.name()
                ));
            }
            KeyCode::Char(c @ '1'..='9') => {
                let level = c as u8 - b'0';
                match Difficulty::new(level) {
                    Ok(difficulty) => {
                        self.config.computer.difficulty = difficulty;
                        self.rebuild_computer();
                        self.message = Some(format!("Difficulty set to {level}"));
                    }
                    Err(e) => self.message = Some(e.to_string()),
                }
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        self.game_state =
            GameState::with_board(self.config.game.empty_board(), self.config.game.rules());
        self.selected_column = COLS / 2;
        info!(rows = self.config.game.rows, "new game");
    }

    fn play_human_move(&mut self, mv: Move) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if self.is_computer_turn() {
            self.message = Some("Wait for the computer to move.".to_string());
            return;
        }
        self.play(mv);
    }

    /// Let the computer pick and play a move for the player to move.
    pub fn play_computer_move(&mut self) {
        let Some(agent) = self.computer.as_mut() else {
            return;
        };
        match agent.select_move(&self.game_state) {
            Some(mv) => {
                self.selected_column = mv.column;
                self.play(mv);
            }
            None => warn!("computer found no legal move"),
        }
    }

    fn play(&mut self, mv: Move) {
        let player = self.game_state.current_player();
        match self.game_state.apply_move(mv) {
            Ok(next) => {
                self.game_state = next;
                if let Some(winner) = self.game_state.winner() {
                    let moves = self.game_state.move_count();
                    info!(winner = winner.name(), moves, "game over");
                    self.message = Some(if winner == player {
                        format!("{} wins!", winner.name())
                    } else {
                        format!(
                            "{} made four for both sides. {} wins!",
                            player.name(),
                            winner.name()
                        )
                    });
                }
            }
            Err(MoveError::IllegalMove(reason)) => {
                self.message = Some(format!("Illegal move: {reason}"));
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
            Err(MoveError::Board(e)) => {
                self.message = Some(e.to_string());
            }
        }
    }

    fn mode_label(&self) -> String {
        match self.computer_player() {
            Some(player) => format!(
                "vs Computer ({}, level {})",
                player.name(),
                self.config.computer.difficulty.level()
            ),
            None => "Player vs Player".to_string(),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game_state,
            self.selected_column,
            &self.message,
            &self.mode_label(),
        );
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    #[test]
    fn test_drop_and_pop_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter); // Yellow drops in col 3
        assert_eq!(app.game_state().board().get(0, 3), Cell::Yellow);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('d')); // Red drops in col 4
        assert_eq!(app.game_state().board().get(0, 4), Cell::Red);

        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('p')); // Yellow pops its piece in col 3
        assert!(app.game_state().board().is_column_empty(3));
        assert_eq!(app.game_state().current_player(), Player::Red);
    }

    #[test]
    fn test_illegal_pop_sets_message() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('p'));
        assert!(app.message().unwrap().starts_with("Illegal move"));
        assert_eq!(app.game_state().move_count(), 0);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = App::default();
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.game_state().board().get(0, COLS - 1), Cell::Yellow);
    }

    #[test]
    fn test_win_message_and_restart() {
        let mut app = App::default();
        // Yellow plays cols 0..=3 on the bottom row, Red stacks on top.
        for col in 0..4 {
            while app.selected_column > col {
                press(&mut app, KeyCode::Left);
            }
            while app.selected_column < col {
                press(&mut app, KeyCode::Right);
            }
            press(&mut app, KeyCode::Enter);
            if col < 3 {
                press(&mut app, KeyCode::Enter);
            }
        }
        assert_eq!(app.game_state().winner(), Some(Player::Yellow));
        assert_eq!(app.message(), Some("Yellow wins!"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message(), Some("Game over! Press 'r' to restart."));

        press(&mut app, KeyCode::Char('r'));
        assert!(app.game_state().board().is_empty());
    }

    #[test]
    fn test_computer_replies() {
        let mut config = AppConfig::default();
        config.computer.enabled = true;
        config.computer.difficulty = Difficulty::new(1).unwrap();
        config.computer.seed = Some(11);
        let mut app = App::new(config);

        press(&mut app, KeyCode::Enter);
        assert!(app.is_computer_turn());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message(), Some("Wait for the computer to move."));

        app.play_computer_move();
        assert_eq!(app.game_state().move_count(), 2);
        assert_eq!(app.game_state().current_player(), Player::Yellow);
    }

    #[test]
    fn test_mode_and_difficulty_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.message(), Some("Mode: vs Computer (Red, level 3)"));
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.config.computer.difficulty.level(), 5);
        press(&mut app, KeyCode::Char('9'));
        assert!(app.message().unwrap().contains("difficulty must be"));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.computer_player(), Some(Player::Yellow));
        assert!(app.is_computer_turn());
    }

    #[test]
    fn test_quit_key() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_render_smoke() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Connect Four"));
        assert!(text.contains("Current Player: Red"));
    }
}
