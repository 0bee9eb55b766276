use ratatui::{
    widgets::{Block, Borders, List, ListItem, Paragraph},
    layout::{Layout, Constraint, Direction, Rect},
    style::{Style, Color, Modifier},
    Frame,
};
use crossterm::event::{self, Event, KeyCode};
use std::time::Duration;
use anyhow::Result;

use crate::core::engine::{
    EngineError, GuessOutcome, SecretSource, TurnEngine, CORRECT_POINTS, WRONG_PENALTY,
};
use crate::core::standings::Standings;

/// The table screen: round and turn lines, guess input, feedback from the
/// previous turn, and a live scoreboard. Switches to the final standings
/// once the engine reports the game over.
pub struct GameApp<S: SecretSource> {
    engine: TurnEngine<S>,
    input: String,
    feedback: String,
    standings: Option<Standings>,
}

impl<S: SecretSource> GameApp<S> {
    pub fn new(engine: TurnEngine<S>) -> Self {
        Self {
            engine,
            input: String::new(),
            feedback: String::new(),
            standings: None,
        }
    }

    pub fn run(mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<()> {
        self.engine.start_turn()?;

        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Esc => break,
                        KeyCode::Char('q') if self.standings.is_some() => break,
                        KeyCode::Char(c) if self.standings.is_none() && c.is_ascii_digit() => {
                            self.input.push(c)
                        }
                        KeyCode::Backspace => {
                            self.input.pop();
                        }
                        KeyCode::Enter if self.standings.is_none() => self.submit(),
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    fn submit(&mut self) {
        match self.engine.submit_guess(&self.input) {
            Ok(outcome) => {
                self.feedback = feedback_line(&outcome);
                self.input.clear();
                if let Ok(standings) = self.engine.standings() {
                    self.standings = Some(standings);
                }
            }
            Err(EngineError::InvalidGuessFormat) => {
                self.feedback = "Please enter a valid number.".to_string();
                self.input.clear();
            }
            Err(_) => {}
        }
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        f.render_widget(
            Paragraph::new(" GUESS THE NUMBER ")
                .block(Block::default().borders(Borders::ALL))
                .alignment(ratatui::layout::Alignment::Center),
            chunks[0],
        );

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(28)])
            .split(chunks[1]);

        match &self.standings {
            Some(standings) => self.render_game_over(f, body[0], standings),
            None => self.render_turn(f, body[0]),
        }
        self.render_scoreboard(f, body[1]);

        let hint = if self.standings.is_some() {
            "[Q/Esc] Quit"
        } else {
            "[0-9] Type  [Backspace] Erase  [Enter] Submit  [Esc] Quit"
        };
        f.render_widget(
            Paragraph::new(hint).alignment(ratatui::layout::Alignment::Center),
            chunks[2],
        );
    }

    fn render_turn(&self, f: &mut Frame, area: Rect) {
        let text = match self.engine.turn_view() {
            Some(view) => format!(
                "Round: {} of {}\nTurn: {}\n\nEnter your guess (1-{}):\n > {}\n\n{}",
                view.round, view.total_rounds, view.player, view.max_number, self.input, self.feedback
            ),
            None => self.feedback.clone(),
        };
        f.render_widget(
            Paragraph::new(text).block(Block::default().title(" TABLE ").borders(Borders::ALL)),
            area,
        );
    }

    fn render_game_over(&self, f: &mut Frame, area: Rect, standings: &Standings) {
        let verdict = match standings.winner_names().as_slice() {
            [single] => format!("Congratulations, {} wins!", single),
            names => format!("It's a tie between {}!", names.join(" and ")),
        };
        let text = format!("Game Over!\n\n{}\n\n{}", verdict, self.feedback);
        f.render_widget(
            Paragraph::new(text).block(Block::default().title(" GAME OVER ").borders(Borders::ALL)),
            area,
        );
    }

    fn render_scoreboard(&self, f: &mut Frame, area: Rect) {
        let on_turn = self.standings.is_none().then(|| self.engine.current_player());
        let items: Vec<ListItem> = self
            .engine
            .players()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let style = if on_turn == Some(i) {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format!(" {}: {} points", p.name, p.score)).style(style)
            })
            .collect();

        f.render_widget(
            List::new(items).block(Block::default().title(" SCOREBOARD ").borders(Borders::ALL)),
            area,
        );
    }
}

fn feedback_line(outcome: &GuessOutcome) -> String {
    if outcome.correct {
        format!(
            "CORRECT! The number was {}. {} earned {} points.",
            outcome.secret, outcome.player, CORRECT_POINTS
        )
    } else {
        format!(
            "WRONG! The number was {}. {} lost {} points.",
            outcome.secret, outcome.player, WRONG_PENALTY
        )
    }
}
