use ratatui::{
    widgets::{Block, Borders, List, ListItem, Paragraph},
    layout::{Layout, Constraint, Direction},
    style::{Style, Color, Modifier},
    Frame,
};
use crossterm::event::{self, Event, KeyCode};
use std::time::Duration;
use anyhow::Result;

use crate::core::config::{self, Difficulty, GameConfig};

pub enum SetupOutcome {
    Start(GameConfig),
    Cancelled,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Step {
    PlayerCount,
    RoundCount,
    Difficulty,
    PlayerName(usize),
}

/// Step-by-step moderator prompts: player count, round count, difficulty
/// tier, then one name per player. Esc cancels the whole setup at any step.
pub struct SetupWizard {
    step: Step,
    input: String,
    error: Option<String>,
    selected_tier: usize,
    player_count: u32,
    total_rounds: u32,
    names: Vec<String>,
}

impl SetupWizard {
    pub fn new() -> Self {
        Self {
            step: Step::PlayerCount,
            input: String::new(),
            error: None,
            selected_tier: 0,
            player_count: 0,
            total_rounds: 0,
            names: Vec::new(),
        }
    }

    pub fn run(&mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<SetupOutcome> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.code == KeyCode::Esc {
                        return Ok(SetupOutcome::Cancelled);
                    }
                    if let Some(config) = self.handle_key(key.code) {
                        return Ok(SetupOutcome::Start(config));
                    }
                }
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> Option<GameConfig> {
        match self.step {
            Step::PlayerCount | Step::RoundCount => match code {
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    self.input.push(c);
                    self.error = None;
                }
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Enter => self.confirm_count(),
                _ => {}
            },
            Step::Difficulty => match code {
                KeyCode::Up => self.selected_tier = self.selected_tier.saturating_sub(1),
                KeyCode::Down => {
                    self.selected_tier = (self.selected_tier + 1).min(Difficulty::ALL.len() - 1)
                }
                KeyCode::Enter => self.step = Step::PlayerName(0),
                _ => {}
            },
            Step::PlayerName(index) => match code {
                KeyCode::Char(c) => self.input.push(c),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Enter => return self.confirm_name(index),
                _ => {}
            },
        }
        None
    }

    fn confirm_count(&mut self) {
        match config::parse_count(&self.input) {
            Ok(n) => {
                self.input.clear();
                match self.step {
                    Step::PlayerCount => {
                        self.player_count = n;
                        self.step = Step::RoundCount;
                    }
                    Step::RoundCount => {
                        self.total_rounds = n;
                        self.step = Step::Difficulty;
                    }
                    _ => {}
                }
            }
            Err(err) => {
                self.input.clear();
                self.error = Some(err.to_string());
            }
        }
    }

    fn confirm_name(&mut self, index: usize) -> Option<GameConfig> {
        self.names.push(std::mem::take(&mut self.input));
        if index + 1 < self.player_count as usize {
            self.step = Step::PlayerName(index + 1);
            return None;
        }
        let difficulty = Difficulty::ALL[self.selected_tier];
        Some(GameConfig::new(&self.names, self.total_rounds, difficulty))
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        f.render_widget(
            Paragraph::new(" GUESS THE NUMBER - GAME SETUP ")
                .block(Block::default().borders(Borders::ALL))
                .alignment(ratatui::layout::Alignment::Center),
            chunks[0],
        );

        match self.step {
            Step::PlayerCount => self.render_prompt(f, chunks[1], "Enter the number of players:"),
            Step::RoundCount => self.render_prompt(f, chunks[1], "Enter the number of rounds:"),
            Step::Difficulty => self.render_tiers(f, chunks[1]),
            Step::PlayerName(index) => self.render_prompt(
                f,
                chunks[1],
                &format!("Enter name for Player {} (blank for default):", index + 1),
            ),
        }

        let hint = match self.step {
            Step::Difficulty => "[↑/↓] Select  [Enter] Confirm  [Esc] Cancel",
            _ => "[Enter] Confirm  [Esc] Cancel",
        };
        f.render_widget(
            Paragraph::new(hint).alignment(ratatui::layout::Alignment::Center),
            chunks[2],
        );
    }

    fn render_prompt(&self, f: &mut Frame, area: ratatui::layout::Rect, prompt: &str) {
        let error_line = self.error.as_deref().unwrap_or("");
        f.render_widget(
            Paragraph::new(format!("{}\n\n > {}\n\n{}", prompt, self.input, error_line))
                .block(Block::default().title(" SETUP ").borders(Borders::ALL)),
            area,
        );
    }

    fn render_tiers(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let items: Vec<ListItem> = Difficulty::ALL
            .iter()
            .enumerate()
            .map(|(i, tier)| {
                let style = if i == self.selected_tier {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format!(" » {}", tier.label())).style(style)
            })
            .collect();

        f.render_widget(
            List::new(items).block(Block::default().title(" SELECT DIFFICULTY ").borders(Borders::ALL)),
            area,
        );
    }
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self::new()
    }
}
