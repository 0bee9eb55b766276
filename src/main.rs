use std::fs::File;
use std::sync::Arc;

use anyhow::Result;

use guessterm::core::engine::TurnEngine;
use guessterm::ui::app::GameApp;
use guessterm::ui::setup::{SetupOutcome, SetupWizard};

fn main() -> Result<()> {
    // Raw-mode stdout cannot carry log lines, so tracing goes to a file.
    let log_file = File::create("guessterm.log")?;
    tracing_subscriber::fmt()
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    let mut terminal = ratatui::init();
    let result = run(&mut terminal);
    ratatui::restore();
    result
}

fn run(terminal: &mut ratatui::DefaultTerminal) -> Result<()> {
    match SetupWizard::new().run(terminal)? {
        // Cancelling setup means no game; exit quietly.
        SetupOutcome::Cancelled => Ok(()),
        SetupOutcome::Start(config) => GameApp::new(TurnEngine::new(config)).run(terminal),
    }
}
