use anyhow::Context;

use blockfall::{
    config::GameConfig,
    game::GameSession,
    runner::{is_user_exit, play},
    term::{CrosstermInput, TerminalDisplay},
};

fn main() -> anyhow::Result<()> {
    let config = GameConfig::default();
    let mut display = TerminalDisplay::new().context("failed to set up the terminal")?;
    let mut session = GameSession::new();

    let result = play(&mut session, &config, CrosstermInput, &mut display);

    // Restore terminal
    display.restore().context("failed to restore the terminal")?;

    match result {
        Err(err) if !is_user_exit(&err) => Err(anyhow::Error::new(err).context("game aborted")),
        _ => Ok(()),
    }
}
