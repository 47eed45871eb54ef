use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::TryRecvError;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::game::{GameSession, GameState};
use crate::input::{InputReader, InputSource, Key};
use crate::render::{DisplaySink, Snapshot};

/// Plays one game to its end and returns the final score together with the input source.
///
/// Input is read on a separate thread and queued; this loop is the only code that
/// touches the session. Each iteration drains pending commands, applies gravity when
/// due, renders, and then commits a piece that landed during the iteration.
pub fn run_session<S, D>(
    session: &mut GameSession,
    config: &GameConfig,
    source: S,
    display: &mut D,
) -> Result<(u32, S)>
where
    S: InputSource + Send + 'static,
    D: DisplaySink + ?Sized,
{
    let game_over = Arc::new(AtomicBool::new(false));
    let (reader, commands) = InputReader::spawn(
        source,
        Arc::clone(&game_over),
        config.input_poll_interval,
        config.command_queue_capacity,
    );

    session.advance();

    let mut last_drop = Instant::now();
    let mut outcome = Ok(());

    while !session.is_game_over() {
        // Nothing reads events during play; keep only the current iteration's.
        session.take_events();

        while session.state == GameState::Falling {
            match commands.try_recv() {
                Ok(command) => session.apply(command),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Reader stopped on its own; `join` below reports why.
                    game_over.store(true, Ordering::Release);
                    break;
                }
            }
        }
        if game_over.load(Ordering::Acquire) {
            break;
        }

        if last_drop.elapsed() >= config.gravity_interval {
            session.tick();
            last_drop = Instant::now();
        }

        if let Err(err) = display.draw(&Snapshot::of(session)) {
            outcome = Err(err);
            break;
        }

        // Commits a piece that landed this iteration.
        session.advance();

        if !config.frame_interval.is_zero() {
            thread::sleep(config.frame_interval);
        }
    }

    game_over.store(true, Ordering::Release);
    let source = reader.join()?;
    outcome?;
    Ok((session.score, source))
}

/// Blocks until the player answers Y (true) or N (false). Other keys are ignored.
pub fn prompt_play_again<S: InputSource + ?Sized>(source: &mut S, config: &GameConfig) -> Result<bool> {
    loop {
        match source.next_key(config.input_poll_interval)? {
            Some(Key::Yes) => return Ok(true),
            Some(Key::No) => return Ok(false),
            _ => {}
        }
    }
}

/// Plays the session as given, then replays until the player declines. Every replay starts from a full reset.
pub fn play<S, D>(session: &mut GameSession, config: &GameConfig, mut source: S, display: &mut D) -> Result<()>
where
    S: InputSource + Send + 'static,
    D: DisplaySink + ?Sized,
{
    loop {
        let (score, returned) = run_session(session, config, source, display)?;
        source = returned;

        display.show_game_over(score)?;
        if !prompt_play_again(&mut source, config)? {
            return Ok(());
        }
        session.reset();
    }
}

/// True for the errors that mean the player asked to leave rather than a fault.
pub fn is_user_exit(err: &Error) -> bool {
    matches!(err, Error::Interrupted)
}
