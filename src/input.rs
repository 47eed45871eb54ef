//! Key events, their mapping to game commands, and the reader thread that feeds
//! commands to the game loop without ever holding up gravity.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::game::Command;

/// The discrete events an input source can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Down,
    Rotate,
    Yes,
    No,
}

impl Key {
    /// Y/N only matter to the play-again prompt.
    pub fn to_command(self) -> Option<Command> {
        match self {
            Key::Left => Some(Command::MoveLeft),
            Key::Right => Some(Command::MoveRight),
            Key::Down => Some(Command::SoftDrop),
            Key::Rotate => Some(Command::Rotate),
            Key::Yes | Key::No => None,
        }
    }
}

pub trait InputSource {
    /// Waits at most `timeout` for a recognised key. `Ok(None)` means nothing arrived.
    fn next_key(&mut self, timeout: Duration) -> Result<Option<Key>>;
}

// ============================================================================
// Reader Thread
// ============================================================================

/// Background task that turns keys into queued commands until the game ends.
pub struct InputReader<S> {
    handle: JoinHandle<Result<S>>,
}

impl<S: InputSource + Send + 'static> InputReader<S> {
    /// Spawns the reader and returns it with the receiving end of its command queue.
    pub fn spawn(
        mut source: S,
        game_over: Arc<AtomicBool>,
        poll_interval: Duration,
        capacity: usize,
    ) -> (Self, Receiver<Command>) {
        let (tx, rx) = mpsc::sync_channel(capacity);
        let handle = thread::spawn(move || {
            read_commands(&mut source, &tx, &game_over, poll_interval)?;
            Ok(source)
        });
        (Self { handle }, rx)
    }

    /// Waits for the thread to stop and hands the source back.
    pub fn join(self) -> Result<S> {
        self.handle.join().map_err(|_| Error::InputThreadPanicked)?
    }
}

fn read_commands<S: InputSource>(
    source: &mut S,
    tx: &SyncSender<Command>,
    game_over: &AtomicBool,
    poll_interval: Duration,
) -> Result<()> {
    while !game_over.load(Ordering::Acquire) {
        let Some(command) = source.next_key(poll_interval)?.and_then(Key::to_command) else {
            continue;
        };
        match tx.try_send(command) {
            // A full queue drops the keypress rather than stalling.
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted {
        keys: VecDeque<Result<Option<Key>>>,
    }

    impl InputSource for Scripted {
        fn next_key(&mut self, timeout: Duration) -> Result<Option<Key>> {
            match self.keys.pop_front() {
                Some(key) => key,
                None => {
                    thread::sleep(timeout);
                    Ok(None)
                }
            }
        }
    }

    fn scripted(keys: Vec<Result<Option<Key>>>) -> Scripted {
        Scripted { keys: keys.into() }
    }

    #[test]
    fn game_keys_map_to_commands() {
        assert_eq!(Key::Left.to_command(), Some(Command::MoveLeft));
        assert_eq!(Key::Right.to_command(), Some(Command::MoveRight));
        assert_eq!(Key::Down.to_command(), Some(Command::SoftDrop));
        assert_eq!(Key::Rotate.to_command(), Some(Command::Rotate));
        assert_eq!(Key::Yes.to_command(), None);
        assert_eq!(Key::No.to_command(), None);
    }

    #[test]
    fn reader_forwards_commands_and_stops_on_game_over() {
        let game_over = Arc::new(AtomicBool::new(false));
        let source = scripted(vec![
            Ok(Some(Key::Left)),
            Ok(None),
            Ok(Some(Key::Yes)),
            Ok(Some(Key::Rotate)),
        ]);
        let (reader, rx) = InputReader::spawn(source, Arc::clone(&game_over), Duration::from_millis(1), 8);

        assert_eq!(rx.recv().ok(), Some(Command::MoveLeft));
        assert_eq!(rx.recv().ok(), Some(Command::Rotate));

        game_over.store(true, Ordering::Release);
        let source = reader.join().unwrap();
        assert!(source.keys.is_empty());
    }

    #[test]
    fn full_queue_drops_commands() {
        let game_over = Arc::new(AtomicBool::new(false));
        let source = scripted(vec![Ok(Some(Key::Left)), Ok(Some(Key::Right)), Ok(Some(Key::Down))]);
        let (reader, rx) = InputReader::spawn(source, Arc::clone(&game_over), Duration::from_millis(1), 1);

        thread::sleep(Duration::from_millis(50));
        game_over.store(true, Ordering::Release);
        reader.join().unwrap();

        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![Command::MoveLeft]);
    }

    #[test]
    fn source_error_ends_reader_and_disconnects_queue() {
        let game_over = Arc::new(AtomicBool::new(false));
        let source = scripted(vec![Ok(Some(Key::Down)), Err(Error::Interrupted)]);
        let (reader, rx) = InputReader::spawn(source, game_over, Duration::from_millis(1), 8);

        assert_eq!(rx.recv().ok(), Some(Command::SoftDrop));
        assert!(rx.recv().is_err());
        assert!(matches!(reader.join(), Err(Error::Interrupted)));
    }
}
