use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

use crate::log;
use crate::snake::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Turn(Direction),
    Quit,
}

/// Arrow keys and the `(rows, columns)` step each one asks for.
const KEY_VECTORS: [(KeyCode, (i32, i32)); 4] = [
    (KeyCode::Up, (-1, 0)),
    (KeyCode::Down, (1, 0)),
    (KeyCode::Left, (0, -2)),
    (KeyCode::Right, (0, 2)),
];

/// Maps a key press to a game input. Keys the game has no use for map to
/// `None`.
pub fn translate(ev: &KeyEvent) -> Option<Input> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(Input::Quit);
    }

    KEY_VECTORS
        .iter()
        .find(|(code, _)| *code == ev.code)
        .and_then(|(_, (d_row, d_col))| Direction::new(*d_row, *d_col))
        .map(Input::Turn)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Starts a thread that blocks on terminal events and forwards the ones the
/// game understands. The thread stops when the receiving side goes away or
/// reading fails; either way the sender is dropped and the channel closes.
pub fn spawn_key_reader(tx: UnboundedSender<Input>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(ev)) => {
                if let Some(input) = translate(&ev) {
                    if tx.send(input).is_err() {
                        break;
                    }
                }
            }
            Ok(_) => {}
            Err(err) => {
                log!("Key reader stopped: {}", err);
                break;
            }
        }
    })
}
