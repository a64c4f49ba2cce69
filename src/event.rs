use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub fn poll_event(timeout: Duration) -> color_eyre::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Next key press, or `None` on timeout. Repeat/release key events are
/// skipped so handlers fire once per press on every platform.
pub fn next_key_event(timeout: Duration) -> color_eyre::Result<Option<KeyEvent>> {
    loop {
        match poll_event(timeout)? {
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                return Ok(Some(key))
            }
            Some(_) => continue,
            None => return Ok(None),
        }
    }
}
