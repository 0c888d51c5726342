//! Input Actor: Dedicated thread for polling terminal events.
//!
//! This actor runs in its own thread and uses crossterm's event polling
//! so the frame loop never blocks on the keyboard. Key presses are
//! forwarded over a channel; resize events only raise a [`ResizeFlag`],
//! which the frame loop picks up at its next tick.

use super::messages::{InputEvent, KeyCode};
use crossbeam_channel::{SendTimeoutError, Sender};
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Minimum pause after a terminal error.
const ERROR_BACKOFF: Duration = Duration::from_millis(50);

/// A "terminal was resized" notification shared with the frame loop.
///
/// The input actor is the only writer; the frame loop is the only reader.
#[derive(Debug, Clone, Default)]
pub struct ResizeFlag(Arc<AtomicBool>);

impl ResizeFlag {
    /// Create a lowered flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a resize happened.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Consume the notification, returning whether one was pending.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::Relaxed)
    }
}

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// # Arguments
    ///
    /// * `sender` - Channel to send key events to the main loop.
    /// * `resize` - Flag raised on every terminal resize.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(
        sender: Sender<InputEvent>,
        resize: ResizeFlag,
        poll_timeout: Duration,
    ) -> std::io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("termpipes-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &resize, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop(
        sender: &Sender<InputEvent>,
        resize: &ResizeFlag,
        shutdown: &AtomicBool,
        poll_timeout: Duration,
    ) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.try_send(InputEvent::Shutdown);
                break;
            }

            let input_event = match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(Event::Resize(..)) => {
                        resize.raise();
                        continue;
                    }
                    Ok(event) => match Self::convert_event(&event) {
                        Some(input_event) => input_event,
                        None => continue,
                    },
                    Err(e) => Self::backoff(e, poll_timeout),
                },
                // No event, continue loop (will check shutdown)
                Ok(false) => continue,
                Err(e) => Self::backoff(e, poll_timeout),
            };

            if !Self::forward(sender, shutdown, input_event, poll_timeout) {
                break;
            }
        }
    }

    /// Sleep after a failed poll or read so a broken terminal does not spin.
    fn backoff(error: std::io::Error, poll_timeout: Duration) -> InputEvent {
        thread::sleep(poll_timeout.max(ERROR_BACKOFF));
        InputEvent::Error(error.to_string())
    }

    /// Send `event`, giving up when shutdown is requested while the
    /// channel is full. Returns `false` if the loop should exit.
    fn forward(
        sender: &Sender<InputEvent>,
        shutdown: &AtomicBool,
        mut event: InputEvent,
        poll_timeout: Duration,
    ) -> bool {
        loop {
            match sender.send_timeout(event, poll_timeout) {
                Ok(()) => return true,
                Err(SendTimeoutError::Timeout(pending)) => {
                    if shutdown.load(Ordering::Relaxed) {
                        return false;
                    }
                    event = pending;
                }
                // Receiver dropped, exit
                Err(SendTimeoutError::Disconnected(_)) => return false,
            }
        }
    }

    /// Convert a crossterm event to our `InputEvent`.
    ///
    /// Only key presses are forwarded; releases, repeats, mouse, focus
    /// and paste events are dropped.
    fn convert_event(event: &Event) -> Option<InputEvent> {
        match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                Some(InputEvent::Key(Self::convert_key_code(key_event.code)))
            }
            _ => None,
        }
    }

    /// Convert crossterm `KeyCode` to our `KeyCode`.
    fn convert_key_code(code: event::KeyCode) -> KeyCode {
        match code {
            event::KeyCode::Char(c) => KeyCode::Char(c),
            event::KeyCode::Enter => KeyCode::Enter,
            event::KeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Other,
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
