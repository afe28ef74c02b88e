use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time;

use crate::editor::UploadTracker;

const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Animated indicator shown on stderr while uploads are in flight.
pub struct TerminalSpinner {
    message: String,
    running: Arc<AtomicBool>,
}

impl TerminalSpinner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Animates whenever `tracker` reports an upload, until [`stop`](Self::stop).
    /// Does nothing when stderr is not a terminal.
    pub fn start(&mut self, tracker: UploadTracker) {
        if !io::stderr().is_terminal() {
            return;
        }

        self.running.store(true, Ordering::SeqCst);
        let message = self.message.clone();
        let running = Arc::clone(&self.running);

        tokio::spawn(async move {
            let mut frame = 0;
            let mut shown = false;
            while running.load(Ordering::SeqCst) {
                if tracker.is_uploading() {
                    let spinner_char = BRAILLE_SPINNER[frame % BRAILLE_SPINNER.len()];
                    eprint!("\r{} {}", spinner_char, message);
                    let _ = io::stderr().flush();
                    frame += 1;
                    shown = true;
                } else if shown {
                    eprint!("\r\x1b[2K");
                    let _ = io::stderr().flush();
                    shown = false;
                }
                time::sleep(Duration::from_millis(80)).await;
            }

            if shown {
                eprint!("\r\x1b[2K");
                let _ = io::stderr().flush();
            }
        });
    }

    pub fn stop(&mut self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        crate::console::console().clear_line();
    }
}

impl Drop for TerminalSpinner {
    fn drop(&mut self) {
        self.stop();
    }
}
