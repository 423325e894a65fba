//! Quiet-window debouncing for search input

use std::time::Duration;
use tokio::sync::mpsc;

/// Collapses bursts of search input into the last value
///
/// A value is emitted once no newer input arrives within the quiet window.
/// When the input side closes, a pending value is flushed immediately.
#[derive(Debug, Clone, Copy)]
pub struct SearchDebouncer {
    quiet: Duration,
}

impl SearchDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Run on a background task, returning the settled values
    pub fn spawn(self, input: mpsc::Receiver<String>) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move { self.run(input, tx).await });
        rx
    }

    pub async fn run(&self, mut input: mpsc::Receiver<String>, output: mpsc::Sender<String>) {
        let mut pending: Option<String> = None;

        loop {
            let Some(value) = pending.take() else {
                match input.recv().await {
                    Some(value) => {
                        pending = Some(value);
                        continue;
                    }
                    None => break,
                }
            };

            tokio::select! {
                next = input.recv() => match next {
                    Some(newer) => pending = Some(newer),
                    None => {
                        let _ = output.send(value).await;
                        break;
                    }
                },
                _ = tokio::time::sleep(self.quiet) => {
                    if output.send(value).await.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::debug!("Search debouncer stopped");
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::from_millis(300)
    }
}
