// Progress helpers: a spinner shown while a worker thread does the job, and
// a guard that logs how long a scope took.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::panic;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_millis(100);
const SPINNER_FRAMES: &str = "|/-\\ ";

/// Run `f` on a worker thread and animate `"<title>... <frame>"` on stdout
/// until it returns. The line is closed with `Done.` or `KO.` and the
/// worker's result is handed back unchanged.
pub fn spin_while_things_happen<T, E, F>(title: &str, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send,
    T: Send,
    E: Send,
{
    spin_with_target(title, ProgressDrawTarget::stdout(), f)
}

/// Same as [`spin_while_things_happen`], drawing on `target`.
pub fn spin_with_target<T, E, F>(title: &str, target: ProgressDrawTarget, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send,
    T: Send,
    E: Send,
{
    let spinner = ProgressBar::with_draw_target(None, target);
    spinner.set_style(
        ProgressStyle::with_template("{msg}... {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(SPINNER_FRAMES),
    );
    spinner.set_message(title.to_string());

    thread::scope(|scope| {
        let (tx, rx) = mpsc::channel();
        let worker = scope.spawn(move || {
            // the receiver only goes away once the spinner loop is over
            let _ = tx.send(f());
        });

        let outcome = loop {
            match rx.recv_timeout(TICK) {
                Ok(result) => break Some(result),
                Err(RecvTimeoutError::Timeout) => spinner.tick(),
                Err(RecvTimeoutError::Disconnected) => break None,
            }
        };

        let closing = |status: &str| {
            spinner.set_style(
                ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.finish_with_message(format!("{title}... {status}"));
        };

        match outcome {
            Some(Ok(value)) => {
                closing("Done.");
                Ok(value)
            }
            Some(Err(e)) => {
                closing("KO.");
                Err(e)
            }
            None => {
                closing("KO.");
                match worker.join() {
                    Err(payload) => panic::resume_unwind(payload),
                    Ok(()) => unreachable!("worker ended without sending its result"),
                }
            }
        }
    })
}

/// Logs `-- <name> in <elapsed>` at debug level when dropped.
///
/// ```
/// # use shelf_helpers::progress::TimeTrack;
/// let _track = TimeTrack::start("Scanning files");
/// // ... work ...
/// ```
#[must_use = "the elapsed time is logged when the guard is dropped"]
#[derive(Debug)]
pub struct TimeTrack {
    name: String,
    start: Instant,
}

impl TimeTrack {
    pub fn start(name: impl Into<String>) -> Self {
        Self { name: name.into(), start: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for TimeTrack {
    fn drop(&mut self) {
        tracing::debug!("-- {} in {:?}", self.name, self.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn spinner_returns_worker_value() {
        let result: Result<u32, String> = spin_with_target("Counting", ProgressDrawTarget::hidden(), || {
            thread::sleep(Duration::from_millis(250));
            Ok(42)
        });
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn spinner_passes_worker_error_through() {
        let result: Result<(), String> =
            spin_with_target("Failing", ProgressDrawTarget::hidden(), || Err("disk full".to_string()));
        assert_eq!(result, Err("disk full".to_string()));
    }

    #[test]
    fn spinner_worker_can_borrow_from_caller() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), ()> = spin_with_target("Borrowing", ProgressDrawTarget::hidden(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[should_panic(expected = "worker blew up")]
    fn spinner_propagates_worker_panic() {
        let _: Result<(), ()> =
            spin_with_target("Panicking", ProgressDrawTarget::hidden(), || panic!("worker blew up"));
    }

    #[test]
    fn time_track_measures_elapsed_time() {
        let track = TimeTrack::start("sleeping");
        thread::sleep(Duration::from_millis(20));
        assert!(track.elapsed() >= Duration::from_millis(20));
    }
}
