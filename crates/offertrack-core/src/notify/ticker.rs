//! Cancellable repeating check task.
//!
//! [`Ticker::spawn`] runs the callback once immediately, then again after
//! every period. The callback decides whether to continue; dropping the
//! ticker (or calling [`Ticker::stop`]) tears the task down without waiting
//! for the period to elapse.

use std::sync::{
    Arc, Condvar, Mutex,
    atomic::{AtomicBool, Ordering},
};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

struct Shared {
    stop_requested: Mutex<bool>,
    wake: Condvar,
}

/// Handle to a periodic background task.
pub struct Ticker {
    shared: Arc<Shared>,
    finished: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start a repeating task with the given period.
    ///
    /// `tick` runs immediately on the new thread, then once per period until
    /// it returns `false` or the ticker is stopped.
    pub fn spawn<F>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let shared = Arc::new(Shared {
            stop_requested: Mutex::new(false),
            wake: Condvar::new(),
        });
        let finished = Arc::new(AtomicBool::new(false));

        let thread_shared = Arc::clone(&shared);
        let thread_finished = Arc::clone(&finished);
        let handle = std::thread::spawn(move || {
            loop {
                if !tick() {
                    debug!("ticker callback requested shutdown");
                    break;
                }

                let stopped = thread_shared.stop_requested.lock().map(|guard| {
                    let (guard, _timeout) = thread_shared
                        .wake
                        .wait_timeout_while(guard, period, |stop| !*stop)
                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                    *guard
                });
                match stopped {
                    Ok(true) | Err(_) => break,
                    Ok(false) => {}
                }
            }
            thread_finished.store(true, Ordering::Release);
        });

        Self {
            shared,
            finished,
            handle: Some(handle),
        }
    }

    /// True once the task thread has exited (naturally or after stop).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Request shutdown and wait for the task thread to exit.
    pub fn stop(mut self) {
        self.request_stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Block until the callback ends the loop by returning `false`.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn request_stop(&self) {
        if let Ok(mut stop) = self.shared.stop_requested.lock() {
            *stop = true;
        }
        self.shared.wake.notify_all();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.request_stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Ticker;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use std::time::Duration;

    #[test]
    fn first_tick_runs_immediately() {
        let count = Arc::new(AtomicUsize::new(0));
        let tick_count = Arc::clone(&count);

        let ticker = Ticker::spawn(Duration::from_secs(3600), move || {
            tick_count.fetch_add(1, Ordering::SeqCst);
            true
        });

        // Long period: only the immediate tick can have happened.
        std::thread::sleep(Duration::from_millis(50));
        ticker.stop();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn callback_can_end_the_loop() {
        let count = Arc::new(AtomicUsize::new(0));
        let tick_count = Arc::clone(&count);

        let ticker = Ticker::spawn(Duration::from_millis(1), move || {
            tick_count.fetch_add(1, Ordering::SeqCst) < 2
        });
        ticker.join();
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn drop_tears_the_task_down() {
        let count = Arc::new(AtomicUsize::new(0));
        let tick_count = Arc::clone(&count);

        {
            let _ticker = Ticker::spawn(Duration::from_secs(3600), move || {
                tick_count.fetch_add(1, Ordering::SeqCst);
                true
            });
        }

        // Dropped: no further ticks can land.
        let after_drop = count.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }
}
