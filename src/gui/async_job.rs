//! Background job handling for the GUI.
//!
//! Every network call runs as an independent job on a worker thread with its
//! own current-thread tokio runtime; the UI polls for the result each frame.
//! Dropping an [`AsyncJob`] drops its receiver, so a superseded job's result
//! can never be delivered - replacing the job IS the cancellation.

use anyhow::{anyhow, Result};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tokio::runtime::Builder;

/// Handle to a background task, polled from the UI thread.
pub struct AsyncJob<T> {
    receiver: Option<Receiver<Result<T>>>,
}

impl<T: Send + 'static> AsyncJob<T> {
    /// Spawn `builder`'s future on a dedicated worker thread.
    pub fn spawn<FutBuilder, Fut>(builder: FutBuilder) -> Self
    where
        FutBuilder: FnOnce() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<T>> + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime.block_on(builder()),
                Err(e) => Err(anyhow!("Failed to create async runtime: {}", e)),
            };
            // The receiver may be gone if the job was superseded; that is
            // exactly the staleness guard working.
            let _ = tx.send(result);
        });
        Self::new(rx)
    }
}

impl<T> AsyncJob<T> {
    /// Wrap an existing result channel.
    pub fn new(receiver: Receiver<Result<T>>) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }

    /// Poll for completion. `Some(result)` exactly once when the job has
    /// finished, `None` while it is still running.
    pub fn poll(&mut self) -> Option<Result<T>> {
        if let Some(rx) = &self.receiver {
            match rx.try_recv() {
                Ok(res) => {
                    self.receiver = None;
                    return Some(res);
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.receiver = None;
                    return Some(Err(anyhow!("Worker task disconnected")));
                }
            }
        }
        None
    }

    /// Whether the job has not yet delivered its result.
    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn poll_until_done<T>(job: &mut AsyncJob<T>) -> Result<T> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = job.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "job did not finish in time");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_spawn_delivers_result_once() {
        let mut job = AsyncJob::spawn(|| async { Ok(41 + 1) });
        assert!(job.is_running());
        let result = poll_until_done(&mut job);
        assert_eq!(result.unwrap(), 42);
        assert!(!job.is_running());
        assert!(job.poll().is_none());
    }

    #[test]
    fn test_spawn_propagates_errors() {
        let mut job: AsyncJob<()> = AsyncJob::spawn(|| async { Err(anyhow!("backend down")) });
        let result = poll_until_done(&mut job);
        assert_eq!(result.unwrap_err().to_string(), "backend down");
    }

    #[test]
    fn test_disconnected_worker_surfaces_as_error() {
        let (tx, rx) = mpsc::channel::<Result<u32>>();
        drop(tx);
        let mut job = AsyncJob::new(rx);
        let result = job.poll().expect("disconnect should resolve the job");
        assert!(result.is_err());
        assert!(!job.is_running());
    }

    #[test]
    fn test_pending_job_polls_none() {
        let (_tx, rx) = mpsc::channel::<Result<u32>>();
        let mut job = AsyncJob::new(rx);
        assert!(job.poll().is_none());
        assert!(job.is_running());
    }
}
