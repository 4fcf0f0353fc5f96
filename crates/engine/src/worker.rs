//! Named worker threads
//!
//! A worker is a closure handed to `thread::Builder::spawn` under a readable
//! thread name (`Thread-1`, `Producer-2`, `Client-3`). Joining maps a panic
//! to [`Error::WorkerPanicked`] carrying that name.

use lockwise_core::{Error, Result};
use std::thread::{self, JoinHandle};

/// Handle to a running named worker
#[derive(Debug)]
pub struct Worker<T> {
    name: String,
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> Worker<T> {
    /// Start `body` on a new thread called `name`
    pub fn spawn<F>(name: impl Into<String>, body: F) -> Result<Self>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let name = name.into();
        let handle = thread::Builder::new().name(name.clone()).spawn(body)?;
        Ok(Worker { name, handle })
    }
}

impl<T> Worker<T> {
    /// Thread name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wait for the worker and take its result
    pub fn join(self) -> Result<T> {
        let Worker { name, handle } = self;
        handle.join().map_err(|_| Error::worker_panicked(name))
    }
}

/// Join every worker, in order
///
/// All workers are joined even if an earlier one panicked; the first panic
/// is returned.
pub fn join_all<T>(workers: Vec<Worker<T>>) -> Result<Vec<T>> {
    let mut results = Vec::with_capacity(workers.len());
    let mut first_error = None;

    for worker in workers {
        match worker.join() {
            Ok(value) => results.push(value),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(results),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_returns_value() {
        let worker = Worker::spawn("Thread-1", || 41 + 1).unwrap();
        assert_eq!(worker.name(), "Thread-1");
        assert_eq!(worker.join().unwrap(), 42);
    }

    #[test]
    fn thread_carries_name() {
        let worker = Worker::spawn("Producer-9", || {
            thread::current().name().map(str::to_string)
        })
        .unwrap();
        assert_eq!(worker.join().unwrap().as_deref(), Some("Producer-9"));
    }

    #[test]
    fn panic_becomes_error() {
        let workers = vec![
            Worker::spawn("Thread-1", || 1).unwrap(),
            Worker::spawn("Thread-2", || -> i32 { panic!("boom") }).unwrap(),
            Worker::spawn("Thread-3", || 3).unwrap(),
        ];

        match join_all(workers) {
            Err(Error::WorkerPanicked { worker }) => assert_eq!(worker, "Thread-2"),
            other => panic!("expected WorkerPanicked, got {:?}", other),
        }
    }

    #[test]
    fn join_all_preserves_order() {
        let workers: Vec<_> = (0..5)
            .map(|i| Worker::spawn(format!("Thread-{}", i), move || i * 10).unwrap())
            .collect();
        assert_eq!(join_all(workers).unwrap(), vec![0, 10, 20, 30, 40]);
    }
}
