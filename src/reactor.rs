//! Thread-pool driven dispatcher for asynchronous socket work.
//!
//! A [`Reactor`] owns a multi-threaded tokio runtime. Work is submitted through
//! a cloneable [`ReactorHandle`]; each spawned unit holds a [`WorkGuard`] so the
//! reactor knows when no completions are left to deliver.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::Notify;
use tracing::debug;

/// Worker count used when none is configured: twice the detected parallelism, at least 2.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() * 2)
        .unwrap_or(0)
        .max(2)
}

#[derive(Default)]
struct Inflight {
    count: AtomicUsize,
    idle: Notify,
}

impl Inflight {
    async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.count.load(Ordering::Acquire) == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Keep-alive token for one unit of in-flight work.
pub struct WorkGuard {
    inflight: Arc<Inflight>,
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        if self.inflight.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inflight.idle.notify_waiters();
        }
    }
}

/// Cloneable entry point for submitting work to a [`Reactor`].
#[derive(Clone)]
pub struct ReactorHandle {
    handle: Handle,
    inflight: Arc<Inflight>,
}

impl ReactorHandle {
    /// Registers a unit of in-flight work. The reactor will not drain while it is alive.
    pub fn work(&self) -> WorkGuard {
        self.inflight.count.fetch_add(1, Ordering::AcqRel);
        WorkGuard {
            inflight: Arc::clone(&self.inflight),
        }
    }

    /// Runs `fut` on the worker pool, keeping the reactor busy until it completes.
    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let guard = self.work();
        self.handle.spawn(async move {
            let _guard = guard;
            fut.await;
        });
    }

    /// Number of spawned units that have not completed yet.
    pub fn pending(&self) -> usize {
        self.inflight.count.load(Ordering::Acquire)
    }
}

pub struct Reactor {
    runtime: Runtime,
    handle: ReactorHandle,
    workers: usize,
}

impl Reactor {
    /// Starts `workers` threads, all running the same dispatch loop.
    pub fn new(workers: usize) -> io::Result<Self> {
        if workers == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "reactor needs at least one worker thread",
            ));
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(workers)
            .thread_name("courier-worker")
            .enable_all()
            .build()?;

        let handle = ReactorHandle {
            handle: runtime.handle().clone(),
            inflight: Arc::default(),
        };

        debug!(workers, "Reactor started");

        Ok(Self {
            runtime,
            handle,
            workers,
        })
    }

    pub fn handle(&self) -> ReactorHandle {
        self.handle.clone()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Waits until every guarded unit of work has completed, then joins the workers.
    ///
    /// Must not be called from inside a worker thread.
    pub fn drain(self) {
        let inflight = Arc::clone(&self.handle.inflight);
        self.runtime.block_on(async move { inflight.wait_idle().await });
        debug!("Reactor drained");
        drop(self.runtime);
    }

    /// Abandons in-flight work and joins the workers.
    ///
    /// Once this returns no further completions are delivered.
    pub fn stop(self) {
        let pending = self.handle.pending();
        drop(self.runtime);
        debug!(abandoned = pending, "Reactor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_worker_count_has_a_floor() {
        assert!(default_worker_count() >= 2);
    }

    #[test]
    fn zero_workers_is_rejected() {
        let err = Reactor::new(0).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn drain_waits_for_spawned_work() {
        let reactor = Reactor::new(2).unwrap();
        let done = Arc::new(AtomicUsize::new(0));

        for _ in 0..4 {
            let done = Arc::clone(&done);
            reactor.handle().spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                done.fetch_add(1, Ordering::SeqCst);
            });
        }

        reactor.drain();
        assert_eq!(done.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn stop_abandons_pending_work() {
        let reactor = Reactor::new(1).unwrap();
        let handle = reactor.handle();
        handle.spawn(std::future::pending());
        assert_eq!(handle.pending(), 1);

        reactor.stop();
        assert_eq!(handle.pending(), 0);
    }
}
