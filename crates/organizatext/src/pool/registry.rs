use super::WorkerPool;
use crate::core::config::PoolConfig;
use crate::processor::FileProcessor;
use parking_lot::Mutex;

/// Owner of the application's worker pool.
///
/// The pool is built on first use and lives until [`shutdown`](Self::shutdown).
/// Hold one registry at the application root and pass it (or the pools it hands
/// out) to whatever submits files.
pub struct PoolRegistry {
    config: PoolConfig,
    processor: FileProcessor,
    pool: Mutex<Option<WorkerPool>>,
}

impl PoolRegistry {
    pub fn new(config: PoolConfig, processor: FileProcessor) -> Self {
        Self {
            config,
            processor,
            pool: Mutex::new(None),
        }
    }

    /// The current pool, creating it if there is none.
    pub fn get_or_init(&self) -> WorkerPool {
        self.pool
            .lock()
            .get_or_insert_with(|| {
                tracing::debug!(pool_size = self.config.pool_size, "Creating worker pool");
                WorkerPool::new(self.config.clone(), self.processor.for_worker())
            })
            .clone()
    }

    /// The current pool, if one was created.
    pub fn current(&self) -> Option<WorkerPool> {
        self.pool.lock().clone()
    }

    /// Terminate and forget the current pool. Returns `false` when there was none.
    pub fn shutdown(&self) -> bool {
        match self.pool.lock().take() {
            Some(pool) => {
                pool.terminate();
                true
            }
            None => false,
        }
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new(PoolConfig::default(), FileProcessor::default())
    }
}

impl Drop for PoolRegistry {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.get_mut().take() {
            pool.terminate();
        }
    }
}
