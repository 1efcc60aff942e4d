//! Reusable output buffers for log-line formatting.
//!
//! One header-plus-message line is formatted per buffer. Acquiring from a
//! free list instead of allocating keeps the per-log-call allocation count
//! at zero once the pool is warm.

use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

/// Buffers above this capacity are dropped instead of returned to the free
/// list; a single huge line would otherwise pin its allocation forever.
const RETAIN_CAPACITY_LIMIT: usize = 4096;

/// Pool of reusable output buffers.
///
/// The pool hands out [`PooledBuffer`] handles; a handle returns its storage
/// to the free list when dropped. Cloning the pool clones a handle to the
/// same free list. All synchronization lives here — one buffer is only ever
/// held by one formatting call at a time.
#[derive(Debug, Clone)]
pub struct BufferPool {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    free: Vec<Vec<u8>>,
    max_retained: usize,
}

impl BufferPool {
    /// Creates a pool that retains at most `max_retained` idle buffers.
    #[must_use]
    pub fn new(max_retained: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                free: Vec::with_capacity(max_retained),
                max_retained,
            })),
        }
    }

    /// Acquires an empty buffer, reusing a pooled one when available.
    #[must_use]
    pub fn acquire(&self) -> PooledBuffer {
        // A poisoned free list is still a free list.
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let data = inner.free.pop().unwrap_or_default();
        PooledBuffer {
            data: Some(data),
            pool: Arc::clone(&self.inner),
        }
    }

    /// Number of idle buffers currently retained.
    #[must_use]
    pub fn retained(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .free
            .len()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(16)
    }
}

/// A buffer borrowed from a [`BufferPool`].
///
/// Dereferences to the underlying `Vec<u8>`. On drop the storage is cleared
/// and handed back to the pool (unless the pool is full or the buffer grew
/// beyond the retention limit).
#[derive(Debug)]
pub struct PooledBuffer {
    data: Option<Vec<u8>>,
    pool: Arc<Mutex<Inner>>,
}

impl PooledBuffer {
    /// Detaches the buffer from the pool and returns the raw storage.
    #[must_use]
    pub fn take(mut self) -> Vec<u8> {
        self.data.take().unwrap_or_default()
    }
}

impl std::ops::Deref for PooledBuffer {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        self.data.as_ref().expect("buffer present until drop")
    }
}

impl std::ops::DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data.as_mut().expect("buffer present until drop")
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        if let Some(mut data) = self.data.take() {
            if data.capacity() > RETAIN_CAPACITY_LIMIT {
                return;
            }
            data.clear();
            let mut inner = self.pool.lock().unwrap_or_else(PoisonError::into_inner);
            if inner.free.len() < inner.max_retained {
                inner.free.push(data);
            }
        }
    }
}
