//! Reusable sample storage
//!
//! Decoder callbacks run once per frame, so sample storage is pooled
//! instead of allocated per delivery. A pool lends out slots; when the
//! last holder of a sealed sample drops it, the slot's storage returns to
//! the free list. Backing storage only ever grows (largest-so-far reuse),
//! which avoids reallocation thrash across frames of varying size.

use std::sync::{Arc, Mutex, Weak};

/// Growable byte storage for one pooled sample slot.
///
/// `ensure_size` may grow (never shrink) the backing allocation, and uses
/// fallible allocation so an out-of-memory condition degrades instead of
/// aborting a decoder thread.
#[derive(Debug, Default)]
pub struct SampleBuffer {
    data: Vec<u8>,
}

impl SampleBuffer {
    /// Resize to exactly `size` bytes, growing the backing allocation only
    /// when needed. Returns false when `size` is zero or allocation fails.
    pub fn ensure_size(&mut self, size: usize) -> bool {
        if size == 0 {
            return false;
        }

        let additional = size.saturating_sub(self.data.len());
        if additional > 0 && self.data.try_reserve(additional).is_err() {
            return false;
        }

        // Shrinking the length keeps the capacity: largest-so-far reuse.
        self.data.resize(size, 0);
        true
    }

    /// Current logical size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no storage has been requested yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated capacity in bytes (never shrinks).
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Read access to the current contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Write access to the current contents.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

struct PoolInner<B> {
    free: Mutex<Vec<B>>,
}

/// A reuse pool for sample storage.
///
/// `acquire` hands out a lease over a free slot (or a fresh empty one);
/// dropping the lease returns the slot to the free list. `reset` forcibly
/// reclaims all free slots on shutdown. Leases still held by a consumer
/// survive a reset - their storage is simply freed instead of returned
/// once the last holder drops it after the pool itself is gone.
pub struct SamplePool<B> {
    inner: Arc<PoolInner<B>>,
}

impl<B: Default + Send> SamplePool<B> {
    /// Create an empty pool.
    pub fn new() -> Self {
        SamplePool {
            inner: Arc::new(PoolInner {
                free: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Take a free slot, or a fresh empty one if none is available.
    pub fn acquire(&self) -> PoolLease<B> {
        let storage = self
            .inner
            .free
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_default();

        PoolLease {
            storage: Some(storage),
            pool: Arc::downgrade(&self.inner),
        }
    }

    /// Drop every free slot (used on shutdown).
    pub fn reset(&self) {
        self.inner.free.lock().unwrap().clear();
    }

    /// Number of slots currently in the free list.
    pub fn free_slots(&self) -> usize {
        self.inner.free.lock().unwrap().len()
    }
}

impl<B: Default + Send> Default for SamplePool<B> {
    fn default() -> Self {
        SamplePool::new()
    }
}

/// Exclusive lease over one pooled storage slot.
///
/// Returns the slot to its pool on drop; if the pool has already been
/// dropped, the storage is simply freed.
pub struct PoolLease<B> {
    storage: Option<B>,
    pool: Weak<PoolInner<B>>,
}

impl<B> PoolLease<B> {
    /// Access the leased storage.
    pub fn storage(&self) -> &B {
        // storage is only vacated in drop
        self.storage.as_ref().unwrap()
    }

    /// Mutable access to the leased storage.
    pub fn storage_mut(&mut self) -> &mut B {
        self.storage.as_mut().unwrap()
    }
}

impl<B> Drop for PoolLease<B> {
    fn drop(&mut self) {
        if let (Some(storage), Some(pool)) = (self.storage.take(), self.pool.upgrade()) {
            pool.free.lock().unwrap().push(storage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_returns_slot_for_reuse() {
        let pool: SamplePool<SampleBuffer> = SamplePool::new();

        let mut lease = pool.acquire();
        assert!(lease.storage_mut().ensure_size(1024));
        let capacity = lease.storage().capacity();
        drop(lease);

        assert_eq!(pool.free_slots(), 1);

        // A smaller request reuses the grown slot without reallocating.
        let mut lease = pool.acquire();
        assert!(lease.storage_mut().ensure_size(512));
        assert_eq!(lease.storage().len(), 512);
        assert!(lease.storage().capacity() >= capacity);
        assert_eq!(pool.free_slots(), 0);
    }

    #[test]
    fn storage_never_shrinks() {
        let mut buffer = SampleBuffer::default();
        assert!(buffer.ensure_size(4096));
        let capacity = buffer.capacity();

        assert!(buffer.ensure_size(16));
        assert_eq!(buffer.len(), 16);
        assert!(buffer.capacity() >= capacity);

        assert!(buffer.ensure_size(8192));
        assert_eq!(buffer.len(), 8192);
        assert!(buffer.capacity() >= 8192);
    }

    #[test]
    fn zero_size_initialization_fails() {
        let mut buffer = SampleBuffer::default();
        assert!(!buffer.ensure_size(0));
    }

    #[test]
    fn reset_reclaims_free_slots() {
        let pool: SamplePool<SampleBuffer> = SamplePool::new();
        drop(pool.acquire());
        drop(pool.acquire());
        assert!(pool.free_slots() >= 1);

        pool.reset();
        assert_eq!(pool.free_slots(), 0);
    }

    #[test]
    fn lease_outliving_pool_frees_storage() {
        let pool: SamplePool<SampleBuffer> = SamplePool::new();
        let mut lease = pool.acquire();
        assert!(lease.storage_mut().ensure_size(64));

        drop(pool);
        drop(lease); // must not panic; storage is simply freed
    }

    #[test]
    fn grown_buffer_is_zeroed_into_new_range() {
        let mut buffer = SampleBuffer::default();
        assert!(buffer.ensure_size(4));
        buffer.as_mut_slice().copy_from_slice(&[1, 2, 3, 4]);

        assert!(buffer.ensure_size(8));
        assert_eq!(&buffer.as_slice()[..4], &[1, 2, 3, 4]);
        assert_eq!(&buffer.as_slice()[4..], &[0, 0, 0, 0]);
    }
}
