//! Ownership-registration capsules.
//!
//! A [`Capsule`] pairs a raw pointer with a release function. Attached as
//! an array's base, it ties the lifetime of a foreign memory block to the
//! reference count of the array: when the last handle to the capsule is
//! dropped, the release function runs once with the original pointer.

use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

use parking_lot::Mutex;

/// Release function run when a capsule dies.
pub type ReleaseFn = Box<dyn FnOnce(NonNull<u8>) + Send>;

struct CapsuleInner {
    ptr: NonNull<u8>,
    name: &'static str,
    release: Mutex<Option<ReleaseFn>>,
}

impl CapsuleInner {
    fn release_once(&self) -> bool {
        // take() leaves None behind, so a second call finds nothing to run
        let release = self.release.lock().take();
        match release {
            Some(release) => {
                tracing::trace!(ptr = ?self.ptr, name = self.name, "releasing capsule memory");
                release(self.ptr);
                true
            }
            None => {
                tracing::warn!(ptr = ?self.ptr, name = self.name, "capsule already released");
                false
            }
        }
    }
}

impl Drop for CapsuleInner {
    fn drop(&mut self) {
        if self.release.get_mut().is_some() {
            self.release_once();
        }
    }
}

/// Reference-counted handle owning a foreign pointer.
#[derive(Clone)]
pub struct Capsule(Arc<CapsuleInner>);

impl Capsule {
    /// Register `release` to run on `ptr` when the last handle drops.
    pub fn new<F>(ptr: NonNull<u8>, release: F) -> Self
    where
        F: FnOnce(NonNull<u8>) + Send + 'static,
    {
        Self::named(ptr, "", release)
    }

    /// Like [`Capsule::new`] with a diagnostic name.
    pub fn named<F>(ptr: NonNull<u8>, name: &'static str, release: F) -> Self
    where
        F: FnOnce(NonNull<u8>) + Send + 'static,
    {
        Self(Arc::new(CapsuleInner {
            ptr,
            name,
            release: Mutex::new(Some(Box::new(release))),
        }))
    }

    /// The pointer this capsule owns.
    #[inline]
    #[must_use]
    pub fn pointer(&self) -> NonNull<u8> {
        self.0.ptr
    }

    /// Diagnostic name given at construction.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name
    }

    /// Whether the release function has already run.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.0.release.lock().is_none()
    }

    /// Run the release function now if it has not run yet.
    ///
    /// Returns `true` if this call ran it. Any later call, and the eventual
    /// drop, is a no-op.
    ///
    /// # Safety
    ///
    /// Every array still referring to the pointer becomes dangling.
    pub unsafe fn release_now(&self) -> bool {
        self.0.release_once()
    }

    /// Number of live handles.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

impl fmt::Debug for Capsule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capsule")
            .field("ptr", &self.0.ptr)
            .field("name", &self.0.name)
            .field("released", &self.is_released())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_capsule(calls: &Arc<AtomicUsize>) -> Capsule {
        let calls = Arc::clone(calls);
        Capsule::new(NonNull::dangling(), move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_release_on_last_drop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let capsule = counting_capsule(&calls);
        let other = capsule.clone();
        drop(capsule);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        drop(other);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_is_idempotent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let capsule = counting_capsule(&calls);
        unsafe {
            assert!(capsule.release_now());
            assert!(!capsule.release_now());
        }
        assert!(capsule.is_released());
        drop(capsule);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_receives_original_pointer() {
        let mut target = 7u64;
        let ptr = NonNull::from(&mut target).cast::<u8>();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_in = Arc::clone(&seen);
        drop(Capsule::named(ptr, "probe", move |p| {
            seen_in.store(p.as_ptr() as usize, Ordering::SeqCst);
        }));
        assert_eq!(seen.load(Ordering::SeqCst), ptr.as_ptr() as usize);
    }
}
