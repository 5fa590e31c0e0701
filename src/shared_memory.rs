//! Component F: System V shared-memory attach/detach, via raw `libc` bindings.

use std::io;

use crate::error::EngineError;

/// An attached System V shared-memory segment. Detach is an explicit,
/// fallible operation (see [`SharedSegment::detach`]), not a `Drop` impl:
/// detach failure is reportable per §7 and a destructor cannot report it.
pub struct SharedSegment {
    id: i32,
    ptr: *mut u8,
    size: usize,
}

impl SharedSegment {
    /// Attach the segment keyed by `key`, expected to be `size` bytes, with
    /// read-write access mode `0666`.
    pub fn attach(key: i32, size: usize) -> Result<Self, EngineError> {
        // SAFETY: `shmget`/`shmat` are plain FFI calls; failure is reported
        // via errno and surfaced as `EngineError::Attach`.
        let id = unsafe { libc::shmget(key, size, 0o666) };
        if id < 0 {
            return Err(EngineError::Attach(io::Error::last_os_error()));
        }

        let ptr = unsafe { libc::shmat(id, std::ptr::null(), 0) };
        if ptr as isize == -1 {
            return Err(EngineError::Attach(io::Error::last_os_error()));
        }

        Ok(Self {
            id,
            ptr: ptr as *mut u8,
            size,
        })
    }

    /// Raw pointer to the start of the attached segment.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr
    }

    /// Size of the attached segment, in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Detach the segment. Must be called exactly once; the engine's results
    /// are already committed to shared memory before this is called, so a
    /// failure here does not invalidate them.
    pub fn detach(self) -> Result<(), EngineError> {
        // SAFETY: `ptr` was returned by `shmat` in `attach` and has not been
        // detached before (consumed by value).
        let result = unsafe { libc::shmdt(self.ptr as *const libc::c_void) };
        if result < 0 {
            return Err(EngineError::Detach(io::Error::last_os_error()));
        }
        Ok(())
    }
}

// Kept for diagnostics (`tracing` fields); not part of the safety contract.
impl SharedSegment {
    /// The System V identifier this segment attached to.
    pub fn id(&self) -> i32 {
        self.id
    }
}
