//! Helpers for tests that touch process-wide environment variables.

/// Sets or removes an environment variable and puts the previous value back on drop.
pub struct EnvGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvGuard {
    /// Set `key` to `val` until the guard drops.
    ///
    /// # Safety
    ///
    /// Uses `std::env::set_var`, which races with concurrent env access.
    /// Callers serialize with `#[serial(env)]`.
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers hold the `env` serial lock.
        unsafe { std::env::set_var(key, val) };
        Self { key, prev }
    }

    /// Unset `key` until the guard drops.
    ///
    /// # Safety
    ///
    /// Same constraint as [`EnvGuard::set`].
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers hold the `env` serial lock.
        unsafe { std::env::remove_var(key) };
        Self { key, prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: the guard is dropped while the serial lock is still held.
        if let Some(v) = &self.prev {
            unsafe { std::env::set_var(self.key, v) };
        } else {
            unsafe { std::env::remove_var(self.key) };
        }
    }
}
