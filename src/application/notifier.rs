// Transient user-facing notifications

/// Fire-and-forget message surface. Implementations must not block or fail.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
