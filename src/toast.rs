use std::time::{Duration, Instant};

/// How long a toast stays on screen unless dismissed earlier.
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Ephemeral notification. An undoable toast is the visible handle of the
/// store's delete tombstone; pressing undo while it is live restores the
/// record.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub undoable: bool,
    deadline: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind, now: Instant) -> Self {
        Self {
            message: message.into(),
            kind,
            undoable: false,
            deadline: now + TOAST_DURATION,
        }
    }

    pub fn undoable(message: impl Into<String>, now: Instant) -> Self {
        let mut toast = Self::new(message, ToastKind::Info, now);
        toast.undoable = true;
        toast
    }

    pub fn expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// Drop expired toasts, keeping display order for the rest.
pub fn prune(toasts: &mut Vec<Toast>, now: Instant) {
    toasts.retain(|t| !t.expired(now));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_expires_after_duration() {
        let t0 = Instant::now();
        let toast = Toast::new("saved", ToastKind::Success, t0);
        assert!(!toast.expired(t0));
        assert!(!toast.expired(t0 + TOAST_DURATION - Duration::from_millis(1)));
        assert!(toast.expired(t0 + TOAST_DURATION));
    }

    #[test]
    fn prune_keeps_live_toasts_in_order() {
        let t0 = Instant::now();
        let old = Toast::new("old", ToastKind::Info, t0);
        let fresh = Toast::new("fresh", ToastKind::Info, t0 + Duration::from_secs(2));
        let mut toasts = vec![old, fresh];

        prune(&mut toasts, t0 + TOAST_DURATION);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "fresh");
    }
}
