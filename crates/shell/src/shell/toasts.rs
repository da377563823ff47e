//! Ephemeral toast channel.
//!
//! Toasts are fire-and-forget: callers cannot cancel or look up a toast once
//! it is shown. Each toast carries its own expiry timer; the channel drops the
//! toast when the timer fires. Toasts never reach the notification feed.

use std::time::Duration;

use serde::Serialize;

use dealerdesk_core::ToastSeverity;

use super::scheduler::ScheduledTask;

/// A visible toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    #[serde(skip)]
    id: u64,
    pub message: String,
    pub severity: ToastSeverity,
    pub auto_expire_ms: u64,
}

#[derive(Debug)]
struct ActiveToast {
    toast: Toast,
    _expiry: ScheduledTask,
}

/// Stack of visible toasts.
#[derive(Debug)]
pub struct ToastChannel {
    ttl: Duration,
    next_id: u64,
    active: Vec<ActiveToast>,
}

impl ToastChannel {
    /// A channel whose toasts expire after `ttl`.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 0,
            active: Vec::new(),
        }
    }

    /// Push a toast. `schedule_expiry` receives the toast's internal id and
    /// lifetime and must return the timer that later calls [`Self::expire`].
    pub(crate) fn push(
        &mut self,
        message: String,
        severity: ToastSeverity,
        schedule_expiry: impl FnOnce(u64, Duration) -> ScheduledTask,
    ) {
        self.next_id += 1;
        let id = self.next_id;
        let toast = Toast {
            id,
            message,
            severity,
            auto_expire_ms: u64::try_from(self.ttl.as_millis()).unwrap_or(u64::MAX),
        };
        let expiry = schedule_expiry(id, self.ttl);
        self.active.push(ActiveToast {
            toast,
            _expiry: expiry,
        });
    }

    /// Drop the toast with internal id `id`, if still visible.
    pub(crate) fn expire(&mut self, id: u64) {
        self.active.retain(|active| active.toast.id != id);
    }

    /// Visible toasts, oldest first (stack order).
    #[must_use]
    pub fn visible(&self) -> Vec<Toast> {
        self.active.iter().map(|active| active.toast.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_toast_wire_format_is_camel_case() {
        let mut channel = ToastChannel::new(Duration::from_millis(3000));
        channel.push("Saved".to_string(), ToastSeverity::Success, |_, ttl| {
            ScheduledTask::after(ttl, async {})
        });

        let json = serde_json::to_value(channel.visible()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"message": "Saved", "severity": "success", "autoExpireMs": 3000}])
        );
    }

    #[tokio::test]
    async fn test_expire_removes_only_that_toast() {
        let mut channel = ToastChannel::new(Duration::from_millis(3000));
        let mut ids = Vec::new();
        for message in ["a", "b"] {
            channel.push(message.to_string(), ToastSeverity::Info, |id, ttl| {
                ids.push(id);
                ScheduledTask::after(ttl, async {})
            });
        }

        channel.expire(ids[0]);

        let visible = channel.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].message, "b");
    }
}
