//! Notification feed: newest-first alerts with read/unread state.

use std::collections::VecDeque;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use dealerdesk_core::{NotificationId, NotificationKind};

/// One feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    /// Display string, e.g. `"Mar 04, 14:20"`.
    pub time: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub icon: String,
    pub read: bool,
}

/// A notification as submitted by a producer.
///
/// `id`, `time` and `icon` are optional; the feed fills them in.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNotification {
    #[serde(default)]
    pub id: Option<NotificationId>,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub icon: Option<String>,
}

impl NewNotification {
    /// A system notification with generated id, time and icon.
    #[must_use]
    pub fn system(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            message: message.into(),
            time: None,
            kind: NotificationKind::System,
            icon: None,
        }
    }
}

/// In-memory feed. Entries are never removed; the only mutation after
/// append is flipping `read` to true.
#[derive(Debug, Default)]
pub struct NotificationFeed {
    entries: VecDeque<Notification>,
    next_id: i64,
}

impl NotificationFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a notification and return its id.
    ///
    /// Ids are not de-duplicated; producers that supply their own ids are
    /// responsible for keeping them unique.
    pub fn append(&mut self, new: NewNotification) -> NotificationId {
        let id = new
            .id
            .unwrap_or_else(|| NotificationId::new(self.next_id.saturating_add(1)));
        self.next_id = self.next_id.max(id.get());

        let icon = new
            .icon
            .unwrap_or_else(|| new.kind.default_icon().to_string());
        let time = new
            .time
            .unwrap_or_else(|| Utc::now().format("%b %d, %H:%M").to_string());

        self.entries.push_front(Notification {
            id,
            title: new.title,
            message: new.message,
            time,
            kind: new.kind,
            icon,
            read: false,
        });
        id
    }

    /// Mark every entry with `id` as read. Unknown or already-read ids are a no-op.
    pub fn mark_read(&mut self, id: NotificationId) {
        for entry in self.entries.iter_mut().filter(|n| n.id == id) {
            entry.read = true;
        }
    }

    /// Mark a batch of ids as read in one pass.
    pub fn mark_all(&mut self, ids: &[NotificationId]) {
        for entry in &mut self.entries {
            if ids.contains(&entry.id) {
                entry.read = true;
            }
        }
    }

    /// Number of unread entries, counted on every call.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    /// Ids of the entries that are currently unread.
    #[must_use]
    pub fn unread_ids(&self) -> Vec<NotificationId> {
        self.entries
            .iter()
            .filter(|n| !n.read)
            .map(|n| n.id)
            .collect()
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn titled(title: &str) -> NewNotification {
        NewNotification::system(title, "body")
    }

    fn titles(feed: &NotificationFeed) -> Vec<&str> {
        feed.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_append_is_newest_first() {
        let mut feed = NotificationFeed::new();
        feed.append(titled("n1"));
        feed.append(titled("n2"));
        feed.append(titled("n3"));
        assert_eq!(titles(&feed), vec!["n3", "n2", "n1"]);
    }

    #[test]
    fn test_generated_ids_are_unique_and_increasing() {
        let mut feed = NotificationFeed::new();
        let a = feed.append(titled("a"));
        let b = feed.append(titled("b"));
        assert!(b > a);
    }

    #[test]
    fn test_generated_ids_skip_past_producer_ids() {
        let mut feed = NotificationFeed::new();
        feed.append(NewNotification {
            id: Some(NotificationId::new(40)),
            ..titled("explicit")
        });
        let generated = feed.append(titled("generated"));
        assert_eq!(generated, NotificationId::new(41));
    }

    #[test]
    fn test_generated_id_after_max_producer_id_does_not_overflow() {
        let mut feed = NotificationFeed::new();
        feed.append(NewNotification {
            id: Some(NotificationId::new(i64::MAX)),
            ..titled("explicit")
        });
        let generated = feed.append(titled("generated"));
        assert_eq!(generated, NotificationId::new(i64::MAX));
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.unread_count(), 2);
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        let mut feed = NotificationFeed::new();
        let id = Some(NotificationId::new(5));
        feed.append(NewNotification { id, ..titled("a") });
        feed.append(NewNotification { id, ..titled("b") });
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn test_defaults_filled_in() {
        let mut feed = NotificationFeed::new();
        feed.append(NewNotification {
            kind: NotificationKind::Delivery,
            ..titled("handover")
        });
        let entry = feed.iter().next().cloned();
        let entry = entry.as_ref();
        assert_eq!(entry.map(|n| n.icon.as_str()), Some("truck"));
        assert!(entry.is_some_and(|n| !n.time.is_empty() && !n.read));
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut feed = NotificationFeed::new();
        let first = feed.append(titled("a"));
        feed.append(titled("b"));

        feed.mark_read(first);
        let once: Vec<Notification> = feed.iter().cloned().collect();
        feed.mark_read(first);
        let twice: Vec<Notification> = feed.iter().cloned().collect();

        assert_eq!(once, twice);
        assert_eq!(feed.unread_count(), 1);
    }

    #[test]
    fn test_mark_read_unknown_id_is_noop() {
        let mut feed = NotificationFeed::new();
        feed.append(titled("a"));
        feed.mark_read(NotificationId::new(999));
        assert_eq!(feed.unread_count(), 1);
    }

    #[test]
    fn test_unread_count_tracks_any_sequence() {
        let mut feed = NotificationFeed::new();
        let mut ids = Vec::new();
        for step in 0..20_i64 {
            if step % 3 == 2 {
                if let Some(id) = ids.get(usize::try_from(step / 4).unwrap_or(0)) {
                    feed.mark_read(*id);
                }
            } else {
                ids.push(feed.append(titled(&format!("n{step}"))));
            }
            let expected = feed.iter().filter(|n| !n.read).count();
            assert_eq!(feed.unread_count(), expected);
        }
    }

    #[test]
    fn test_mark_all_batches() {
        let mut feed = NotificationFeed::new();
        let a = feed.append(titled("a"));
        let b = feed.append(titled("b"));
        let c = feed.append(titled("c"));

        feed.mark_all(&[a, c]);

        assert_eq!(feed.unread_ids(), vec![b]);
    }

    #[test]
    fn test_producer_payload_wire_format() {
        let new: NewNotification = serde_json::from_str(
            r#"{"title": "Vehicle sold", "message": "Civic 2021", "type": "sale"}"#,
        )
        .unwrap();
        assert_eq!(new.kind, NotificationKind::Sale);
        assert!(new.id.is_none() && new.icon.is_none());

        let mut feed = NotificationFeed::new();
        feed.append(new);
        let json = serde_json::to_value(feed.iter().next().unwrap()).unwrap();
        assert_eq!(json["type"], "sale");
        assert_eq!(json["icon"], "badge-dollar");
        assert_eq!(json["read"], false);
    }
}
