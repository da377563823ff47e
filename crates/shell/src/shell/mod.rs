//! The mounted application shell.
//!
//! One [`Shell`] exists per authenticated browser session. It owns the
//! display preference, notification feed, toast stack, navigation state and
//! crash boundary, and every transition goes through its async mutex, so a
//! session's state changes are applied one at a time.
//!
//! Timers (toast expiry, the notification mark-read sweep) hold only a weak
//! reference to the shell. Dropping or unmounting the shell cancels them.

pub mod navigation;
pub mod notifications;
pub mod preferences;
pub mod registry;
pub mod scheduler;
pub mod toasts;

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};

use dealerdesk_core::{DisplayMode, NotificationId, ToastSeverity};

use crate::boundary::{Contained, CrashBoundary, RenderFault};
use crate::composer::{Chrome, DashboardComposer, ViewTree};
use crate::diagnostics::DiagnosticSink;
use crate::models::Identity;

use navigation::NavigationState;
use notifications::{NewNotification, NotificationFeed};
use preferences::{DisplayPreference, PreferenceError, PreferenceStore};
use scheduler::ScheduledTask;
use toasts::{Toast, ToastChannel};

pub use registry::{ShellId, ShellRegistry};

/// Root of every render scope path.
pub const RENDER_ROOT: &str = "Shell";

/// Timer settings for a mounted shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellTimings {
    /// Lifetime of a toast.
    pub toast_ttl: Duration,
    /// Delay between opening the notification panel and marking its
    /// entries read.
    pub mark_read_delay: Duration,
}

impl Default for ShellTimings {
    fn default() -> Self {
        Self {
            toast_ttl: Duration::from_millis(3000),
            mark_read_delay: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Default)]
struct NotificationPanel {
    open: bool,
    generation: u64,
    sweep: Option<ScheduledTask>,
}

/// Per-session shell state.
#[derive(Debug)]
pub struct Shell {
    identity: Identity,
    display: DisplayPreference,
    feed: NotificationFeed,
    panel: NotificationPanel,
    toasts: ToastChannel,
    navigation: NavigationState,
    boundary: CrashBoundary,
    timings: ShellTimings,
    this: Weak<Mutex<Self>>,
}

/// Shared handle to a mounted shell.
#[derive(Debug, Clone)]
pub struct ShellHandle(Arc<Mutex<Shell>>);

impl ShellHandle {
    /// Mount a shell for `identity`, restoring its display preference.
    ///
    /// A preference store failure is logged and the shell mounts in light
    /// mode.
    pub async fn mount(identity: Identity, store: PreferenceStore, timings: ShellTimings) -> Self {
        let display = match DisplayPreference::restore(store.clone(), identity.id).await {
            Ok(display) => display,
            Err(error) => {
                tracing::warn!(operator_id = %identity.id, %error, "Could not restore display mode");
                DisplayPreference::fallback(store, identity.id)
            }
        };

        tracing::debug!(operator_id = %identity.id, role = %identity.role, "Mounting shell");

        Self(Arc::new_cyclic(|this| {
            Mutex::new(Shell {
                identity,
                display,
                feed: NotificationFeed::new(),
                panel: NotificationPanel::default(),
                toasts: ToastChannel::new(timings.toast_ttl),
                navigation: NavigationState::default(),
                boundary: CrashBoundary::default(),
                timings,
                this: this.clone(),
            })
        }))
    }

    /// Wait for exclusive access to the shell.
    pub async fn lock(&self) -> MutexGuard<'_, Shell> {
        self.0.lock().await
    }
}

impl Shell {
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    // =========================================================================
    // Display mode
    // =========================================================================

    #[must_use]
    pub const fn display_mode(&self) -> DisplayMode {
        self.display.mode()
    }

    /// Flip and persist the display mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be written; the mode is
    /// left unchanged.
    pub async fn toggle_display_mode(&mut self) -> Result<DisplayMode, PreferenceError> {
        let mode = self.display.toggle().await?;
        tracing::debug!(operator_id = %self.identity.id, ?mode, "Display mode toggled");
        Ok(mode)
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    #[must_use]
    pub const fn feed(&self) -> &NotificationFeed {
        &self.feed
    }

    pub fn append_notification(&mut self, notification: NewNotification) -> NotificationId {
        self.feed.append(notification)
    }

    pub fn mark_read(&mut self, id: NotificationId) {
        self.feed.mark_read(id);
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.feed.unread_count()
    }

    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.panel.open
    }

    /// Whether a mark-read sweep is scheduled and has not run yet.
    #[must_use]
    pub const fn is_sweep_pending(&self) -> bool {
        self.panel.sweep.is_some()
    }

    /// Open or close the notification panel.
    pub fn set_notification_panel(&mut self, open: bool) {
        if open {
            self.open_notification_panel();
        } else {
            self.close_notification_panel();
        }
    }

    /// Open the panel and schedule a sweep over the entries unread right now.
    ///
    /// Opening an already open panel replaces the pending sweep with a new
    /// one over a fresh snapshot.
    pub fn open_notification_panel(&mut self) {
        self.panel.open = true;
        self.panel.generation += 1;

        let generation = self.panel.generation;
        let snapshot = self.feed.unread_ids();
        let this = self.this.clone();
        self.panel.sweep = Some(ScheduledTask::after(
            self.timings.mark_read_delay,
            async move {
                if let Some(shell) = this.upgrade() {
                    shell.lock().await.finish_sweep(generation, &snapshot);
                }
            },
        ));
    }

    /// Close the panel, cancelling any pending sweep.
    pub fn close_notification_panel(&mut self) {
        self.panel.open = false;
        self.panel.generation += 1;
        self.panel.sweep = None;
    }

    fn finish_sweep(&mut self, generation: u64, snapshot: &[NotificationId]) {
        if !self.panel.open || self.panel.generation != generation {
            return;
        }
        self.feed.mark_all(snapshot);
        self.panel.sweep = None;
        tracing::debug!(marked = snapshot.len(), "Notification sweep finished");
    }

    // =========================================================================
    // Toasts
    // =========================================================================

    /// Show a transient toast that expires on its own timer.
    pub fn show_toast(&mut self, message: impl Into<String>, severity: ToastSeverity) {
        let this = self.this.clone();
        self.toasts.push(message.into(), severity, move |id, ttl| {
            ScheduledTask::after(ttl, async move {
                if let Some(shell) = this.upgrade() {
                    shell.lock().await.toasts.expire(id);
                }
            })
        });
    }

    /// Toasts currently on screen, oldest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.visible()
    }

    // =========================================================================
    // Navigation and rendering
    // =========================================================================

    #[must_use]
    pub const fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Select a dashboard section through the composer.
    pub fn select_section(&mut self, composer: &DashboardComposer, id: &str) -> &'static str {
        composer.on_section_change(self.identity.role, &mut self.navigation, id)
    }

    #[must_use]
    pub const fn boundary(&self) -> &CrashBoundary {
        &self.boundary
    }

    /// Clear a latched render fault.
    pub fn reset_boundary(&mut self) {
        self.boundary.reset();
    }

    /// Compose the active dashboard and hand it to `page`, all inside the
    /// crash boundary.
    pub fn render_dashboard<T>(
        &mut self,
        composer: &DashboardComposer,
        sink: &dyn DiagnosticSink,
        page: impl FnOnce(&ViewTree) -> Result<T, RenderFault>,
    ) -> Contained<T> {
        let chrome = Chrome {
            operator: &self.identity,
            display_mode: self.display.mode(),
            feed: &self.feed,
            panel_open: self.panel.open,
        };
        let role = self.identity.role;
        let active = self.navigation.active_section_id();

        self.boundary.contain(RENDER_ROOT, sink, |scope| {
            let view = composer.render(role, active, &chrome, scope)?;
            scope.enter("Page");
            page(&view)
        })
    }

    /// Cancel every pending timer. Called when the shell leaves the registry.
    pub fn unmount(&mut self) {
        self.close_notification_panel();
        self.toasts = ToastChannel::new(self.timings.toast_ttl);
        tracing::debug!(operator_id = %self.identity.id, "Shell unmounted");
    }
}
