//! Transient notifications with a fixed auto-dismiss delay.
//!
//! At most one notification is visible. Showing a new one replaces the text,
//! aborts the pending dismissal and schedules a fresh one, so the newest
//! message is never hidden by the timer of an older one.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Default time a notification stays visible.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

/// Where notifications are displayed.
pub trait NotificationSink: Send + Sync {
    fn show(&self, message: &str);

    fn hide(&self);
}

/// The currently visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub visible_until: Instant,
    id: u64,
}

#[derive(Debug, Default)]
struct NotificationState {
    current: Option<Notification>,
    next_id: u64,
}

/// Shows one message at a time and hides it after a fixed delay.
///
/// Must be used from within a tokio runtime.
pub struct Notifier {
    state: Arc<Mutex<NotificationState>>,
    sink: Arc<dyn NotificationSink>,
    duration: Duration,
    dismiss_task: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("current", &self.state.lock().current)
            .field("duration", &self.duration)
            .finish()
    }
}

impl Notifier {
    pub fn new(sink: Arc<dyn NotificationSink>, duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(NotificationState::default())),
            sink,
            duration,
            dismiss_task: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Displays `message` and (re)starts the dismissal countdown.
    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();

        if let Some(task) = self.dismiss_task.take() {
            task.abort();
        }

        let id = {
            let mut state = self.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.current = Some(Notification {
                message: message.clone(),
                visible_until: Instant::now() + self.duration,
                id,
            });
            id
        };

        tracing::debug!(notice = %message, "Notify");
        self.sink.show(&message);

        let state = self.state.clone();
        let sink = self.sink.clone();
        let duration = self.duration;
        self.dismiss_task = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut state = state.lock();
            // A superseded timer that raced past `abort` must not hide a newer message.
            if state.current.as_ref().is_some_and(|n| n.id == id) {
                state.current.take();
                sink.hide();
            }
        }));
    }

    /// The notification currently visible, if any.
    pub fn current(&self) -> Option<Notification> {
        self.state.lock().current.clone()
    }

    pub fn current_message(&self) -> Option<String> {
        self.state.lock().current.as_ref().map(|n| n.message.clone())
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Some(task) = self.dismiss_task.take() {
            task.abort();
        }
    }
}

/// Prints notifications to stderr.
#[derive(Debug, Default)]
pub struct StderrSink;

impl NotificationSink for StderrSink {
    fn show(&self, message: &str) {
        eprintln!("{message}");
    }

    fn hide(&self) {}
}

/// Records sink calls, for tests of code that notifies.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Show(String),
    Hide,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }

    pub fn shown(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Show(message) => Some(message.clone()),
                SinkEvent::Hide => None,
            })
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn show(&self, message: &str) {
        self.events.lock().push(SinkEvent::Show(message.to_string()));
    }

    fn hide(&self) {
        self.events.lock().push(SinkEvent::Hide);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> (Notifier, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let notifier = Notifier::new(sink.clone(), DEFAULT_NOTIFICATION_DURATION);
        (notifier, sink)
    }

    /// Lets the dismissal task observe the advanced clock.
    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_then_dismiss() {
        let (mut notifier, sink) = notifier();

        notifier.show("Copied HTML to clipboard!");
        let current = notifier.current().unwrap();
        assert_eq!(current.message, "Copied HTML to clipboard!");
        assert_eq!(
            current.visible_until - Instant::now(),
            DEFAULT_NOTIFICATION_DURATION
        );

        tokio::time::advance(Duration::from_millis(2999)).await;
        settle().await;
        assert!(notifier.current().is_some());

        tokio::time::advance(Duration::from_millis(2)).await;
        settle().await;
        assert!(notifier.current().is_none());
        assert_eq!(
            sink.events(),
            vec![
                SinkEvent::Show("Copied HTML to clipboard!".into()),
                SinkEvent::Hide
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_message_is_not_hidden_early() {
        let (mut notifier, sink) = notifier();

        notifier.show("A");
        tokio::time::advance(Duration::from_millis(2000)).await;
        settle().await;

        notifier.show("B");
        tokio::time::advance(Duration::from_millis(1500)).await;
        settle().await;

        // A's timer would have fired by now.
        assert_eq!(notifier.current_message().as_deref(), Some("B"));
        assert!(!sink.events().contains(&SinkEvent::Hide));

        tokio::time::advance(Duration::from_millis(1600)).await;
        settle().await;
        assert!(notifier.current().is_none());
        assert_eq!(
            sink.events(),
            vec![
                SinkEvent::Show("A".into()),
                SinkEvent::Show("B".into()),
                SinkEvent::Hide
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_duration() {
        let sink = Arc::new(RecordingSink::default());
        let mut notifier = Notifier::new(sink.clone(), Duration::from_millis(500));
        assert_eq!(notifier.duration(), Duration::from_millis(500));

        notifier.show("Cleared!");
        tokio::time::advance(Duration::from_millis(501)).await;
        settle().await;
        assert!(notifier.current().is_none());
        assert_eq!(sink.shown(), vec!["Cleared!".to_string()]);
    }
}
