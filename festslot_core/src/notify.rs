use festslot_shared::{Notification, NotificationVariant};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Receives toast-style messages. Rendering and dismissal belong to the
/// implementation.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards into a channel; the receiving end is usually a front end loop.
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // receiver gone means nobody is rendering; nothing to do
        let _ = self.tx.send(notification);
    }
}

pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, n: Notification) {
        match n.variant {
            NotificationVariant::Default => info!(title = %n.title, "{}", n.description),
            NotificationVariant::Destructive => warn!(title = %n.title, "{}", n.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::channel();
        notifier.notify(Notification::credits_added(100));
        notifier.notify(Notification::winner(50));
        assert_eq!(rx.try_recv().unwrap().title, "Credits Added");
        assert_eq!(rx.try_recv().unwrap().title, "Winner!");
    }

    #[test]
    fn closed_channel_is_ignored() {
        let (notifier, rx) = ChannelNotifier::channel();
        drop(rx);
        notifier.notify(Notification::insufficient_credits(10));
    }
}
