use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::services::email::Mailer;

/// A rendered email, also used as a response extension by the handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Fire-and-forget email queue. Handlers attach a [`Notification`] to their
/// response and `middleware::notify` enqueues it once that response has been
/// handed off; a background worker drains the queue and logs every failure.
/// Nothing is retried.
///
/// The queue is unbounded and a single worker sends one email at a time, so a
/// slow provider (SMTP waits up to 15s) lets the backlog grow with traffic.
#[derive(Clone)]
pub struct NotificationService {
    sender: mpsc::UnboundedSender<Notification>,
}

impl NotificationService {
    /// Spawns the worker on the current runtime. The worker stops once every
    /// clone of the returned service has been dropped and the queue is empty.
    pub fn spawn(mailer: Arc<dyn Mailer>) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_worker(receiver, mailer));
        (Self { sender }, handle)
    }

    pub fn enqueue(&self, notification: Notification) {
        if let Err(e) = self.sender.send(notification) {
            warn!(to = %e.0.to, "Notification worker is gone, dropping email");
        }
    }
}

async fn run_worker(mut receiver: mpsc::UnboundedReceiver<Notification>, mailer: Arc<dyn Mailer>) {
    while let Some(notification) = receiver.recv().await {
        match mailer
            .send(&notification.to, &notification.subject, &notification.html)
            .await
        {
            Ok(()) => info!(
                to = %notification.to,
                subject = %notification.subject,
                "Notification delivered"
            ),
            Err(e) => error!(
                error = ?e,
                to = %notification.to,
                subject = %notification.subject,
                "Notification delivery failed"
            ),
        }
    }
    info!("Notification worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::services::email::MockMailer;

    fn notification(to: &str) -> Notification {
        Notification {
            to: to.to_string(),
            subject: "Asunto".to_string(),
            html: "<p>cuerpo</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn delivers_queued_notifications() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|to, subject, html| {
                to.contains("ana@x.com") && subject.contains("Asunto") && html.contains("cuerpo")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let (service, worker) = NotificationService::spawn(Arc::new(mailer));
        service.enqueue(notification("ana@x.com"));
        drop(service);

        worker.await.expect("worker panicked");
    }

    #[tokio::test]
    async fn failed_delivery_does_not_stop_the_worker() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|to, _, _| to.contains("falla@x.com"))
            .times(1)
            .returning(|_, _, _| Err(Error::Email("smtp down".into())));
        mailer
            .expect_send()
            .withf(|to, _, _| to.contains("ok@x.com"))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let (service, worker) = NotificationService::spawn(Arc::new(mailer));
        service.enqueue(notification("falla@x.com"));
        service.enqueue(notification("ok@x.com"));
        drop(service);

        worker.await.expect("worker panicked");
    }

    #[tokio::test]
    async fn enqueue_after_worker_exit_is_dropped_quietly() {
        let mailer = MockMailer::new();
        let (service, worker) = NotificationService::spawn(Arc::new(mailer));
        worker.abort();
        let _ = worker.await;
        service.enqueue(notification("ana@x.com"));
    }
}
