use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::{Body, BodyDataStream, Bytes};
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use futures::Stream;

use crate::services::notification_service::{Notification, NotificationService};

/// Moves a [`Notification`] attached to the response by a handler onto the
/// queue, but only once the response body has been written out or dropped.
/// Responses without one pass through untouched.
pub async fn dispatch_after_response(
    State(notifications): State<NotificationService>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;
    let Some(notification) = response.extensions_mut().remove::<Notification>() else {
        return response;
    };

    let (parts, body) = response.into_parts();
    let body = Body::from_stream(EnqueueOnDrop {
        inner: body.into_data_stream(),
        pending: Some(notification),
        notifications,
    });
    Response::from_parts(parts, body)
}

struct EnqueueOnDrop {
    inner: BodyDataStream,
    pending: Option<Notification>,
    notifications: NotificationService,
}

impl Stream for EnqueueOnDrop {
    type Item = Result<Bytes, axum::Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl Drop for EnqueueOnDrop {
    fn drop(&mut self) {
        if let Some(notification) = self.pending.take() {
            self.notifications.enqueue(notification);
        }
    }
}
