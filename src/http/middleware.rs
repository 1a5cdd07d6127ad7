//! Request-logging middleware.
//!
//! Wraps every inbound request: logs the incoming request, measures
//! duration, and logs completion or failure through the logger's
//! http-request helpers. The request handler never observes a logging
//! failure.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use serde_json::Value;
use uuid::Uuid;

use crate::logging::{Fields, Logger};

/// Log one request at entry and at completion.
///
/// Server-error responses are logged as error events carrying the request
/// metadata; everything else goes through the request-completion helper.
pub async fn log_requests(
    State(logger): State<Arc<Logger>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let url = request.uri().to_string();
    let request_id = Uuid::new_v4().to_string();
    let start = Instant::now();

    logger.log_request_start(&method, &url, None, Some(&request_id), None);

    let response = next.run(request).await;
    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        let mut fields = Fields::new();
        fields.insert("type".to_string(), Value::from("request-error"));
        fields.insert("method".to_string(), Value::from(method.as_str()));
        fields.insert("url".to_string(), Value::from(url.as_str()));
        fields.insert("requestId".to_string(), Value::from(request_id));
        fields.insert("statusCode".to_string(), Value::from(status.as_u16()));
        fields.insert("duration".to_string(), Value::from(format!("{duration_ms}ms")));
        logger.error(
            format!("Request failed: {method} {url}"),
            None,
            Some(fields),
        );
    } else {
        logger.log_request(&method, &url, None, status.as_u16(), duration_ms);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::Router;
    use std::sync::Mutex;
    use tower::ServiceExt;

    use crate::logging::{Level, LogEvent, LogSink};

    #[derive(Default)]
    struct CaptureSink {
        events: Mutex<Vec<LogEvent>>,
    }

    impl CaptureSink {
        fn events(&self) -> Vec<LogEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl LogSink for CaptureSink {
        fn accept(&self, event: &LogEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn test_app() -> (Router, Arc<CaptureSink>) {
        let sink = Arc::new(CaptureSink::default());
        let logger = Arc::new(Logger::from_sinks(vec![sink.clone()]));

        let app = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route(
                "/boom",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .layer(from_fn_with_state(logger, log_requests));

        (app, sink)
    }

    #[tokio::test]
    async fn test_logs_entry_and_completion() {
        let (app, sink) = test_app();

        let response = app
            .oneshot(HttpRequest::get("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let events = sink.events();
        assert_eq!(events.len(), 2);

        let entry = &events[0];
        assert_eq!(entry.level, Level::Log);
        assert_eq!(entry.context, "HTTP");
        assert_eq!(entry.message, "Incoming GET /ok");
        let entry_fields = entry.fields.as_ref().unwrap();
        assert_eq!(entry_fields["type"], "request");
        assert!(entry_fields.contains_key("requestId"));

        let done = &events[1];
        assert_eq!(done.level, Level::Log);
        assert_eq!(done.message, "GET /ok");
        let done_fields = done.fields.as_ref().unwrap();
        assert_eq!(done_fields["type"], "http-request");
        assert_eq!(done_fields["statusCode"], 200);
        assert!(done_fields["duration"]
            .as_str()
            .unwrap()
            .ends_with("ms"));
    }

    #[tokio::test]
    async fn test_server_error_logs_error_event() {
        let (app, sink) = test_app();

        let response = app
            .oneshot(HttpRequest::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let events = sink.events();
        assert_eq!(events.len(), 2);

        let failed = &events[1];
        assert_eq!(failed.level, Level::Error);
        assert_eq!(failed.message, "Request failed: GET /boom");
        let fields = failed.fields.as_ref().unwrap();
        assert_eq!(fields["type"], "request-error");
        assert_eq!(fields["statusCode"], 500);
    }
}
