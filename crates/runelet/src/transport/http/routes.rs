//! HTTP route handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    extract::{Form, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use crate::service::ConverterService;

use super::page;

/// Form payload shared by the convert and reverse routes.
///
/// The `text` field defaults to the empty string when absent, matching a
/// form submission with an empty textarea.
#[derive(Debug, Deserialize)]
struct ConvertForm {
    #[serde(default)]
    text: String,
}

async fn index() -> Html<String> {
    Html(page::render(""))
}

async fn convert(
    State(service): State<Arc<ConverterService>>,
    Form(form): Form<ConvertForm>,
) -> Html<String> {
    let result = service.convert(&form.text);
    Html(page::render(&result))
}

async fn reverse(
    State(service): State<Arc<ConverterService>>,
    Form(form): Form<ConvertForm>,
) -> Html<String> {
    let result = match service.reverse(&form.text) {
        Ok(text) => text,
        // Only the Reject policy errors; the message lands in the result
        // pane rather than replacing the page.
        Err(e) => e.to_string(),
    };
    Html(page::render(&result))
}

async fn metrics(State(service): State<Arc<ConverterService>>) -> Response {
    match service.metrics().render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Record count and latency for each request, labeled by request path.
async fn track_requests(
    State(service): State<Arc<ConverterService>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let start = Instant::now();
    let response = next.run(request).await;
    service.metrics().observe(&path, start.elapsed());
    response
}

pub fn routes(service: Arc<ConverterService>) -> Router {
    Router::new()
        .route("/", get(index).post(index))
        .route("/convert", get(index).post(convert))
        .route("/reverse", get(index).post(reverse))
        // Any other path serves the index page, like the original
        // root-pattern dispatch.
        .fallback(index)
        .layer(middleware::from_fn_with_state(
            service.clone(),
            track_requests,
        ))
        // Registered after the metrics layer so scraping does not count
        // itself.
        .route("/metrics", get(metrics))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        let service = Arc::new(ConverterService::new().unwrap());
        routes(service)
    }

    async fn response_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(path: &str, body: &'static str) -> Request<Body> {
        Request::post(path)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn index_serves_the_form_page() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = response_text(response).await;
        assert!(html.contains(r#"action="/convert""#));
        assert!(html.contains(r#"action="/reverse""#));
        assert!(html.contains("<pre></pre>"));
    }

    #[tokio::test]
    async fn convert_renders_escape_tokens() {
        // "hi 😀"
        let response = app()
            .oneshot(form_post("/convert", "text=hi+%F0%9F%98%80"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = response_text(response).await;
        assert!(html.contains("<pre>hi \\U+1F600 </pre>"));
    }

    #[tokio::test]
    async fn reverse_renders_decoded_text() {
        // "\U+1F600 hello"
        let response = app()
            .oneshot(form_post("/reverse", "text=%5CU%2B1F600%20hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = response_text(response).await;
        assert!(html.contains("<pre>😀hello</pre>"));
    }

    #[tokio::test]
    async fn reverse_replaces_malformed_tokens() {
        // "\U+ZZZZ " under the default Replace policy
        let response = app()
            .oneshot(form_post("/reverse", "text=%5CU%2BZZZZ%20"))
            .await
            .unwrap();

        let html = response_text(response).await;
        assert!(html.contains("<pre>\u{FFFD}</pre>"));
    }

    #[tokio::test]
    async fn get_on_convert_renders_the_empty_page() {
        let response = app()
            .oneshot(Request::get("/convert").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = response_text(response).await;
        assert!(html.contains("<pre></pre>"));
    }

    #[tokio::test]
    async fn unknown_path_serves_the_index_page() {
        let response = app()
            .oneshot(Request::get("/no-such-page").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = response_text(response).await;
        assert!(html.contains("<pre></pre>"));
    }

    #[tokio::test]
    async fn missing_text_field_defaults_to_empty() {
        let response = app().oneshot(form_post("/convert", "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = response_text(response).await;
        assert!(html.contains("<pre></pre>"));
    }

    #[tokio::test]
    async fn result_text_is_html_escaped() {
        let response = app()
            .oneshot(form_post("/reverse", "text=%3Cscript%3E"))
            .await
            .unwrap();

        let html = response_text(response).await;
        assert!(html.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn metrics_exposes_request_counts_by_path() {
        let app = app();

        let response = app
            .clone()
            .oneshot(form_post("/convert", "text=hi"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            prometheus::TEXT_FORMAT
        );

        let text = response_text(response).await;
        assert!(text.contains("http_requests_total{path=\"/convert\"} 1"));
        assert!(text.contains("http_request_duration_seconds_count{path=\"/convert\"} 1"));
        // The metrics route itself is not instrumented.
        assert!(!text.contains("path=\"/metrics\""));
    }
}
