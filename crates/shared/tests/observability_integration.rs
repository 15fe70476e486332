//! 可观测性模块集成测试
//!
//! 测试 metrics 与 middleware 模块的核心功能。

mod metrics_tests {
    use crownhike_shared::observability::metrics::{
        record_badge_award, record_hike, record_http_request, record_peak_ascent,
        record_route_planner_request,
    };

    #[test]
    fn test_record_http_request() {
        record_http_request("GET", "/peaks", 200, 0.05);
        record_http_request("POST", "/peaks/{id}/mark", 201, 0.12);
        record_http_request("POST", "/peaks/{id}/mark", 400, 0.02);
        record_http_request("GET", "/peaks/{id}/route", 500, 0.25);
    }

    #[test]
    fn test_record_domain_counters() {
        record_badge_award("TATRA_3", "threshold");
        record_badge_award("WINTER", "special");
        record_peak_ascent("success");
        record_peak_ascent("duplicate");
        record_hike("success");
        record_route_planner_request("ok");
    }
}

mod middleware_tests {
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use crownhike_shared::observability::middleware::{
        REQUEST_ID_HEADER, RequestId, http_tracing, request_id,
    };
    use tower::ServiceExt;

    async fn echo_request_id(Extension(id): Extension<RequestId>) -> String {
        id.as_str().to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/echo", get(echo_request_id))
            .layer(middleware::from_fn(http_tracing))
            .layer(middleware::from_fn(request_id))
    }

    #[tokio::test]
    async fn test_request_id_visible_to_handler() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/echo")
                    .header(REQUEST_ID_HEADER, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"req-42");
    }

    #[tokio::test]
    async fn test_unknown_route_still_traced() {
        let response = app()
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }
}
