use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    api::{health_checks, jobs},
    app::App,
};

pub fn router(app: App) -> Router {
    Router::new()
        .route("/liveness", get(health_checks::ok))
        .route("/readiness", get(health_checks::ok))
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route("/jobs/{name}", put(jobs::update).delete(jobs::delete))
        .with_state(app)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::tests::setup_test::setup_test;

    #[tokio::test]
    async fn test_probes_respond_ok() {
        let test = setup_test().await;

        for probe in ["/liveness", "/readiness"] {
            let response = test.server.get(probe).await;
            response.assert_status_ok();
            response.assert_text("OK");
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let test = setup_test().await;

        test.server.get("/v1/jobs").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_unsupported_method_is_rejected() {
        let test = setup_test().await;

        test.server
            .get("/jobs/backup")
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
        assert!(test.upstream_requests().await.is_empty());
    }
}
