#[cfg(test)]
mod tests {
    use crate::helpers::app::{get_json_body, get_request, make_test_app};
    use axum::http::StatusCode;
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn health_check_returns_ok_json() {
        let (app, _app_state) = make_test_app().await;

        let response = app.oneshot(get_request("/api/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
        assert_eq!(json["message"], "Health check passed");
    }
}
