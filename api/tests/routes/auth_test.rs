#[cfg(test)]
mod tests {
    use crate::helpers::app::{get_json_body, json_request, make_test_app};
    use axum::http::StatusCode;
    use db::models::user::{Model as UserModel, Role};
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn register_creates_account_and_returns_token() {
        let (app, _app_state) = make_test_app().await;

        let req = json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "username": "drpatel",
                "email": "patel@example.com",
                "password": "strongpassword",
                "role": "instructor"
            }),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["username"], "drpatel");
        assert_eq!(json["data"]["role"], "instructor");
        assert!(json["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert!(json["data"]["expires_at"].as_str().is_some());
    }

    #[tokio::test]
    #[serial]
    async fn register_rejects_admin_role() {
        let (app, _app_state) = make_test_app().await;

        let req = json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "username": "wannabe",
                "email": "wannabe@example.com",
                "password": "strongpassword",
                "role": "admin"
            }),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn register_rejects_short_password() {
        let (app, _app_state) = make_test_app().await;

        let req = json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "username": "shorty",
                "email": "shorty@example.com",
                "password": "short"
            }),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("Password must be at least 8 characters")
        );
    }

    #[tokio::test]
    #[serial]
    async fn register_conflicts_on_duplicate_username() {
        let (app, app_state) = make_test_app().await;

        UserModel::create(
            app_state.db(),
            "taken",
            "taken@example.com",
            "password123",
            Role::Student,
        )
        .await
        .unwrap();

        let req = json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "username": "taken",
                "email": "other@example.com",
                "password": "password123"
            }),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    #[serial]
    async fn login_succeeds_with_valid_credentials() {
        let (app, app_state) = make_test_app().await;

        UserModel::create(
            app_state.db(),
            "profmbeki",
            "mbeki@example.com",
            "lecturepass",
            Role::Instructor,
        )
        .await
        .unwrap();

        let req = json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": "profmbeki", "password": "lecturepass" }),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Login successful");
        assert!(json["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    #[serial]
    async fn login_rejects_wrong_password() {
        let (app, app_state) = make_test_app().await;

        UserModel::create(
            app_state.db(),
            "profmbeki",
            "mbeki@example.com",
            "lecturepass",
            Role::Instructor,
        )
        .await
        .unwrap();

        let req = json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": "profmbeki", "password": "not-the-password" }),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Invalid password");
    }

    #[tokio::test]
    #[serial]
    async fn login_rejects_unknown_username() {
        let (app, _app_state) = make_test_app().await;

        let req = json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": "ghost", "password": "whatever123" }),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = get_json_body(response).await;
        assert_eq!(json["message"], "No account with that username");
    }
}
