use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::user::{Model as UserModel, Role};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Requested account role; defaults to `student`.
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub token: String,
    pub expires_at: String,
}

impl UserResponse {
    fn from_user(user: UserModel, token: String, expires_at: String) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            token,
            expires_at,
        }
    }
}

/// POST /auth/register
///
/// Register a new account.
///
/// ### Request Body
/// ```json
/// {
///   "username": "drpatel",
///   "email": "patel@example.com",
///   "password": "strongpassword",
///   "role": "instructor"
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "username": "drpatel",
///     "email": "patel@example.com",
///     "role": "instructor",
///     "token": "jwt_token_here",
///     "expires_at": "2025-06-23T11:00:00Z"
///   },
///   "message": "User registered successfully"
/// }
/// ```
///
/// - `400 Bad Request` (validation failure or disallowed role)
/// - `409 Conflict` (duplicate username or email)
/// - `500 Internal Server Error`
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(error_message)),
        );
    }

    // Admin accounts are never self-service.
    let role = match req.role.as_deref().unwrap_or("student") {
        "student" => Role::Student,
        "instructor" => Role::Instructor,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<UserResponse>::error(
                    "Role must be student or instructor",
                )),
            );
        }
    };

    let db = app_state.db();

    match UserModel::get_by_username(db, &req.username).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<UserResponse>::error(
                    "A user with this username already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match UserModel::get_by_email(db, &req.email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<UserResponse>::error(
                    "A user with this email already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match UserModel::create(db, &req.username, &req.email, &req.password, role).await {
        Ok(user) => {
            let (token, expiry) = generate_jwt(user.id, user.role.clone());
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    UserResponse::from_user(user, token, expiry),
                    "User registered successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// POST /auth/login
///
/// Authenticate an existing user and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "username": "drpatel",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK` → token and expiry in `data`
/// - `401 Unauthorized` (unknown username or invalid password)
/// - `500 Internal Server Error`
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(error_message)),
        );
    }

    let db = app_state.db();

    let user = match UserModel::get_by_username(db, &req.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<UserResponse>::error(
                    "No account with that username",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if !user.verify_password(&req.password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<UserResponse>::error("Invalid password")),
        );
    }

    let (token, expiry) = generate_jwt(user.id, user.role.clone());
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            UserResponse::from_user(user, token, expiry),
            "Login successful",
        )),
    )
}
