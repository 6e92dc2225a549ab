//! Login gate. A single hard-coded operator credential compared verbatim,
//! after a fixed delay.
//!
//! TODO: externalize credential verification to a real identity provider;
//! this gate is a stand-in, not an authentication design.

use std::time::Duration;

use axum::extract::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const LOGIN_EMAIL: &str = "moonnight@sta.com";
const LOGIN_PASSWORD: &str = "weareknight";
const LOGIN_DELAY: Duration = Duration::from_millis(1500);

pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub authenticated: bool,
}

pub fn verify_credentials(email: &str, password: &str) -> bool {
    email == LOGIN_EMAIL && password == LOGIN_PASSWORD
}

/// POST /api/v1/auth/login
///
/// The delay applies to both outcomes so timing does not reveal which
/// field mismatched.
pub async fn handle_login(
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    tokio::time::sleep(LOGIN_DELAY).await;

    if verify_credentials(&request.email, &request.password) {
        Ok(Json(LoginResponse {
            authenticated: true,
        }))
    } else {
        Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
    }
}
