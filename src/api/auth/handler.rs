//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Employee;
use crate::db::repository::EmployeeRepository;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub employee: Employee,
}

/// Login handler
///
/// Verifies email/password against the employee table and returns a JWT.
/// Failures use one unified message so the caller cannot probe which
/// part was wrong.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.find_by_email(&req.email).await?;

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let employee = match employee {
        Some(e) => {
            if !e.active {
                return Err(AppError::forbidden("Account has been disabled"));
            }

            let password_valid = e
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            e
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = employee
        .id
        .as_ref()
        .map(|t| t.to_string())
        .ok_or_else(|| AppError::internal("Employee record has no id"))?;

    let token = state
        .jwt_service()
        .generate_token(&user_id, &employee.username, employee.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(email = %employee.email, role = %employee.role, "Login succeeded");

    Ok(Json(LoginResponse { token, employee }))
}

/// Current profile handler
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<Employee>, AppError> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", user.id)))?;
    Ok(Json(employee))
}
