//! Issuance endpoints under `/api/v1/auth`

use crate::error::Result;
use crate::services::TokenIssuer;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

// Absent fields deserialize as empty so validation reports them uniformly
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub token: String,
}

/// POST /api/v1/auth/register
pub async fn register(
    issuer: web::Data<TokenIssuer>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let user_id = issuer
        .register(&body.email, &body.password, &body.name)
        .await?;
    Ok(HttpResponse::Created().json(RegisterResponse { user_id }))
}

/// POST /api/v1/auth/login
pub async fn login(
    issuer: web::Data<TokenIssuer>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let issued = issuer.login(&body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        token: issued.token,
        user_id: issued.user_id,
        expires_in: issuer.token_ttl().num_seconds(),
    }))
}

/// POST /api/v1/auth/validate
///
/// Always 200: an unusable token is `{"valid": false, "user_id": ""}`.
pub async fn validate(
    issuer: web::Data<TokenIssuer>,
    body: web::Json<ValidateRequest>,
) -> HttpResponse {
    HttpResponse::Ok().json(issuer.verify_token(&body.token))
}
