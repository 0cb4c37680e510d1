//! User endpoints under `/api/v1/users`, all behind the auth gateway.

use crate::error::Result;
use crate::services::UserService;
use actix_middleware::AuthPrincipal;
use actix_web::{web, HttpResponse};
use chrono::SecondsFormat;
use principal_store::{PageRequest, Principal};
use serde::{Deserialize, Serialize};

/// Wire form of a principal record; the password hash stays in the store.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Principal> for UserResponse {
    fn from(p: Principal) -> Self {
        Self {
            id: p.id,
            email: p.email,
            name: p.name,
            created_at: p.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: p.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub page_size: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    users: web::Data<UserService>,
    path: web::Path<String>,
    _principal: AuthPrincipal,
) -> Result<HttpResponse> {
    let user = users.get(&path).await?;
    Ok(HttpResponse::Ok().json(UserEnvelope { user: user.into() }))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    users: web::Data<UserService>,
    path: web::Path<String>,
    principal: AuthPrincipal,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    let user = users
        .update(&principal, &path, &body.name, &body.email)
        .await?;
    Ok(HttpResponse::Ok().json(UserEnvelope { user: user.into() }))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    users: web::Data<UserService>,
    path: web::Path<String>,
    principal: AuthPrincipal,
) -> Result<HttpResponse> {
    users.delete(&principal, &path).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

/// GET /api/v1/users?page=&page_size=
///
/// Out-of-range paging is normalised rather than rejected.
pub async fn list_users(
    users: web::Data<UserService>,
    query: web::Query<ListQuery>,
    _principal: AuthPrincipal,
) -> Result<HttpResponse> {
    let request = PageRequest::new(query.page, query.page_size);
    let page = users.list(request).await?;

    Ok(HttpResponse::Ok().json(ListUsersResponse {
        users: page.items.into_iter().map(UserResponse::from).collect(),
        total: page.total,
        page: request.page(),
        page_size: request.page_size(),
    }))
}
