use crate::error::AppError;
use crate::handlers::{health, users};
use actix_middleware::AuthGateway;
use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, HttpRequest,
};

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidArgument(format!("invalid request body: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidArgument(format!("invalid query: {err}")).into()
}

/// `/health` stays outside the gateway; everything under `/api/v1/users`
/// goes through it.
pub fn configure(cfg: &mut web::ServiceConfig, gateway: AuthGateway) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/health", web::get().to(health::health))
        .service(
            web::scope("/api/v1/users")
                .wrap(gateway)
                .route("", web::get().to(users::list_users))
                .route("/{id}", web::get().to(users::get_user))
                .route("/{id}", web::put().to(users::update_user))
                .route("/{id}", web::delete().to(users::delete_user)),
        );
}
