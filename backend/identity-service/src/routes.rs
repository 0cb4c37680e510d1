use crate::error::IdentityError;
use crate::handlers::{auth, health};
use actix_web::{error::JsonPayloadError, web, HttpRequest};

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    IdentityError::InvalidArgument(format!("invalid request body: {err}")).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/health", web::get().to(health::health))
        .service(
            web::scope("/api/v1/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .route("/validate", web::post().to(auth::validate)),
        );
}
