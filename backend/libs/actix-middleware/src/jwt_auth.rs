use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header, StatusCode},
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use jwt_validation::{TokenValidator, Validator};
use serde::Serialize;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Identity attached to a request by [`AuthGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPrincipal {
    /// Principal id taken from a validated token
    User(String),
    /// Substitute-mode bypass. Token validation never yields this variant.
    Bypass,
}

impl AuthPrincipal {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            AuthPrincipal::User(id) => Some(id),
            AuthPrincipal::Bypass => None,
        }
    }

    pub fn is_bypass(&self) -> bool {
        matches!(self, AuthPrincipal::Bypass)
    }
}

impl fmt::Display for AuthPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthPrincipal::User(id) => f.write_str(id),
            AuthPrincipal::Bypass => f.write_str("<bypass>"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Unauthenticated(&'static str),

    /// The validator could not reach a verdict
    #[error("failed to validate token")]
    Internal,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            GatewayError::Unauthenticated(_) => "UNAUTHENTICATED",
            GatewayError::Internal => "INTERNAL",
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error,
            message: self.to_string(),
        })
    }
}

/// `Bearer <token>` from the Authorization header.
///
/// Absent, non-ASCII, wrong scheme, or empty token all yield `None`.
pub fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Resolve the caller from request headers using `validator`.
pub async fn authenticate(
    validator: &Validator,
    req: &ServiceRequest,
) -> Result<AuthPrincipal, GatewayError> {
    let token = bearer_token(req).ok_or(GatewayError::Unauthenticated(
        "missing authorization token",
    ))?;

    match validator.validate(token).await {
        Ok(outcome) => outcome
            .principal()
            .map(|id| AuthPrincipal::User(id.to_owned()))
            .ok_or(GatewayError::Unauthenticated("invalid token")),
        Err(e) => {
            tracing::error!(error = %e, path = %req.path(), "token validation failed");
            Err(GatewayError::Internal)
        }
    }
}

#[derive(Clone)]
enum GatewayMode {
    Enforce(Arc<Validator>),
    Bypass,
}

/// Authentication gateway middleware.
///
/// In enforce mode every request must carry a bearer token the validator
/// accepts. Otherwise the request is answered with 401, or 500 when the
/// validator fails. Bypass mode skips validation and marks every request
/// with [`AuthPrincipal::Bypass`].
#[derive(Clone)]
pub struct AuthGateway {
    mode: GatewayMode,
}

impl AuthGateway {
    pub fn enforce(validator: Arc<Validator>) -> Self {
        Self {
            mode: GatewayMode::Enforce(validator),
        }
    }

    pub fn bypass() -> Self {
        Self {
            mode: GatewayMode::Bypass,
        }
    }

    pub fn is_bypass(&self) -> bool {
        matches!(self.mode, GatewayMode::Bypass)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGateway
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGatewayService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGatewayService {
            service: Rc::new(service),
            mode: self.mode.clone(),
        }))
    }
}

pub struct AuthGatewayService<S> {
    service: Rc<S>,
    mode: GatewayMode,
}

impl<S, B> Service<ServiceRequest> for AuthGatewayService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();

        Box::pin(async move {
            let principal = match mode {
                GatewayMode::Bypass => AuthPrincipal::Bypass,
                GatewayMode::Enforce(validator) => match authenticate(&validator, &req).await {
                    Ok(principal) => principal,
                    Err(err) => {
                        tracing::debug!(path = %req.path(), reason = %err, "request rejected");
                        return Ok(req.error_response(err).map_into_right_body());
                    }
                },
            };

            req.extensions_mut().insert(principal);
            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

impl FromRequest for AuthPrincipal {
    type Error = GatewayError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthPrincipal>()
                .cloned()
                .ok_or(GatewayError::Unauthenticated("user not authenticated")),
        )
    }
}
