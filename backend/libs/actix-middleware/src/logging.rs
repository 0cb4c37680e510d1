//! Request logging middleware
//!
//! One structured event per request: method, path, status, latency and, when
//! the gateway ran, the resolved principal. Level follows status class.

use crate::jwt_auth::AuthPrincipal;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::time::Instant;

/// Wrap outermost so the principal inserted by the gateway is visible.
#[derive(Clone, Default)]
pub struct RequestLogging;

impl<S, B> Transform<S, ServiceRequest> for RequestLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggingService { service }))
    }
}

pub struct RequestLoggingService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_string();
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let status = res.status().as_u16();
            let duration_ms = started.elapsed().as_millis() as u64;
            let principal = res
                .request()
                .extensions()
                .get::<AuthPrincipal>()
                .map(ToString::to_string)
                .unwrap_or_default();

            if res.status().is_server_error() {
                tracing::error!(%method, %path, status, duration_ms, %principal, "request failed");
            } else if res.status().is_client_error() {
                tracing::warn!(%method, %path, status, duration_ms, %principal, "request rejected");
            } else {
                tracing::info!(%method, %path, status, duration_ms, %principal, "request completed");
            }

            Ok(res)
        })
    }
}
