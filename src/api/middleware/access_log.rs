//! Access log middleware
//!
//! One `info` line per finished request with status and latency. Runs inside
//! the request span, so the request id is attached to every line.

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Clone, Default)]
pub struct AccessLogMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AccessLogMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLogService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogService {
            service: Rc::new(service),
        }))
    }
}

pub struct AccessLogService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AccessLogService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let started = Instant::now();

        Box::pin(async move {
            let result = srv.call(req).await;
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

            match &result {
                Ok(response) if response.status().is_server_error() => warn!(
                    status = response.status().as_u16(),
                    elapsed_ms, "request failed"
                ),
                Ok(response) => info!(
                    status = response.status().as_u16(),
                    elapsed_ms, "request completed"
                ),
                Err(e) => warn!(error = %e, elapsed_ms, "request errored"),
            }

            result
        })
    }
}
