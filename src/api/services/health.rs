use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

pub const HEALTH_BODY: &str = "healthy and running";

pub struct HealthService;

impl HealthService {
    // 静态响应，不访问存储
    pub async fn health_check() -> impl Responder {
        trace!("Received health check request");
        HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(HEALTH_BODY)
    }
}

pub fn health_resource() -> actix_web::Resource {
    web::resource("/healthz")
        .route(web::get().to(HealthService::health_check))
        .route(web::head().to(HealthService::health_check))
}
