pub mod health;
pub mod redirect;
pub mod shorten;

use actix_web::web;

pub use health::{HealthService, health_resource};
pub use redirect::{RedirectService, redirect_resource};
pub use shorten::{ShortenRequest, ShortenResponse, ShortenService, shorten_resource};

/// Register every route. `/healthz` goes before `/{code}`, which would
/// otherwise swallow it.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_resource())
        .service(shorten_resource())
        .service(redirect_resource());
}
