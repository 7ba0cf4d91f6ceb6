use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpResponse, Responder, ResponseError, web};
use tracing::{debug, trace};

use crate::errors::TinylinkError;
use crate::services::LinkService;
use crate::utils::is_valid_short_code;

pub struct RedirectService;

impl RedirectService {
    /// `GET|HEAD /{code}`: 301 to the stored target, 400 on any miss
    pub async fn handle_redirect(
        path: web::Path<String>,
        links: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let code = path.into_inner();

        if !is_valid_short_code(&code) {
            // 非法短码，不查存储
            trace!("Invalid short code rejected: {}", code);
            return Self::not_found_response(&code);
        }

        match links.resolve(&code).await {
            Ok(target) => {
                debug!("Redirecting {} to {}", code, target);
                HttpResponse::MovedPermanently()
                    .insert_header((header::LOCATION, target))
                    .finish()
            }
            Err(e) => e.error_response(),
        }
    }

    #[inline]
    fn not_found_response(code: &str) -> HttpResponse {
        TinylinkError::not_found(format!(
            "Bad request: no url found for this shortner {}",
            code
        ))
        .error_response()
    }
}

/// `{code}` only matches a non-empty segment
pub fn redirect_resource() -> actix_web::Resource {
    web::resource("/{code}")
        .route(web::get().to(RedirectService::handle_redirect))
        .route(web::head().to(RedirectService::handle_redirect))
}
