use std::sync::Arc;

use actix_web::{HttpResponse, Responder, ResponseError, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::errors::TinylinkError;
use crate::services::LinkService;

/// Body returned for any create request without a usable `url`
pub const MISSING_URL_MESSAGE: &str = "Bad request: body does not contain url";

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_url_code: String,
    pub url: String,
}

pub struct ShortenService;

impl ShortenService {
    /// `POST /`
    ///
    /// The body is decoded by hand so a missing `Content-Type` still works
    /// and every failure path returns before anything is generated or stored.
    pub async fn create(body: web::Bytes, links: web::Data<Arc<LinkService>>) -> impl Responder {
        if body.is_empty() {
            debug!("Create request with empty body");
            return TinylinkError::validation(MISSING_URL_MESSAGE).error_response();
        }

        let request: ShortenRequest = match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                debug!("Create request body rejected: {}", e);
                return TinylinkError::validation(MISSING_URL_MESSAGE).error_response();
            }
        };

        match links.create(&request.url).await {
            Ok(link) => HttpResponse::Ok().json(ShortenResponse {
                short_url_code: link.code,
                url: link.target,
            }),
            Err(e) => {
                if e.is_internal() {
                    error!("Failed to create short link: {}", e);
                } else {
                    debug!("Create request rejected: {}", e);
                }
                e.error_response()
            }
        }
    }
}

/// `/` only answers POST, so `GET /` never reaches the redirect handler
pub fn shorten_resource() -> actix_web::Resource {
    web::resource("/").route(web::post().to(ShortenService::create))
}
