//! Write API: create and delete short links

use std::sync::Arc;

use actix_web::dev::HttpServiceFactory;
use actix_web::middleware::from_fn;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::api::middleware::ApiKeyAuth;
use crate::errors::TinylinkError;
use crate::services::{CreateLinkRequest, LinkService};

/// `POST /api/shorten` form body. Missing fields read as empty.
#[derive(Debug, Default, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub custom: String,
    #[serde(default)]
    pub expiry: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct ShortenService;

impl ShortenService {
    pub async fn create(
        form: web::Form<ShortenForm>,
        link_service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let form = form.into_inner();
        let req = CreateLinkRequest {
            code: Some(form.custom),
            url: form.url,
            expiry: Some(form.expiry),
        };

        let service = Arc::clone(link_service.get_ref());
        match web::block(move || service.create(req)).await {
            Ok(Ok(code)) => HttpResponse::Created().json(ShortenResponse { short_code: code }),
            Ok(Err(e)) => Self::failure_response(e),
            Err(e) => {
                error!("Blocking create failed: {}", e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }

    pub async fn delete(
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let code = path.into_inner();
        let service = Arc::clone(link_service.get_ref());

        match web::block(move || service.remove(&code)).await {
            Ok(Ok(())) => HttpResponse::NoContent().finish(),
            Ok(Err(e)) => Self::failure_response(e),
            Err(e) => {
                error!("Blocking delete failed: {}", e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }

    /// 根据错误类型映射 HTTP 状态码；内部错误不向客户端暴露细节
    fn failure_response(e: TinylinkError) -> HttpResponse {
        match e {
            TinylinkError::Validation(msg) => {
                debug!("Rejected shorten request: {}", msg);
                HttpResponse::BadRequest().json(ErrorResponse { error: msg })
            }
            TinylinkError::NotFound(_) => HttpResponse::NotFound().finish(),
            other => {
                error!("Link operation failed: {}", other);
                HttpResponse::build(other.status_code()).finish()
            }
        }
    }
}

pub fn shorten_routes() -> impl HttpServiceFactory {
    web::scope("/api")
        .wrap(from_fn(ApiKeyAuth::check))
        .route("/shorten", web::post().to(ShortenService::create))
        .route("/shorten/{code}", web::delete().to(ShortenService::delete))
}
