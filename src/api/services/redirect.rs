use std::sync::Arc;

use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{error, trace};

use crate::errors::TinylinkError;
use crate::services::LinkService;

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let code = path.into_inner();
        let service = Arc::clone(link_service.get_ref());
        let lookup = code.clone();

        // 存储调用是阻塞的，放到 actix 的 blocking 线程池执行
        match web::block(move || service.resolve(&lookup)).await {
            Ok(Ok(target)) => match HeaderValue::try_from(target.as_str()) {
                Ok(location) => {
                    trace!("Redirecting '{}' -> '{}'", code, target);
                    HttpResponse::TemporaryRedirect()
                        .insert_header((header::LOCATION, location))
                        .finish()
                }
                Err(e) => {
                    error!(
                        "Target of '{}' is not a valid Location header ({}): {:?}",
                        code, e, target
                    );
                    Self::error_response()
                }
            },
            Ok(Err(TinylinkError::NotFound(_))) => Self::not_found_response(),
            Ok(Err(e)) => {
                error!("Store error during redirect lookup for '{}': {}", code, e);
                Self::error_response()
            }
            Err(e) => {
                error!("Blocking redirect lookup failed for '{}': {}", code, e);
                Self::error_response()
            }
        }
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Not Found")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Internal Server Error")
    }
}

pub fn redirect_routes() -> actix_web::Scope {
    web::scope("")
        .route("/{code}", web::get().to(RedirectService::handle_redirect))
        .route("/{code}", web::head().to(RedirectService::handle_redirect))
}
