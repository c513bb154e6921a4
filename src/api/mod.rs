//! HTTP surface
//!
//! - `GET /{code}`: 307 redirect to the stored target
//! - `POST /api/shorten`: create a link (requires `X-API-KEY`)
//! - `DELETE /api/shorten/{code}`: remove a link (requires `X-API-KEY`)

pub mod middleware;
pub mod services;

use std::sync::Arc;

use actix_web::web;

use crate::services::LinkService;
use middleware::ApiKey;

/// Register app data and routes. Shared by the server and the tests.
pub fn configure(link_service: Arc<LinkService>, api_key: ApiKey) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(link_service))
            .app_data(web::Data::new(api_key))
            .service(services::shorten_routes())
            .service(services::redirect_routes());
    }
}
