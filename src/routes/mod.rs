use actix_web::{HttpRequest, HttpResponse, web};

use crate::routes::errors::{bad_request_handler, blocking_error_response, service_error_response};
use crate::services::ServiceResult;

pub mod categories;
pub mod errors;
pub mod products;

/// Registers every catalog resource on the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(bad_request_handler))
        .app_data(web::QueryConfig::default().error_handler(bad_request_handler))
        .app_data(web::PathConfig::default().error_handler(bad_request_handler))
        .service(products::list_products)
        .service(products::show_product)
        .service(products::add_product)
        .service(products::edit_product)
        .service(products::delete_product)
        .service(categories::list_categories)
        .service(categories::show_category)
        .service(categories::add_category)
        .service(categories::edit_category)
        .service(categories::delete_category);
}

/// Runs a service call on the blocking thread pool so Diesel work stays off
/// the async workers. Failures come back as ready-made error responses.
pub(crate) async fn run_service<F, T>(req: &HttpRequest, call: F) -> Result<T, HttpResponse>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    match web::block(call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(service_error_response(err, req)),
        Err(err) => Err(blocking_error_response(err, req)),
    }
}
