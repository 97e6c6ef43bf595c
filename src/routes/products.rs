use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};
use serde::Deserialize;

use crate::dto::ProductDto;
use crate::pagination::{DEFAULT_ORDER_BY, DEFAULT_PAGE_SIZE, Direction, PageRequest};
use crate::repository::DieselRepository;
use crate::routes::run_service;
use crate::services::products;

/// Query string accepted by the paged product listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: usize,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default = "default_order_by")]
    pub order_by: String,
}

fn default_lines_per_page() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_order_by() -> String {
    DEFAULT_ORDER_BY.to_string()
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        PageRequest::of(params.page, params.lines_per_page)
            .sorted(params.order_by, params.direction)
    }
}

#[get("/products")]
pub async fn list_products(
    req: HttpRequest,
    params: web::Query<PageParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let request: PageRequest = params.into_inner().into();

    match run_service(&req, move || products::find_all_paged(repo.get_ref(), request)).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(response) => response,
    }
}

#[get("/products/{id}")]
pub async fn show_product(
    req: HttpRequest,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = path.into_inner();

    match run_service(&req, move || products::find_by_id(repo.get_ref(), id)).await {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(response) => response,
    }
}

#[post("/products")]
pub async fn add_product(
    req: HttpRequest,
    body: web::Json<ProductDto>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let dto = body.into_inner();

    match run_service(&req, move || products::insert(repo.get_ref(), dto)).await {
        Ok(product) => {
            let mut response = HttpResponse::Created();
            if let Some(id) = product.id {
                response.insert_header((header::LOCATION, format!("/products/{id}")));
            }
            response.json(product)
        }
        Err(response) => response,
    }
}

#[put("/products/{id}")]
pub async fn edit_product(
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<ProductDto>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = path.into_inner();
    let dto = body.into_inner();

    match run_service(&req, move || products::update(repo.get_ref(), id, dto)).await {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(response) => response,
    }
}

#[delete("/products/{id}")]
pub async fn delete_product(
    req: HttpRequest,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = path.into_inner();

    match run_service(&req, move || products::delete(repo.get_ref(), id)).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(response) => response,
    }
}
