use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::CategoryDto;
use crate::repository::DieselRepository;
use crate::routes::run_service;
use crate::services::categories;

#[get("/categories")]
pub async fn list_categories(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match run_service(&req, move || categories::find_all(repo.get_ref())).await {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(response) => response,
    }
}

#[get("/categories/{id}")]
pub async fn show_category(
    req: HttpRequest,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = path.into_inner();

    match run_service(&req, move || categories::find_by_id(repo.get_ref(), id)).await {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(response) => response,
    }
}

#[post("/categories")]
pub async fn add_category(
    req: HttpRequest,
    body: web::Json<CategoryDto>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let dto = body.into_inner();

    match run_service(&req, move || categories::insert(repo.get_ref(), dto)).await {
        Ok(category) => {
            let mut response = HttpResponse::Created();
            if let Some(id) = category.id {
                response.insert_header((header::LOCATION, format!("/categories/{id}")));
            }
            response.json(category)
        }
        Err(response) => response,
    }
}

#[put("/categories/{id}")]
pub async fn edit_category(
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<CategoryDto>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = path.into_inner();
    let dto = body.into_inner();

    match run_service(&req, move || categories::update(repo.get_ref(), id, dto)).await {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(response) => response,
    }
}

#[delete("/categories/{id}")]
pub async fn delete_category(
    req: HttpRequest,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = path.into_inner();

    match run_service(&req, move || categories::delete(repo.get_ref(), id)).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(response) => response,
    }
}
