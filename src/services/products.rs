use crate::domain::product::{ProductListQuery, ProductPage, ProductSort};
use crate::dto::ProductDto;
use crate::pagination::{Page, PageRequest};
use crate::repository::{ProductReader, ProductWriter, RepositoryError};
use crate::services::{ServiceError, ServiceResult};

/// Loads one page of products sorted as requested.
pub fn find_all_paged<R>(repo: &R, request: PageRequest) -> ServiceResult<Page<ProductDto>>
where
    R: ProductReader + ?Sized,
{
    if request.size == 0 {
        return Err(ServiceError::validation(
            "linesPerPage",
            "must be greater than zero",
        ));
    }

    let window = ProductPage {
        page: request.page,
        size: request.size,
    };
    if window.limit().is_none() {
        return Err(ServiceError::validation("linesPerPage", "is too large"));
    }
    if window.offset().is_none() {
        return Err(ServiceError::validation("page", "is too large"));
    }

    let sort = request
        .order_by
        .parse::<ProductSort>()
        .map_err(|message| ServiceError::validation("orderBy", message))?;

    let query = ProductListQuery::new()
        .sort_by(sort, request.direction)
        .paginate(request.page, request.size);

    let (total, products) = repo.list_products(query).map_err(ServiceError::from)?;

    Ok(Page::new(products, &request, total).map(ProductDto::from))
}

/// Loads a single product with its categories.
pub fn find_by_id<R>(repo: &R, id: i32) -> ServiceResult<ProductDto>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(id)
        .map_err(ServiceError::from)?
        .map(ProductDto::from)
        .ok_or_else(|| ServiceError::not_found(format!("Entity not found: product {id}")))
}

/// Validates and stores a new product.
pub fn insert<R>(repo: &R, dto: ProductDto) -> ServiceResult<ProductDto>
where
    R: ProductWriter + ?Sized,
{
    let new_product = dto.into_new_product()?;

    let created = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;

    log::info!("Created product {} ({})", created.id, created.name);

    Ok(created.into())
}

/// Overwrites product `id` with the DTO contents.
pub fn update<R>(repo: &R, id: i32, dto: ProductDto) -> ServiceResult<ProductDto>
where
    R: ProductWriter + ?Sized,
{
    let updates = dto.into_update_product()?;

    match repo.update_product(id, &updates) {
        Ok(updated) => {
            log::debug!("Updated product {id}");
            Ok(updated.into())
        }
        Err(RepositoryError::NotFound) => {
            Err(ServiceError::not_found(format!("Id not found {id}")))
        }
        Err(err) => Err(err.into()),
    }
}

/// Removes product `id`.
pub fn delete<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    match repo.delete_product(id) {
        Ok(()) => {
            log::info!("Deleted product {id}");
            Ok(())
        }
        Err(RepositoryError::NotFound) => {
            Err(ServiceError::not_found(format!("Id not found {id}")))
        }
        Err(RepositoryError::IntegrityViolation(_)) => Err(
            ServiceError::DatabaseIntegrityViolation("Integrity violation".to_string()),
        ),
        Err(err) => Err(err.into()),
    }
}
