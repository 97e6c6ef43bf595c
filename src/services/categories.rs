use crate::dto::CategoryDto;
use crate::repository::{CategoryReader, CategoryWriter, RepositoryError};
use crate::services::{ServiceError, ServiceResult};

/// Lists every category ordered by id.
pub fn find_all<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader + ?Sized,
{
    let categories = repo.list_categories().map_err(ServiceError::from)?;

    Ok(categories.into_iter().map(CategoryDto::from).collect())
}

/// Loads a single category.
pub fn find_by_id<R>(repo: &R, id: i32) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + ?Sized,
{
    repo.get_category_by_id(id)
        .map_err(ServiceError::from)?
        .map(CategoryDto::from)
        .ok_or_else(|| ServiceError::not_found(format!("Entity not found: category {id}")))
}

/// Validates and stores a new category.
pub fn insert<R>(repo: &R, dto: CategoryDto) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = dto.into_new_category()?;

    let created = repo
        .create_category(&new_category)
        .map_err(ServiceError::from)?;

    log::info!("Created category {} ({})", created.id, created.name);

    Ok(created.into())
}

/// Renames category `id`.
pub fn update<R>(repo: &R, id: i32, dto: CategoryDto) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter + ?Sized,
{
    let updates = dto.into_update_category()?;

    match repo.update_category(id, &updates) {
        Ok(updated) => Ok(updated.into()),
        Err(RepositoryError::NotFound) => {
            Err(ServiceError::not_found(format!("Id not found {id}")))
        }
        Err(err) => Err(err.into()),
    }
}

/// Removes category `id` unless a product still references it.
pub fn delete<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    match repo.delete_category(id) {
        Ok(()) => {
            log::info!("Deleted category {id}");
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use mockall::predicate::eq;

    use crate::domain::category::Category;
    use crate::repository::mock::{MockCategoryReader, MockCategoryWriter};

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            created_at: datetime(),
            updated_at: None,
        }
    }

    #[test]
    fn find_all_projects_every_category() {
        let mut repo = MockCategoryReader::new();
        repo.expect_list_categories().times(1).returning(|| {
            Ok(vec![
                sample_category(1, "Books"),
                sample_category(2, "Electronics"),
            ])
        });

        let categories = find_all(&repo).expect("categories");

        assert_eq!(
            categories,
            vec![
                CategoryDto::new(1, "Books"),
                CategoryDto::new(2, "Electronics")
            ]
        );
    }

    #[test]
    fn find_by_id_reports_missing_category() {
        let mut repo = MockCategoryReader::new();
        repo.expect_get_category_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let err = find_by_id(&repo, 42).expect_err("missing category");

        assert!(matches!(err, ServiceError::ResourceNotFound(_)));
    }

    #[test]
    fn insert_stores_sanitized_name() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_create_category()
            .withf(|new_category| new_category.name == "Garden Tools")
            .times(1)
            .returning(|new_category| Ok(sample_category(5, &new_category.name)));

        let dto = insert(
            &repo,
            CategoryDto {
                id: None,
                name: "  Garden   Tools ".to_string(),
            },
        )
        .expect("insert");

        assert_eq!(dto, CategoryDto::new(5, "Garden Tools"));
    }

    #[test]
    fn update_translates_missing_row() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_update_category()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let err = update(&repo, 9, CategoryDto::new(9, "Toys")).expect_err("missing category");

        assert!(matches!(err, ServiceError::ResourceNotFound(_)));
    }

    #[test]
    fn update_stamps_updated_at() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_update_category()
            .withf(|id, updates| *id == 2 && updates.name == "Phones")
            .times(1)
            .returning(|id, updates| {
                let mut category = sample_category(id, &updates.name);
                category.updated_at = Some(updates.updated_at);
                Ok(category)
            });

        let dto = update(&repo, 2, CategoryDto::new(2, "Phones")).expect("update");

        assert_eq!(dto.name, "Phones");
    }

    #[test]
    fn delete_of_referenced_category_is_an_integrity_violation() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_delete_category()
            .with(eq(1))
            .times(1)
            .returning(|_| {
                Err(RepositoryError::IntegrityViolation(
                    "FOREIGN KEY constraint failed".to_string(),
                ))
            });

        let err = delete(&repo, 1).expect_err("referenced category");

        assert!(matches!(err, ServiceError::DatabaseIntegrityViolation(_)));
    }

    #[test]
    fn delete_of_missing_category_is_not_found() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_delete_category()
            .returning(|_| Err(RepositoryError::NotFound));

        let err = delete(&repo, 77).expect_err("missing category");

        assert!(matches!(err, ServiceError::ResourceNotFound(_)));
    }
}
