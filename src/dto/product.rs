use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::dto::{
    CategoryDto, DtoError, DtoResult, sanitize_inline_text, sanitize_multiline_text,
};

/// Allowed length of a product name, in characters, after sanitizing.
const NAME_MIN_LEN: u64 = 5;
const NAME_MAX_LEN: u64 = 60;

/// Read/write projection of a product and its categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    /// Mirrored identity; ignored on input, the store assigns ids.
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(
        min = NAME_MIN_LEN,
        max = NAME_MAX_LEN,
        message = "must be between 5 and 60 characters"
    ))]
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1, message = "is required"))]
    #[serde(default)]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "must be a positive value"))]
    #[serde(default)]
    pub price: f64,
    #[validate(url(message = "must be a valid URL"))]
    #[serde(default)]
    pub img_url: Option<String>,
    /// Creation timestamp. Defaults to now on insert and is kept on update
    /// when absent.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
}

/// Validated and sanitized DTO fields shared by insert and update.
struct ProductFields {
    name: String,
    description: String,
    price: f64,
    img_url: Option<String>,
    date: Option<DateTime<Utc>>,
    category_ids: Vec<i32>,
}

impl ProductDto {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> DtoResult<NewProduct> {
        let fields = self.into_fields()?;
        let date = fields.date.unwrap_or_else(Utc::now).naive_utc();

        let mut new_product = NewProduct::new(fields.name, fields.description, fields.price, date)
            .with_category_ids(fields.category_ids);
        if let Some(img_url) = fields.img_url {
            new_product = new_product.with_img_url(img_url);
        }

        Ok(new_product)
    }

    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> DtoResult<UpdateProduct> {
        let fields = self.into_fields()?;

        let mut update = UpdateProduct::new(fields.name, fields.description, fields.price)
            .img_url(fields.img_url)
            .category_ids(fields.category_ids);
        if let Some(date) = fields.date {
            update = update.date(date.naive_utc());
        }

        Ok(update)
    }

    fn into_fields(self) -> DtoResult<ProductFields> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(DtoError::Invalid {
                field: "name",
                message: "must not be blank".to_string(),
            });
        }

        let name_len = name.chars().count() as u64;
        if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&name_len) {
            return Err(DtoError::Invalid {
                field: "name",
                message: "must be between 5 and 60 characters".to_string(),
            });
        }

        let description = sanitize_multiline_text(&self.description);
        if description.is_empty() {
            return Err(DtoError::Invalid {
                field: "description",
                message: "must not be blank".to_string(),
            });
        }

        if self.date.is_some_and(|date| date > Utc::now()) {
            return Err(DtoError::Invalid {
                field: "date",
                message: "must not be in the future".to_string(),
            });
        }

        let img_url = self
            .img_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let category_ids = self
            .categories
            .iter()
            .map(|category| category.id)
            .collect::<Option<Vec<i32>>>()
            .ok_or_else(|| DtoError::Invalid {
                field: "categories",
                message: "every category must carry an id".to_string(),
            })?;

        Ok(ProductFields {
            name,
            description,
            price: self.price,
            img_url,
            date: self.date,
            category_ids,
        })
    }
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        Self {
            id: Some(value.id),
            name: value.name,
            description: value.description,
            price: value.price,
            img_url: value.img_url,
            date: Some(value.date.and_utc()),
            categories: value.categories.into_iter().map(CategoryDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use crate::domain::category::Category;
    use crate::dto::FieldMessage;

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 10, 20)
            .and_then(|date| date.and_hms_opt(3, 0, 0))
            .unwrap_or_default()
    }

    fn sample_dto() -> ProductDto {
        ProductDto {
            id: None,
            name: "Phone X".to_string(),
            description: "Good phone".to_string(),
            price: 800.0,
            img_url: Some("https://img.com/img.png".to_string()),
            date: Some(datetime().and_utc()),
            categories: vec![CategoryDto::new(1, "Electronics")],
        }
    }

    #[test]
    fn into_new_product_copies_every_field() {
        let new_product = sample_dto().into_new_product().expect("valid dto");

        assert_eq!(new_product.name, "Phone X");
        assert_eq!(new_product.description, "Good phone");
        assert_eq!(new_product.price, 800.0);
        assert_eq!(new_product.img_url.as_deref(), Some("https://img.com/img.png"));
        assert_eq!(new_product.date, datetime());
        assert_eq!(new_product.category_ids, vec![1]);
    }

    #[test]
    fn into_update_product_keeps_date_when_absent() {
        let mut dto = sample_dto();
        dto.date = None;
        dto.img_url = Some("   ".to_string());

        let update = dto.into_update_product().expect("valid dto");

        assert_eq!(update.date, None);
        assert_eq!(update.img_url, None);
    }

    #[test]
    fn invalid_fields_are_reported_per_field() {
        let dto = ProductDto {
            id: None,
            name: "TV".to_string(),
            description: String::new(),
            price: -1.0,
            img_url: None,
            date: None,
            categories: Vec::new(),
        };

        let err = dto.into_new_product().expect_err("invalid dto");
        let fields: Vec<String> = err
            .field_messages()
            .into_iter()
            .map(|message| message.field_name)
            .collect();

        assert_eq!(fields, vec!["description", "name", "price"]);
    }

    #[test]
    fn padded_short_name_is_rejected_after_sanitizing() {
        let mut dto = sample_dto();
        dto.name = "  TV   ".to_string();

        let err = dto.into_new_product().expect_err("two-character name");

        assert_eq!(
            err.field_messages(),
            vec![FieldMessage::new("name", "must be between 5 and 60 characters")]
        );
    }

    #[test]
    fn future_date_is_rejected() {
        let mut dto = sample_dto();
        dto.date = Some(Utc::now() + Duration::days(2));

        let err = dto.into_new_product().expect_err("future date");

        assert!(matches!(err, DtoError::Invalid { field: "date", .. }));
    }

    #[test]
    fn category_without_id_is_rejected() {
        let mut dto = sample_dto();
        dto.categories.push(CategoryDto {
            id: None,
            name: "Books".to_string(),
        });

        let err = dto.into_new_product().expect_err("category without id");

        assert!(matches!(err, DtoError::Invalid { field: "categories", .. }));
    }

    #[test]
    fn dto_from_product_carries_categories() {
        let product = Product {
            id: 7,
            name: "Phone X".to_string(),
            description: "Good phone".to_string(),
            price: 800.0,
            img_url: None,
            date: datetime(),
            categories: vec![Category {
                id: 1,
                name: "Electronics".to_string(),
                created_at: datetime(),
                updated_at: None,
            }],
        };

        let dto = ProductDto::from(product);

        assert_eq!(dto.id, Some(7));
        assert_eq!(dto.categories, vec![CategoryDto::new(1, "Electronics")]);
        assert_eq!(dto.date, Some(datetime().and_utc()));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample_dto()).expect("serialization");

        assert_eq!(value["imgUrl"], "https://img.com/img.png");
        assert!(value.get("img_url").is_none());
    }
}
