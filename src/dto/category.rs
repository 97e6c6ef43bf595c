use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::dto::{DtoError, DtoResult, sanitize_inline_text};

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: u64 = 128;

/// Read/write projection of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    /// Mirrored identity; ignored on input.
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(
        min = 1,
        max = NAME_MAX_LEN,
        message = "must be between 1 and 128 characters"
    ))]
    #[serde(default)]
    pub name: String,
}

impl CategoryDto {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> DtoResult<NewCategory> {
        Ok(NewCategory::new(self.sanitized_name()?))
    }

    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> DtoResult<UpdateCategory> {
        Ok(UpdateCategory::new(self.sanitized_name()?))
    }

    fn sanitized_name(&self) -> DtoResult<String> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(DtoError::Invalid {
                field: "name",
                message: "must not be blank".to_string(),
            });
        }

        Ok(name)
    }
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: Some(value.id),
            name: value.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::FieldMessage;

    #[test]
    fn blank_name_is_rejected() {
        let dto = CategoryDto {
            id: None,
            name: "   ".to_string(),
        };

        let err = dto.into_new_category().expect_err("blank name must fail");

        assert_eq!(
            err.field_messages(),
            vec![FieldMessage::new("name", "must not be blank")]
        );
    }

    #[test]
    fn empty_name_fails_length_validation() {
        let dto = CategoryDto {
            id: None,
            name: String::new(),
        };

        let err = dto.into_update_category().expect_err("empty name must fail");
        let messages = err.field_messages();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].field_name, "name");
    }

    #[test]
    fn name_is_sanitized_and_id_ignored() {
        let dto = CategoryDto {
            id: Some(99),
            name: "  Home   Office ".to_string(),
        };

        let new_category = dto.into_new_category().expect("valid category");

        assert_eq!(new_category.name, "Home Office");
    }
}
