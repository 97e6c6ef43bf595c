use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::pagination::Direction;

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Longer description shown to users.
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Optional location of the product picture.
    pub img_url: Option<String>,
    /// Timestamp for when the product was created.
    pub date: NaiveDateTime,
    /// Categories the product belongs to, ordered by category id.
    pub categories: Vec<Category>,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub img_url: Option<String>,
    pub date: NaiveDateTime,
    /// Unique identifiers of the categories to associate.
    pub category_ids: Vec<i32>,
}

impl NewProduct {
    /// Build a new product payload with no image and no categories.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            img_url: None,
            date,
            category_ids: Vec::new(),
        }
    }

    /// Attach a picture URL to the product payload.
    pub fn with_img_url(mut self, img_url: impl Into<String>) -> Self {
        self.img_url = Some(img_url.into());
        self
    }

    /// Associate the product with the given categories; duplicates are dropped.
    pub fn with_category_ids(mut self, category_ids: impl IntoIterator<Item = i32>) -> Self {
        self.category_ids = unique_ids(category_ids);
        self
    }
}

/// Full replacement applied when updating an existing product.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    /// New picture URL; `None` clears it.
    pub img_url: Option<String>,
    /// New creation date; `None` keeps the stored one.
    pub date: Option<NaiveDateTime>,
    /// Categories replacing the current associations.
    pub category_ids: Vec<i32>,
}

impl UpdateProduct {
    /// Create a replacement payload with no image, kept date and no categories.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            img_url: None,
            date: None,
            category_ids: Vec::new(),
        }
    }

    /// Set the picture URL, using `None` to clear an existing value.
    pub fn img_url(mut self, img_url: Option<impl Into<String>>) -> Self {
        self.img_url = img_url.map(|value| value.into());
        self
    }

    /// Overwrite the stored creation date.
    pub fn date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Replace the category associations; duplicates are dropped.
    pub fn category_ids(mut self, category_ids: impl IntoIterator<Item = i32>) -> Self {
        self.category_ids = unique_ids(category_ids);
        self
    }
}

/// Product property a page of products can be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    Id,
    #[default]
    Name,
    Price,
    Date,
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProductSort::Id => "id",
            ProductSort::Name => "name",
            ProductSort::Price => "price",
            ProductSort::Date => "date",
        };
        f.write_str(name)
    }
}

impl FromStr for ProductSort {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "id" => Ok(ProductSort::Id),
            "name" => Ok(ProductSort::Name),
            "price" => Ok(ProductSort::Price),
            "date" | "createdAt" => Ok(ProductSort::Date),
            other => Err(format!("unknown sort property `{other}`")),
        }
    }
}

/// Zero-based page window applied to a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductPage {
    pub page: usize,
    pub size: usize,
}

impl ProductPage {
    /// Row limit for the SQL query, or `None` when `size` does not fit in `i64`.
    pub fn limit(&self) -> Option<i64> {
        i64::try_from(self.size).ok()
    }

    /// Rows skipped before the page, or `None` when the offset does not fit in `i64`.
    pub fn offset(&self) -> Option<i64> {
        self.page
            .checked_mul(self.size)
            .and_then(|offset| i64::try_from(offset).ok())
    }
}

/// Query definition used to list products.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListQuery {
    /// Property the results are sorted by; ties fall back to the id.
    pub sort: ProductSort,
    /// Direction applied to `sort`.
    pub direction: Direction,
    /// Optional page window; `None` returns every product.
    pub pagination: Option<ProductPage>,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductListQuery {
    /// Construct a query over all products sorted by name.
    pub fn new() -> Self {
        Self {
            sort: ProductSort::default(),
            direction: Direction::Asc,
            pagination: None,
        }
    }

    /// Sort the results by `sort` in the given direction.
    pub fn sort_by(mut self, sort: ProductSort, direction: Direction) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    /// Apply pagination with a zero-based page number and page size.
    pub fn paginate(mut self, page: usize, size: usize) -> Self {
        self.pagination = Some(ProductPage { page, size });
        self
    }
}

fn unique_ids(ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    ids.into_iter()
        .collect::<BTreeSet<i32>>()
        .into_iter()
        .collect()
}
