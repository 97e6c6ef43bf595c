use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub image_url: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

/// `image_url` is always written (an inner `None` stores NULL); `created_at`
/// is skipped when absent.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::product)]
pub struct UpdateProduct<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub image_url: Option<Option<&'a str>>,
    pub created_at: Option<NaiveDateTime>,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
            img_url: value.image_url,
            date: value.created_at,
            categories: Vec::new(),
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_str(),
            price: value.price,
            image_url: value.img_url.as_deref(),
            created_at: value.date,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_str(),
            price: value.price,
            image_url: Some(value.img_url.as_deref()),
            created_at: value.date,
        }
    }
}
