use diesel::prelude::*;

/// Join row linking a product to one of its categories.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::product_category)]
pub struct NewProductCategory {
    pub product_id: i32,
    pub category_id: i32,
}

impl NewProductCategory {
    /// Build one association row per category for `product_id`.
    pub fn for_product(product_id: i32, category_ids: &[i32]) -> Vec<Self> {
        category_ids
            .iter()
            .map(|&category_id| Self {
                product_id,
                category_id,
            })
            .collect()
    }
}
