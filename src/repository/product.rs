use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    domain::category::Category as DomainCategory,
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery, ProductSort,
        UpdateProduct as DomainUpdateProduct,
    },
    models::category::Category as DbCategory,
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    models::product_category::NewProductCategory,
    pagination::Direction,
    repository::{DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::product;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let found = product::table
                .find(id)
                .first::<DbProduct>(conn)
                .optional()?;

            match found {
                Some(db_product) => {
                    let mut domain: DomainProduct = db_product.into();
                    let mut categories = load_categories_for_products(conn, &[domain.id])?;
                    domain.categories = categories.remove(&domain.id).unwrap_or_default();
                    Ok(Some(domain))
                }
                None => Ok(None),
            }
        })
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::product;

        let mut conn = self.conn()?;

        // Count, page and categories share one read transaction so the total
        // always describes the rows that were returned.
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let total = product::table.count().get_result::<i64>(conn)? as usize;

            let mut items = product::table.into_boxed::<Sqlite>();

            items = match (query.sort, query.direction) {
                (ProductSort::Id, Direction::Asc) => items.order(product::id.asc()),
                (ProductSort::Id, Direction::Desc) => items.order(product::id.desc()),
                (ProductSort::Name, Direction::Asc) => items.order(product::name.asc()),
                (ProductSort::Name, Direction::Desc) => items.order(product::name.desc()),
                (ProductSort::Price, Direction::Asc) => items.order(product::price.asc()),
                (ProductSort::Price, Direction::Desc) => items.order(product::price.desc()),
                (ProductSort::Date, Direction::Asc) => items.order(product::created_at.asc()),
                (ProductSort::Date, Direction::Desc) => items.order(product::created_at.desc()),
            };
            items = items.then_order_by(product::id.asc());

            if let Some(pagination) = &query.pagination {
                // A window SQLite cannot address lies past every row.
                let (Some(offset), Some(limit)) = (pagination.offset(), pagination.limit()) else {
                    return Ok((total, Vec::new()));
                };
                items = items.offset(offset).limit(limit);
            }

            let db_products = items.load::<DbProduct>(conn)?;

            if db_products.is_empty() {
                return Ok((total, Vec::new()));
            }

            let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
            let mut category_map = load_categories_for_products(conn, &product_ids)?;

            let mut domain_products = Vec::with_capacity(db_products.len());
            for db_product in db_products {
                let mut domain: DomainProduct = db_product.into();
                domain.categories = category_map.remove(&domain.id).unwrap_or_default();
                domain_products.push(domain);
            }

            Ok((total, domain_products))
        })
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::product;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_new = DbNewProduct::from(new_product);

            let created = diesel::insert_into(product::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            link_categories(conn, created.id, &new_product.category_ids)?;

            let mut domain: DomainProduct = created.into();
            let mut categories = load_categories_for_products(conn, &[domain.id])?;
            domain.categories = categories.remove(&domain.id).unwrap_or_default();

            Ok(domain)
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product, product_category};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateProduct::from(updates);

            // No existence check up front: an unknown id surfaces as
            // `NotFound` from the update itself.
            let updated = diesel::update(product::table.find(product_id))
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;

            diesel::delete(
                product_category::table.filter(product_category::product_id.eq(product_id)),
            )
            .execute(conn)?;
            link_categories(conn, product_id, &updates.category_ids)?;

            let mut domain: DomainProduct = updated.into();
            let mut categories = load_categories_for_products(conn, &[domain.id])?;
            domain.categories = categories.remove(&domain.id).unwrap_or_default();

            Ok(domain)
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::product;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(product::table.find(product_id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn link_categories(
    conn: &mut SqliteConnection,
    product_id: i32,
    category_ids: &[i32],
) -> RepositoryResult<()> {
    use crate::schema::product_category;

    if category_ids.is_empty() {
        return Ok(());
    }

    let rows = NewProductCategory::for_product(product_id, category_ids);
    diesel::insert_into(product_category::table)
        .values(&rows)
        .execute(conn)?;

    Ok(())
}

fn load_categories_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainCategory>>> {
    use crate::schema::{category, product_category};

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_category::table
        .inner_join(category::table)
        .filter(product_category::product_id.eq_any(product_ids))
        .order((product_category::product_id.asc(), category::id.asc()))
        .select((product_category::product_id, category::all_columns))
        .load::<(i32, DbCategory)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainCategory>> = HashMap::new();
    for (product_id, db_category) in rows {
        map.entry(product_id).or_default().push(db_category.into());
    }

    Ok(map)
}
