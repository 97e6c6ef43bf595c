pub mod category;
pub mod product;
pub mod product_category;
pub mod role;
pub mod user;
