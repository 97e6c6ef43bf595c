pub mod category;
pub mod product;
pub mod role;
pub mod user;
