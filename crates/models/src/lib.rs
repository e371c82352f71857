pub mod category;
pub mod db;
pub mod product;
