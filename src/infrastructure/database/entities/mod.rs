//! Database entities module

pub mod category;
pub mod category_product;
pub mod highlighted_category;
pub mod product;

pub use category::Entity as Category;
pub use category_product::Entity as CategoryProduct;
pub use highlighted_category::Entity as HighlightedCategory;
pub use product::Entity as Product;
