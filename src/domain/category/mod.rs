//! Category aggregate
//!
//! Contains the Category entity, the highlight attachment, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{Category, CategoryDetail, Highlight, HighlightedCategory, ProductRef};
pub use repository::CategoryRepository;
