//! HTTP REST API interfaces
//!
//! - `hal`: HAL transformers wrapping DTOs with `_links` / `_embedded`
//! - `modules`: request handlers per resource
//! - `middleware`: HAL content type on catalog reads
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod error;
pub mod hal;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiState};
