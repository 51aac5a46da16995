//! Use cases: service calls mapped to DTOs
//!
//! HTTP handlers talk to these and never see domain values.

mod category_usecase;
mod product_usecase;

pub use category_usecase::CategoryUseCase;
pub use product_usecase::ProductUseCase;

use uuid::Uuid;

/// A resource id from a request path: a uuid, or else a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceId {
    Uuid(Uuid),
    Slug(String),
}

impl ResourceId {
    pub fn parse(raw: &str) -> Self {
        match Uuid::parse_str(raw) {
            Ok(uuid) => Self::Uuid(uuid),
            Err(_) => Self::Slug(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuids_win_over_slugs() {
        let uuid = Uuid::new_v4();
        assert_eq!(ResourceId::parse(&uuid.to_string()), ResourceId::Uuid(uuid));
        assert_eq!(
            ResourceId::parse("winter-sale"),
            ResourceId::Slug("winter-sale".into())
        );
    }
}
