use juniper::GraphQLObject;
use uuid::Uuid;

use crate::domains::catalog::models::Category;

/// GraphQL type for a category
#[derive(Debug, Clone, GraphQLObject)]
pub struct CategoryData {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<Uuid>,
    pub is_active: bool,
}

impl From<Category> for CategoryData {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into_uuid(),
            name: category.name,
            slug: category.slug,
            parent_id: category.parent_id.map(|id| id.into_uuid()),
            is_active: category.is_active,
        }
    }
}
