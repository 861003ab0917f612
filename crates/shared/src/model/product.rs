use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::model::Category;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub category_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: i64,
    pub compare_price: i64,
    pub thumbnail: Option<String>,
    pub images: Vec<String>,
    pub status: String,
    pub position: i32,
    pub featured: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Product {
    /// Visible to shoppers: active and not in the trash.
    pub fn is_purchasable(&self) -> bool {
        self.status == "active" && self.deleted_at.is_none()
    }

    /// Storefront visibility given the product's own category row, if any.
    /// A trashed or inactive category hides its products; a `category_id`
    /// whose row is gone hides it too.
    pub fn is_visible_in(&self, category: Option<&Category>) -> bool {
        if !self.is_purchasable() {
            return false;
        }

        match self.category_id {
            None => true,
            Some(id) => category.is_some_and(|c| c.category_id == id && c.is_visible()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trashed_at() -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2025, 3, 1).and_then(|d| d.and_hms_opt(9, 0, 0))
    }

    fn category(id: i32) -> Category {
        Category {
            category_id: id,
            name: "Giày".into(),
            slug: "giay".into(),
            description: None,
            thumbnail: None,
            status: "active".into(),
            position: 0,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    fn product(category_id: Option<i32>) -> Product {
        Product {
            product_id: 1,
            category_id,
            name: "Sneaker".into(),
            slug: "sneaker".into(),
            description: None,
            price: 500_000,
            compare_price: 0,
            thumbnail: None,
            images: vec![],
            status: "active".into(),
            position: 0,
            featured: false,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn live_product_in_live_category_is_visible() {
        assert!(product(Some(4)).is_visible_in(Some(&category(4))));
        assert!(product(None).is_visible_in(None));
    }

    #[test]
    fn trashed_or_inactive_product_is_hidden() {
        let shelf = category(4);

        let mut trashed = product(Some(4));
        trashed.deleted_at = trashed_at();
        assert!(!trashed.is_visible_in(Some(&shelf)));

        let mut draft = product(Some(4));
        draft.status = "inactive".into();
        assert!(!draft.is_visible_in(Some(&shelf)));
    }

    #[test]
    fn trashed_or_inactive_category_hides_its_products() {
        let mut trashed = category(4);
        trashed.deleted_at = trashed_at();
        assert!(!trashed.is_visible());
        assert!(!product(Some(4)).is_visible_in(Some(&trashed)));

        let mut inactive = category(4);
        inactive.status = "inactive".into();
        assert!(!product(Some(4)).is_visible_in(Some(&inactive)));
    }

    #[test]
    fn missing_or_mismatched_category_hides_the_product() {
        assert!(!product(Some(4)).is_visible_in(None));
        assert!(!product(Some(4)).is_visible_in(Some(&category(9))));
    }
}
