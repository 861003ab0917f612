mod common;

use std::sync::Arc;

use common::{MemoryProducts, at, category, product, registry};
use shared::{
    abstract_trait::ProductQueryServiceTrait,
    domain::requests::FindAllProducts,
    errors::ServiceError,
    service::ProductQueryService,
};

fn first_page() -> FindAllProducts {
    FindAllProducts {
        page: 1,
        page_size: 20,
        search: String::new(),
        category: None,
    }
}

/// Shelf 1 is live, shelf 2 is in the trash, shelf 3 is switched off.
async fn catalog() -> ProductQueryService {
    let live = product(1, 100_000, 0);

    let mut trashed = product(2, 100_000, 0);
    trashed.deleted_at = Some(at(2025, 2, 1));

    let mut draft = product(3, 100_000, 0);
    draft.status = "inactive".into();

    let mut on_trashed_shelf = product(4, 100_000, 0);
    on_trashed_shelf.category_id = Some(2);

    let mut on_inactive_shelf = product(5, 100_000, 0);
    on_inactive_shelf.category_id = Some(3);

    let mut uncategorized = product(6, 100_000, 0);
    uncategorized.category_id = None;

    let mut trashed_shelf = category(2);
    trashed_shelf.deleted_at = Some(at(2025, 2, 1));
    let mut inactive_shelf = category(3);
    inactive_shelf.status = "inactive".into();

    let mut products = vec![
        live,
        trashed,
        draft,
        on_trashed_shelf,
        on_inactive_shelf,
        uncategorized,
    ];
    for p in &mut products {
        p.featured = true;
    }

    let repo = MemoryProducts::with_categories(
        products,
        vec![category(1), trashed_shelf, inactive_shelf],
    );

    ProductQueryService::new(Arc::new(repo), registry()).await
}

#[tokio::test]
async fn listing_hides_trashed_and_inactive_products_and_shelves() {
    let catalog = catalog().await;

    let page = catalog.find_visible(&first_page()).await.unwrap();
    let slugs: Vec<_> = page.data.iter().map(|p| p.slug.as_str()).collect();

    assert_eq!(slugs, vec!["product-1", "product-6"]);
    assert_eq!(page.pagination.total_items, 2);
}

#[tokio::test]
async fn featured_row_hides_the_same_products() {
    let catalog = catalog().await;

    let featured = catalog.find_featured().await.unwrap();
    let ids: Vec<_> = featured.data.iter().map(|p| p.id).collect();

    assert_eq!(ids, vec![1, 6]);
}

#[tokio::test]
async fn detail_of_a_hidden_product_is_not_found() {
    let catalog = catalog().await;

    catalog.find_by_slug("product-1").await.unwrap();

    for slug in ["product-2", "product-3", "product-4", "product-5"] {
        let err = catalog.find_by_slug(slug).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)), "{slug} leaked");
    }
}
