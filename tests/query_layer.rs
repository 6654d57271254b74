//! Query layer integration tests
//!
//! Filters, sorting, pagination, and the read-time review aggregation, all
//! against an in-memory database.

use storefront_server::db::models::{
    AddReviewRequest, CollectionCreate, ProductCreate, ProductQuery, ProductReviews, ProductSort,
};
use storefront_server::db::repository::{
    CollectionRepository, ProductRepository, ReviewRepository,
};
use storefront_server::{Config, ServerState};
use surrealdb::sql::Thing;
use tempfile::TempDir;

async fn setup() -> (ServerState, TempDir) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize_in_memory(&config).await;
    (state, tmp)
}

async fn seed_collection(state: &ServerState, name: &str) -> Thing {
    let repo = CollectionRepository::new(state.get_db());
    let collection = repo
        .create(CollectionCreate {
            name: name.to_string(),
            image: None,
        })
        .await
        .expect("create collection");
    collection.id.expect("collection id")
}

async fn seed_product(state: &ServerState, name: &str, price: f64, collection: Thing) -> Thing {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .create(ProductCreate {
            name: name.to_string(),
            description: format!("{} description", name),
            price,
            original_price: None,
            discount: None,
            feature: None,
            collection,
            images: vec!["cover.jpg".to_string()],
            videos: Vec::new(),
        })
        .await
        .expect("create product");
    product.id.expect("product id")
}

#[tokio::test]
async fn keyword_search_matches_name_and_description() {
    let (state, _tmp) = setup().await;
    let nuts = seed_collection(&state, "Nuts").await;
    seed_product(&state, "Roasted Cashew", 12.0, nuts.clone()).await;
    seed_product(&state, "Salted Almond", 9.0, nuts.clone()).await;
    seed_product(&state, "Trail Mix", 7.0, nuts).await;

    let repo = ProductRepository::new(state.get_db());

    let page = repo
        .list(
            &ProductQuery {
                keyword: Some("CASHEW".into()),
                ..Default::default()
            },
            None,
        )
        .await
        .expect("list");
    assert_eq!(page.total, 1);
    assert_eq!(page.products[0].name, "Roasted Cashew");

    // Substring over the description too
    let page = repo
        .list(
            &ProductQuery {
                keyword: Some("description".into()),
                ..Default::default()
            },
            None,
        )
        .await
        .expect("list");
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn price_filter_and_sort_combine() {
    let (state, _tmp) = setup().await;
    let nuts = seed_collection(&state, "Nuts").await;
    for (name, price) in [
        ("Cashew", 12.0),
        ("Almond", 9.0),
        ("Pistachio", 15.0),
        ("Peanut", 3.0),
    ] {
        seed_product(&state, name, price, nuts.clone()).await;
    }

    let repo = ProductRepository::new(state.get_db());
    let page = repo
        .list(
            &ProductQuery {
                price_min: Some(5.0),
                price_max: Some(14.0),
                sort: Some(ProductSort::PriceAsc),
                ..Default::default()
            },
            None,
        )
        .await
        .expect("list");

    assert_eq!(page.total, 2);
    let prices: Vec<f64> = page.products.iter().map(|p| p.price).collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(prices, vec![9.0, 12.0]);
}

#[tokio::test]
async fn collection_filter_restricts_results() {
    let (state, _tmp) = setup().await;
    let nuts = seed_collection(&state, "Nuts").await;
    let spices = seed_collection(&state, "Spices").await;
    seed_product(&state, "Cashew", 12.0, nuts.clone()).await;
    seed_product(&state, "Turmeric", 4.0, spices).await;

    let repo = ProductRepository::new(state.get_db());
    let page = repo
        .list(
            &ProductQuery {
                collection: Some(nuts.to_string()),
                ..Default::default()
            },
            None,
        )
        .await
        .expect("list");

    assert_eq!(page.total, 1);
    assert_eq!(page.products[0].name, "Cashew");
}

#[tokio::test]
async fn pagination_counts_and_out_of_range_page() {
    let (state, _tmp) = setup().await;
    let nuts = seed_collection(&state, "Nuts").await;
    for i in 0..5 {
        seed_product(&state, &format!("Product {}", i), 10.0 + i as f64, nuts.clone()).await;
    }

    let repo = ProductRepository::new(state.get_db());

    let first = repo
        .list(
            &ProductQuery {
                limit: Some(2),
                page: Some(1),
                ..Default::default()
            },
            None,
        )
        .await
        .expect("list");
    assert_eq!(first.total, 5);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.products.len(), 2);

    let last = repo
        .list(
            &ProductQuery {
                limit: Some(2),
                page: Some(3),
                ..Default::default()
            },
            None,
        )
        .await
        .expect("list");
    assert_eq!(last.products.len(), 1);

    // Out of range: empty page, same total, no error
    let beyond = repo
        .list(
            &ProductQuery {
                limit: Some(2),
                page: Some(9),
                ..Default::default()
            },
            None,
        )
        .await
        .expect("list");
    assert!(beyond.products.is_empty());
    assert_eq!(beyond.total, 5);
}

#[tokio::test]
async fn name_sort_is_alphabetical() {
    let (state, _tmp) = setup().await;
    let nuts = seed_collection(&state, "Nuts").await;
    for name in ["Walnut", "Almond", "Cashew"] {
        seed_product(&state, name, 10.0, nuts.clone()).await;
    }

    let repo = ProductRepository::new(state.get_db());
    let page = repo
        .list(
            &ProductQuery {
                sort: Some(ProductSort::NameAsc),
                ..Default::default()
            },
            None,
        )
        .await
        .expect("list");

    let names: Vec<&str> = page.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Almond", "Cashew", "Walnut"]);
}

fn review(product_id: &str, stars: i32) -> AddReviewRequest {
    AddReviewRequest {
        product_id: product_id.to_string(),
        review_stars: stars,
        review_text: "tasty".into(),
        user_name: "tester".into(),
        user_id: None,
    }
}

#[tokio::test]
async fn review_aggregation_rounds_to_one_decimal() {
    let (state, _tmp) = setup().await;
    let nuts = seed_collection(&state, "Nuts").await;
    let product = seed_product(&state, "Cashew", 12.0, nuts).await;
    let product_id = product.to_string();

    let reviews = ReviewRepository::new(state.get_db());
    for stars in [5, 5, 4] {
        reviews
            .create(product.clone(), review(&product_id, stars))
            .await
            .expect("create review");
    }

    let listed = reviews
        .find_by_product(&product_id)
        .await
        .expect("find reviews");
    let agg = ProductReviews::from_reviews(listed);
    assert_eq!(agg.count, 3);
    assert_eq!(agg.average, 4.7);
}

#[tokio::test]
async fn rating_filter_selects_qualifying_products() {
    let (state, _tmp) = setup().await;
    let nuts = seed_collection(&state, "Nuts").await;
    let good = seed_product(&state, "Cashew", 12.0, nuts.clone()).await;
    let poor = seed_product(&state, "Stale Mix", 5.0, nuts.clone()).await;
    let unreviewed = seed_product(&state, "Almond", 9.0, nuts).await;

    let reviews = ReviewRepository::new(state.get_db());
    for stars in [5, 4] {
        reviews
            .create(good.clone(), review(&good.to_string(), stars))
            .await
            .expect("good review");
    }
    reviews
        .create(poor.clone(), review(&poor.to_string(), 2))
        .await
        .expect("poor review");

    let qualifying = reviews
        .product_ids_with_min_average(4.0)
        .await
        .expect("aggregate");
    assert_eq!(qualifying, vec![good.clone()]);
    assert!(!qualifying.contains(&poor));
    assert!(!qualifying.contains(&unreviewed));

    // The id filter feeds the listing
    let products = ProductRepository::new(state.get_db());
    let page = products
        .list(&ProductQuery::default(), Some(qualifying))
        .await
        .expect("list");
    assert_eq!(page.total, 1);
    assert_eq!(page.products[0].name, "Cashew");
}

#[tokio::test]
async fn review_for_invalid_stars_is_rejected() {
    let (state, _tmp) = setup().await;
    let nuts = seed_collection(&state, "Nuts").await;
    let product = seed_product(&state, "Cashew", 12.0, nuts).await;

    let reviews = ReviewRepository::new(state.get_db());
    let rejected = reviews
        .create(product.clone(), review(&product.to_string(), 6))
        .await;
    assert!(rejected.is_err());

    let listed = reviews
        .find_by_product(&product.to_string())
        .await
        .expect("find reviews");
    assert!(listed.is_empty());
}
