//! Catalog flow integration tests
//!
//! Drives the repositories against an in-memory database: collection and
//! product lifecycle, the image invariant, slug derivation, and the
//! non-cascading collection delete.

use storefront_server::db::models::{
    BlogCreate, BlogUpdate, CollectionCreate, CollectionUpdate, ProductCreate, ProductFeature,
    ProductUpdate,
};
use storefront_server::db::repository::{BlogRepository, CollectionRepository, ProductRepository};
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

fn draft(name: &str, price: f64, collection: Thing) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        description: format!("{} description", name),
        price,
        original_price: None,
        discount: None,
        feature: None,
        collection,
        images: vec!["cover.jpg".to_string()],
        videos: Vec::new(),
    }
}

#[tokio::test]
async fn product_round_trip_populates_collection() {
    let (state, _tmp) = setup().await;
    let collection = seed_collection(&state, "Dry Fruits").await;

    let repo = ProductRepository::new(state.get_db());
    let created = repo
        .create(draft("Roasted Cashew", 12.5, collection))
        .await
        .expect("create product");
    assert_eq!(created.slug, "roasted-cashew");

    let view = repo
        .find_by_slug("roasted-cashew")
        .await
        .expect("query")
        .expect("product exists");
    assert_eq!(view.name, "Roasted Cashew");
    let populated = view.collection.expect("collection populated");
    assert_eq!(populated.name, "Dry Fruits");
}

#[tokio::test]
async fn create_without_images_is_rejected() {
    let (state, _tmp) = setup().await;
    let collection = seed_collection(&state, "Spices").await;

    let repo = ProductRepository::new(state.get_db());
    let mut data = draft("Turmeric", 4.0, collection);
    data.images.clear();

    assert!(repo.create(data).await.is_err());
}

#[tokio::test]
async fn update_cannot_drop_all_images() {
    let (state, _tmp) = setup().await;
    let collection = seed_collection(&state, "Nuts").await;

    let repo = ProductRepository::new(state.get_db());
    let created = repo
        .create(draft("Almond", 9.0, collection))
        .await
        .expect("create product");
    let id = created.id.clone().expect("id").to_string();

    let rejected = repo
        .update(
            &id,
            ProductUpdate {
                images: Some(Vec::new()),
                ..Default::default()
            },
        )
        .await;
    assert!(rejected.is_err());

    // The stored record is unchanged after the rejected update
    let stored = repo.find_by_id(&id).await.expect("query").expect("exists");
    assert_eq!(stored.images, vec!["cover.jpg".to_string()]);
    assert_eq!(stored.price, 9.0);
}

#[tokio::test]
async fn partial_update_leaves_other_fields() {
    let (state, _tmp) = setup().await;
    let collection = seed_collection(&state, "Nuts").await;

    let repo = ProductRepository::new(state.get_db());
    let created = repo
        .create(draft("Pistachio", 15.0, collection))
        .await
        .expect("create product");
    let id = created.id.clone().expect("id").to_string();

    let updated = repo
        .update(
            &id,
            ProductUpdate {
                price: Some(13.5),
                feature: Some(ProductFeature::Hot),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.price, 13.5);
    assert_eq!(updated.feature, ProductFeature::Hot);
    assert_eq!(updated.name, "Pistachio");
    assert_eq!(updated.slug, created.slug);
    assert_eq!(updated.images, created.images);
}

#[tokio::test]
async fn create_rejects_products_over_asset_caps() {
    let (state, _tmp) = setup().await;
    let collection = seed_collection(&state, "Nuts").await;
    let repo = ProductRepository::new(state.get_db());

    // 11 images is one over the cap
    let mut data = draft("Bulk Cashew", 12.0, collection.clone());
    data.images = (0..11).map(|i| format!("img-{}.jpg", i)).collect();
    assert!(repo.create(data).await.is_err());

    // 4 videos is one over the cap
    let mut data = draft("Bulk Cashew", 12.0, collection.clone());
    data.videos = (0..4).map(|i| format!("clip-{}.mp4", i)).collect();
    assert!(repo.create(data).await.is_err());

    // At the caps exactly, creation succeeds
    let mut data = draft("Bulk Cashew", 12.0, collection);
    data.images = (0..10).map(|i| format!("img-{}.jpg", i)).collect();
    data.videos = (0..3).map(|i| format!("clip-{}.mp4", i)).collect();
    assert!(repo.create(data).await.is_ok());
}

#[tokio::test]
async fn update_rejects_asset_lists_over_caps() {
    let (state, _tmp) = setup().await;
    let collection = seed_collection(&state, "Nuts").await;
    let repo = ProductRepository::new(state.get_db());

    let created = repo
        .create(draft("Cashew", 12.0, collection))
        .await
        .expect("create product");
    let id = created.id.clone().expect("id").to_string();

    let too_many_images = repo
        .update(
            &id,
            ProductUpdate {
                images: Some((0..11).map(|i| format!("img-{}.jpg", i)).collect()),
                ..Default::default()
            },
        )
        .await;
    assert!(too_many_images.is_err());

    let too_many_videos = repo
        .update(
            &id,
            ProductUpdate {
                videos: Some((0..4).map(|i| format!("clip-{}.mp4", i)).collect()),
                ..Default::default()
            },
        )
        .await;
    assert!(too_many_videos.is_err());

    // Rejected updates left the record as created
    let stored = repo.find_by_id(&id).await.expect("query").expect("exists");
    assert_eq!(stored.images, created.images);
    assert!(stored.videos.is_empty());
}

fn blog_draft(title: &str, videos: Vec<String>) -> BlogCreate {
    BlogCreate {
        title: title.to_string(),
        description: "post body".to_string(),
        tag: "news".to_string(),
        read_time: "4 min".to_string(),
        image: "cover.jpg".to_string(),
        videos,
    }
}

#[tokio::test]
async fn blog_video_cap_is_enforced() {
    let (state, _tmp) = setup().await;
    let repo = BlogRepository::new(state.get_db());

    // Three videos is one over the cap
    let videos = (0..3).map(|i| format!("clip-{}.mp4", i)).collect();
    assert!(repo.create(blog_draft("Harvest Notes", videos)).await.is_err());

    // Two is the maximum
    let videos: Vec<String> = (0..2).map(|i| format!("clip-{}.mp4", i)).collect();
    let created = repo
        .create(blog_draft("Harvest Notes", videos.clone()))
        .await
        .expect("create blog");
    let id = created.id.expect("id").to_string();

    // An update cannot push past the cap either
    let over = repo
        .update(
            &id,
            BlogUpdate {
                videos: Some((0..3).map(|i| format!("clip-{}.mp4", i)).collect()),
                ..Default::default()
            },
        )
        .await;
    assert!(over.is_err());

    let stored = repo.find_by_id(&id).await.expect("query").expect("exists");
    assert_eq!(stored.videos, videos);
}

#[tokio::test]
async fn duplicate_names_get_suffixed_slugs() {
    let (state, _tmp) = setup().await;
    let collection = seed_collection(&state, "Nuts").await;

    let repo = ProductRepository::new(state.get_db());
    let first = repo
        .create(draft("Salted Cashew", 10.0, collection.clone()))
        .await
        .expect("first");
    let second = repo
        .create(draft("Salted Cashew", 11.0, collection))
        .await
        .expect("second");

    assert_eq!(first.slug, "salted-cashew");
    assert_eq!(second.slug, "salted-cashew-2");
}

#[tokio::test]
async fn delete_product_then_lookup_fails() {
    let (state, _tmp) = setup().await;
    let collection = seed_collection(&state, "Nuts").await;

    let repo = ProductRepository::new(state.get_db());
    let created = repo
        .create(draft("Walnut", 8.0, collection))
        .await
        .expect("create");
    let id = created.id.expect("id").to_string();

    repo.delete(&id).await.expect("delete");
    assert!(repo.find_by_id(&id).await.expect("query").is_none());
    assert!(repo.delete(&id).await.is_err());
}

#[tokio::test]
async fn collection_names_are_unique() {
    let (state, _tmp) = setup().await;
    let repo = CollectionRepository::new(state.get_db());

    repo.create(CollectionCreate {
        name: "Gift Boxes".into(),
        image: None,
    })
    .await
    .expect("first");

    let dup = repo
        .create(CollectionCreate {
            name: "Gift Boxes".into(),
            image: None,
        })
        .await;
    assert!(dup.is_err());
}

#[tokio::test]
async fn collection_rename_collision_is_rejected() {
    let (state, _tmp) = setup().await;
    let repo = CollectionRepository::new(state.get_db());

    repo.create(CollectionCreate {
        name: "Seeds".into(),
        image: None,
    })
    .await
    .expect("seeds");
    let other = repo
        .create(CollectionCreate {
            name: "Berries".into(),
            image: None,
        })
        .await
        .expect("berries");
    let other_id = other.id.expect("id").to_string();

    let collision = repo
        .update(
            &other_id,
            CollectionUpdate {
                name: Some("Seeds".into()),
                image: None,
            },
        )
        .await;
    assert!(collision.is_err());

    // Renaming to its own current name is allowed
    let same = repo
        .update(
            &other_id,
            CollectionUpdate {
                name: Some("Berries".into()),
                image: None,
            },
        )
        .await;
    assert!(same.is_ok());
}

#[tokio::test]
async fn collection_delete_does_not_cascade() {
    let (state, _tmp) = setup().await;
    let collections = CollectionRepository::new(state.get_db());
    let products = ProductRepository::new(state.get_db());

    let collection = collections
        .create(CollectionCreate {
            name: "Seasonal".into(),
            image: None,
        })
        .await
        .expect("create collection");
    let collection_id = collection.id.clone().expect("id");

    let created = products
        .create(draft("Winter Mix", 20.0, collection_id.clone()))
        .await
        .expect("create product");

    collections
        .delete(&collection_id.to_string())
        .await
        .expect("delete collection");

    // The product survives; its populated read shows no collection
    let view = products
        .find_by_slug(&created.slug)
        .await
        .expect("query")
        .expect("product still readable");
    assert!(view.collection.is_none());
}
