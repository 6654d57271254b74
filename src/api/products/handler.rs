//! Product API Handlers
//!
//! Create/update go through the media pipeline (multipart with retained-asset
//! merge); the listing endpoints all funnel into one query path.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{
    Product, ProductCreate, ProductFeature, ProductPage, ProductQuery, ProductSort, ProductUpdate,
    ProductView,
};
use crate::db::repository::product::{MAX_PRODUCT_IMAGES, MAX_PRODUCT_VIDEOS};
use crate::db::repository::{CollectionRepository, ProductRepository, ReviewRepository};
use crate::media::{MediaKind, MultipartForm, UploadedFile, merge_assets};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// Persist uploaded files of one kind, returning the stored filenames
fn save_all(
    state: &ServerState,
    kind: MediaKind,
    files: &[&UploadedFile],
) -> AppResult<Vec<String>> {
    files
        .iter()
        .map(|f| state.media.save(kind, &f.filename, &f.bytes))
        .collect()
}

/// Resolve a collection id from the form to a verified record link
async fn resolve_collection(
    state: &ServerState,
    collection_id: &str,
) -> AppResult<surrealdb::sql::Thing> {
    let repo = CollectionRepository::new(state.get_db());
    let collection = repo
        .find_by_id(collection_id)
        .await?
        .ok_or_else(|| AppError::validation(format!("Unknown collection: {}", collection_id)))?;
    collection
        .id
        .ok_or_else(|| AppError::internal("stored collection has no id"))
}

/// POST /product/add-product - 创建商品 (multipart)
pub async fn create(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<AppResponse<Product>>)> {
    let form = MultipartForm::read(&mut multipart).await?;

    let name = form.require_text("name")?;
    let description = form.require_text("description")?;
    let price: f64 = form.require_parse("price")?;
    let original_price = form.parse::<f64>("originalPrice")?;
    let discount = form.parse::<f64>("discount")?;
    let feature = form.json_value::<ProductFeature>("feature")?;

    let collection_id = form.require_text("collection")?;
    let collection = resolve_collection(&state, &collection_id).await?;

    let image_files = form.files("images");
    let video_files = form.files("videos");
    if image_files.is_empty() {
        return Err(AppError::validation("at least one image is required"));
    }
    if image_files.len() > MAX_PRODUCT_IMAGES {
        return Err(AppError::validation(format!(
            "at most {} images allowed",
            MAX_PRODUCT_IMAGES
        )));
    }
    if video_files.len() > MAX_PRODUCT_VIDEOS {
        return Err(AppError::validation(format!(
            "at most {} videos allowed",
            MAX_PRODUCT_VIDEOS
        )));
    }

    let images = save_all(&state, MediaKind::Image, &image_files)?;
    let videos = save_all(&state, MediaKind::Video, &video_files)?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .create(ProductCreate {
            name,
            description,
            price,
            original_price,
            discount,
            feature,
            collection,
            images,
            videos,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        ok_with_message(product, "product created"),
    ))
}

/// PUT /product/update-product/:id - 更新商品 (multipart)
///
/// `existingImages` / `existingVideos` carry the retained filenames as JSON
/// arrays; the final asset list is retained ∪ newly uploaded, existing first.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<Product>>> {
    let form = MultipartForm::read(&mut multipart).await?;

    let existing_images = form.json_list("existingImages")?;
    let existing_videos = form.json_list("existingVideos")?;
    let new_image_files = form.files("images");
    let new_video_files = form.files("videos");

    // An asset decision is present as soon as either side of the merge is
    // supplied. Validate the outcome before any file hits disk so a rejected
    // update leaves both the record and the media directories untouched.
    let images_decided = existing_images.is_some() || !new_image_files.is_empty();
    if images_decided {
        let retained = existing_images.as_deref().unwrap_or(&[]);
        if retained.is_empty() && new_image_files.is_empty() {
            return Err(AppError::validation(
                "a product must keep at least one image",
            ));
        }
        if retained.len() + new_image_files.len() > MAX_PRODUCT_IMAGES {
            return Err(AppError::validation(format!(
                "at most {} images allowed",
                MAX_PRODUCT_IMAGES
            )));
        }
    }
    let videos_decided = existing_videos.is_some() || !new_video_files.is_empty();
    if videos_decided {
        let retained = existing_videos.as_deref().unwrap_or(&[]);
        if retained.len() + new_video_files.len() > MAX_PRODUCT_VIDEOS {
            return Err(AppError::validation(format!(
                "at most {} videos allowed",
                MAX_PRODUCT_VIDEOS
            )));
        }
    }

    let collection = match form.text("collection") {
        Some(collection_id) => Some(resolve_collection(&state, collection_id).await?),
        None => None,
    };

    let new_images = save_all(&state, MediaKind::Image, &new_image_files)?;
    let new_videos = save_all(&state, MediaKind::Video, &new_video_files)?;

    let images =
        images_decided.then(|| merge_assets(existing_images.unwrap_or_default(), new_images));
    let videos =
        videos_decided.then(|| merge_assets(existing_videos.unwrap_or_default(), new_videos));

    let data = ProductUpdate {
        name: form.text("name").map(str::to_string),
        description: form.text("description").map(str::to_string),
        price: form.parse("price")?,
        original_price: form.parse("originalPrice")?,
        discount: form.parse("discount")?,
        feature: form.json_value("feature")?,
        collection,
        images,
        videos,
    };

    let repo = ProductRepository::new(state.get_db());
    let product = repo.update(&id, data).await?;

    Ok(ok_with_message(product, "product updated"))
}

/// DELETE /product/delete-product/:id - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = ProductRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok_with_message(true, "product deleted"))
}

// =============================================================================
// Query Layer
// =============================================================================

/// Single query path behind every listing endpoint
///
/// The rating filter aggregates the review table first and restricts the
/// listing to the qualifying product ids.
async fn run_query(state: &ServerState, query: ProductQuery) -> AppResult<ProductPage> {
    let id_filter = match query.min_rating {
        Some(min) => {
            let ids = ReviewRepository::new(state.get_db())
                .product_ids_with_min_average(min)
                .await?;
            if ids.is_empty() {
                return Ok(ProductPage::empty(query.page()));
            }
            Some(ids)
        }
        None => None,
    };

    let repo = ProductRepository::new(state.get_db());
    Ok(repo.list(&query, id_filter).await?)
}

/// GET /product/get-products - 商品列表 (完整过滤/排序/分页)
pub async fn get_products(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<AppResponse<ProductPage>>> {
    let page = run_query(&state, query).await?;
    Ok(ok(page))
}

/// GET /product/get-product/:slug - 按 slug 获取单个商品
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<AppResponse<ProductView>>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", slug)))?;
    Ok(ok(product))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keyword: String,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// GET /product/get-product-by-search?keyword= - 关键字搜索
pub async fn get_by_search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<AppResponse<ProductPage>>> {
    let keyword = params.keyword.trim().to_string();
    let query = ProductQuery {
        keyword: (!keyword.is_empty()).then_some(keyword),
        page: params.page,
        limit: params.limit,
        ..Default::default()
    };
    Ok(ok(run_query(&state, query).await?))
}

#[derive(Debug, Deserialize)]
pub struct CollectionParams {
    pub collection: String,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// GET /product/get-product-by-collection?collection= - 按系列筛选
pub async fn get_by_collection(
    State(state): State<ServerState>,
    Query(params): Query<CollectionParams>,
) -> AppResult<Json<AppResponse<ProductPage>>> {
    let query = ProductQuery {
        collection: Some(params.collection),
        page: params.page,
        limit: params.limit,
        ..Default::default()
    };
    Ok(ok(run_query(&state, query).await?))
}

#[derive(Debug, Deserialize)]
pub struct PriceParams {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// GET /product/get-product-by-price?min=&max= - 按价格区间筛选
pub async fn get_by_price(
    State(state): State<ServerState>,
    Query(params): Query<PriceParams>,
) -> AppResult<Json<AppResponse<ProductPage>>> {
    let query = ProductQuery {
        price_min: params.min,
        price_max: params.max,
        page: params.page,
        limit: params.limit,
        ..Default::default()
    };
    Ok(ok(run_query(&state, query).await?))
}

#[derive(Debug, Deserialize)]
pub struct RatingParams {
    pub min: f64,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// GET /product/get-product-by-rating?min= - 按平均评分筛选
pub async fn get_by_rating(
    State(state): State<ServerState>,
    Query(params): Query<RatingParams>,
) -> AppResult<Json<AppResponse<ProductPage>>> {
    let query = ProductQuery {
        min_rating: Some(params.min),
        page: params.page,
        limit: params.limit,
        ..Default::default()
    };
    Ok(ok(run_query(&state, query).await?))
}

#[derive(Debug, Deserialize)]
pub struct SortParams {
    pub sort: ProductSort,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// GET /product/get-product-by-sort?sort= - 排序列表
pub async fn get_by_sort(
    State(state): State<ServerState>,
    Query(params): Query<SortParams>,
) -> AppResult<Json<AppResponse<ProductPage>>> {
    let query = ProductQuery {
        sort: Some(params.sort),
        page: params.page,
        limit: params.limit,
        ..Default::default()
    };
    Ok(ok(run_query(&state, query).await?))
}
