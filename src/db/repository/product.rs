//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{
    Product, ProductCreate, ProductPage, ProductQuery, ProductUpdate, ProductView,
};
use crate::utils::slug::{slug_candidate, slugify};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::{Thing, Value};

const PRODUCT_TABLE: &str = "product";

/// Server-side asset caps (enforced on create and update)
pub const MAX_PRODUCT_IMAGES: usize = 10;
pub const MAX_PRODUCT_VIDEOS: usize = 3;

// =============================================================================
// Product Repository
// =============================================================================

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find product by id (stored shape, collection as record link)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Find product by slug with the collection record populated
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<ProductView>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE slug = $slug LIMIT 1 FETCH collection")
            .bind(("slug", slug_owned))
            .await?;
        let products: Vec<ProductView> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    async fn slug_exists(&self, slug: &str) -> RepoResult<bool> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT slug FROM product WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;

        #[derive(serde::Deserialize)]
        struct SlugRow {
            #[allow(dead_code)]
            slug: String,
        }

        let rows: Vec<SlugRow> = result.take(0)?;
        Ok(!rows.is_empty())
    }

    /// Derive a unique slug from the product name (`base`, `base-2`, ...)
    async fn unique_slug(&self, name: &str) -> RepoResult<String> {
        let base = slugify(name);
        for attempt in 1..=64 {
            let candidate = slug_candidate(&base, attempt);
            if !self.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
        // Pathological collision run; fall back to a random suffix
        Ok(format!("{}-{}", base, uuid::Uuid::new_v4().simple()))
    }

    /// Create a new product
    ///
    /// Enforces the image invariant and asset caps before any write.
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("name cannot be empty".into()));
        }
        if data.images.is_empty() {
            return Err(RepoError::Validation(
                "at least one image is required".into(),
            ));
        }
        if data.images.len() > MAX_PRODUCT_IMAGES {
            return Err(RepoError::Validation(format!(
                "at most {} images allowed",
                MAX_PRODUCT_IMAGES
            )));
        }
        if data.videos.len() > MAX_PRODUCT_VIDEOS {
            return Err(RepoError::Validation(format!(
                "at most {} videos allowed",
                MAX_PRODUCT_VIDEOS
            )));
        }

        let slug = self.unique_slug(&data.name).await?;
        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            original_price: data.original_price,
            discount: data.discount,
            feature: data.feature.unwrap_or_default(),
            collection: data.collection,
            images: data.images,
            videos: data.videos,
            slug,
            created_at: Utc::now(),
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;

        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))?;

        tracing::info!(slug = %created.slug, "Product created");
        Ok(created)
    }

    /// Update a product (partial fields, dynamic SET)
    ///
    /// `data.images`/`data.videos`, when present, are the full replacement
    /// lists. An empty image list is rejected before any write so the stored
    /// record is left unchanged.
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        if let Some(images) = &data.images {
            if images.is_empty() {
                return Err(RepoError::Validation(
                    "a product must keep at least one image".into(),
                ));
            }
            if images.len() > MAX_PRODUCT_IMAGES {
                return Err(RepoError::Validation(format!(
                    "at most {} images allowed",
                    MAX_PRODUCT_IMAGES
                )));
            }
        }
        if let Some(videos) = &data.videos
            && videos.len() > MAX_PRODUCT_VIDEOS
        {
            return Err(RepoError::Validation(format!(
                "at most {} videos allowed",
                MAX_PRODUCT_VIDEOS
            )));
        }

        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let thing = make_thing(PRODUCT_TABLE, pure_id);

        // Build dynamic SET clauses with proper type bindings
        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.original_price.is_some() {
            set_parts.push("originalPrice = $originalPrice");
        }
        if data.discount.is_some() {
            set_parts.push("discount = $discount");
        }
        if data.feature.is_some() {
            set_parts.push("feature = $feature");
        }
        if data.collection.is_some() {
            set_parts.push("collection = $collection");
        }
        if data.images.is_some() {
            set_parts.push("images = $images");
        }
        if data.videos.is_some() {
            set_parts.push("videos = $videos");
        }

        if set_parts.is_empty() {
            // No fields to update
            return self
                .find_by_id(pure_id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)));
        }

        let query_str = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self.base.db().query(query_str).bind(("thing", thing));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.original_price {
            query = query.bind(("originalPrice", v));
        }
        if let Some(v) = data.discount {
            query = query.bind(("discount", v));
        }
        if let Some(v) = data.feature {
            // serialize the enum to its wire name ("hot", "sold-out", ...)
            query = query.bind(("feature", serde_json::to_value(v).unwrap_or_default()));
        }
        if let Some(v) = data.collection {
            query = query.bind(("collection", v)); // Thing type
        }
        if let Some(v) = data.images {
            query = query.bind(("images", v));
        }
        if let Some(v) = data.videos {
            query = query.bind(("videos", v));
        }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;

        let updated = products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        tracing::info!(slug = %updated.slug, "Product updated");
        Ok(updated)
    }

    /// Hard delete a product
    ///
    /// Media files referenced by the record are not removed.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let result: Option<Product> = self.base.db().delete((PRODUCT_TABLE, pure_id)).await?;
        match result {
            Some(product) => {
                tracing::info!(slug = %product.slug, "Product deleted");
                Ok(())
            }
            None => Err(RepoError::NotFound(format!("Product {} not found", id))),
        }
    }

    /// Filtered, sorted, paginated listing with the collection populated
    ///
    /// `id_filter` restricts results to the given record ids (used by the
    /// rating filter, which aggregates the review table first). An
    /// out-of-range page yields an empty page, not an error.
    pub async fn list(
        &self,
        query: &ProductQuery,
        id_filter: Option<Vec<Thing>>,
    ) -> RepoResult<ProductPage> {
        let mut wheres: Vec<&str> = Vec::new();
        let mut binds: Vec<(&'static str, Value)> = Vec::new();

        if let Some(collection) = &query.collection {
            wheres.push("collection = $collection");
            binds.push((
                "collection",
                Value::Thing(make_thing("collection", collection)),
            ));
        }
        if let Some(min) = query.price_min {
            wheres.push("price >= $priceMin");
            binds.push(("priceMin", Value::from(min)));
        }
        if let Some(max) = query.price_max {
            wheres.push("price <= $priceMax");
            binds.push(("priceMax", Value::from(max)));
        }
        if let Some(keyword) = &query.keyword {
            wheres.push(
                "(string::contains(string::lowercase(name), $keyword) \
                 OR string::contains(string::lowercase(description), $keyword))",
            );
            binds.push(("keyword", Value::from(keyword.to_lowercase())));
        }
        if let Some(ids) = id_filter {
            wheres.push("id IN $ids");
            let values: Vec<Value> = ids.into_iter().map(Value::Thing).collect();
            binds.push(("ids", Value::from(values)));
        }

        let where_clause = if wheres.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", wheres.join(" AND "))
        };

        let page = query.page();
        let limit = query.limit();
        let start = (page - 1) * limit;
        let order = query
            .sort
            .unwrap_or(crate::db::models::ProductSort::Featured)
            .order_clause();

        let list_sql = format!(
            "SELECT * FROM product{} ORDER BY {} LIMIT {} START {} FETCH collection",
            where_clause, order, limit, start
        );
        let count_sql = format!(
            "SELECT count() AS total FROM product{} GROUP ALL",
            where_clause
        );

        let mut list_query = self.base.db().query(list_sql);
        for (name, value) in binds.clone() {
            list_query = list_query.bind((name, value));
        }
        let products: Vec<ProductView> = list_query.await?.take(0)?;

        #[derive(serde::Deserialize)]
        struct CountRow {
            total: u64,
        }

        let mut count_query = self.base.db().query(count_sql);
        for (name, value) in binds {
            count_query = count_query.bind((name, value));
        }
        let counts: Vec<CountRow> = count_query.await?.take(0)?;
        let total = counts.first().map(|c| c.total).unwrap_or(0);
        let total_pages = (total as u32).div_ceil(limit);

        Ok(ProductPage {
            products,
            total,
            page,
            total_pages,
        })
    }
}
