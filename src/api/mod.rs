//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`products`] - 商品管理接口 (目录查询层)
//! - [`collections`] - 系列管理接口
//! - [`reviews`] - 评论接口 (读时聚合)
//! - [`blogs`] - 博客管理接口
//! - [`banners`] - 横幅管理接口
//! - [`enquiries`] - 留言接口
//! - [`files`] - 静态媒体文件服务

pub mod banners;
pub mod blogs;
pub mod collections;
pub mod enquiries;
pub mod files;
pub mod health;
pub mod products;
pub mod reviews;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use http::{HeaderName, HeaderValue};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Upper bound on in-flight requests; excess requests queue on the semaphore
const MAX_CONCURRENT_REQUESTS: usize = 512;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(products::router())
        .merge(collections::router())
        .merge(reviews::router())
        .merge(blogs::router())
        .merge(banners::router())
        .merge(enquiries::router())
        // Static media - public routes
        .merge(files::router())
        // Health API - public route
        .merge(health::router())
}

/// Build a fully configured application with all middleware
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Limit - bound concurrent in-flight requests
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        // Multipart uploads need a raised body limit
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
}
