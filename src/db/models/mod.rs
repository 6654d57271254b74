//! Data Models
//!
//! One module per stored entity. Wire field names are camelCase to match the
//! storefront client (`originalPrice`, `reviewStars`, `createdAt`, ...).

pub mod banner;
pub mod blog;
pub mod collection;
pub mod enquiry;
pub mod product;
pub mod review;

pub use banner::{Banner, BannerCreate};
pub use blog::{Blog, BlogCreate, BlogUpdate};
pub use collection::{Collection, CollectionCreate, CollectionUpdate};
pub use enquiry::{AddEnquiryRequest, Enquiry};
pub use product::{
    Product, ProductCreate, ProductFeature, ProductPage, ProductQuery, ProductSort, ProductUpdate,
    ProductView,
};
pub use review::{AddReviewRequest, ProductReviews, Review};
