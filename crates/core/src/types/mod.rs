//! Shared type definitions for Shopdeck.

pub mod customer;
pub mod dashboard;
pub mod id;
pub mod order;
pub mod page;
pub mod product;
pub mod validation;

pub use customer::{Customer, Role, UserProfile};
pub use dashboard::{
    CategoryPerformance, DashboardMetrics, DashboardOverview, ProductPerformance, RecentSale,
    SalesPoint, TrendPeriod,
};
pub use id::{CategoryId, CustomerId, ImageId, OrderId, ProductId};
pub use order::{Order, OrderItem, OrderStatus};
pub use page::{ApiResponse, Page};
pub use product::{Category, Product, ProductImage};
pub use validation::{
    FieldError, ImageIntake, ImageUpload, MAX_IMAGE_BYTES, MAX_IMAGES_PER_PRODUCT, ProductForm,
    ValidationError, filter_images, validate_login,
};
