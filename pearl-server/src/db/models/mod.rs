//! Database Models
//!
//! One module per collection. Each module carries the stored model,
//! the Create/Update DTOs accepted by the API, and a Response DTO
//! with string record ids for JSON output.

// Accounts
pub mod user;

// Catalog
pub mod category;
pub mod product;
pub mod special_offer;

// Content
pub mod idea;
pub mod test_entry;

// Orders
pub mod order;

// Re-exports
pub use user::{User, UserCreate, UserResponse, UserRole, UserUpdate};
pub use category::{Category, CategoryCreate, CategoryResponse, CategoryUpdate};
pub use product::{Product, ProductCreate, ProductFile, ProductResponse, ProductUpdate};
pub use special_offer::{
    SpecialOffer, SpecialOfferCreate, SpecialOfferResponse, SpecialOfferUpdate,
};
pub use idea::{Idea, IdeaCreate, IdeaResponse, IdeaUpdate};
pub use test_entry::{TestEntry, TestEntryCreate, TestEntryResponse, TestEntryUpdate};
pub use order::{
    BillingAddress, Deliverable, Order, OrderCreate, OrderItem, OrderItemInput,
    OrderItemResponse, OrderResponse, OrderStatus, OrderUpdate,
};
