//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`users`] - 用户管理接口
//! - [`categories`] - 分类管理接口
//! - [`products`] - 商品管理接口
//! - [`special_offers`] - 特惠套装管理接口
//! - [`ideas`] - 灵感内容管理接口
//! - [`tests`] - 测试集合接口
//! - [`orders`] - 订单接口 (创建公开，修改属于管理面)

pub mod health;

// Data models API
pub mod users;
pub mod categories;
pub mod products;
pub mod special_offers;
pub mod ideas;
pub mod tests;
pub mod orders;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
