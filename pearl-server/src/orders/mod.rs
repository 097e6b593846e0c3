//! 订单工作流
//!
//! 订单生命周期的两个阶段：
//!
//! - [`allocator`] - 订单号分配 (持久化前，唯一索引 + 重试)
//! - [`notifier`] - 完成通知 (持久化后，通过后台队列派发)
//! - [`template`] - 通知邮件 HTML 渲染

pub mod allocator;
pub mod notifier;
pub mod template;

pub use allocator::next_order_number;
