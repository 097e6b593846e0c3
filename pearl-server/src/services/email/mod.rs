//! Email 传输层抽象
//!
//! 提供可插拔的邮件发送架构：
//! ```text
//!         ┌──────────────────────┐
//!         │ EmailTransport Trait │  ◄── 可插拔接口
//!         └──────────┬───────────┘
//!                    │
//!            ┌───────┴────────┐
//!            ▼                ▼
//!      SesTransport    MemoryTransport
//!      (AWS SESv2)     (测试/本地)
//! ```

mod memory;
mod ses;

pub use memory::{MemoryTransport, SentEmail};
pub use ses::SesTransport;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Email delivery errors
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("Failed to send email: {0}")]
    Send(String),
}

/// Email 传输层特征
///
/// 所有传输实现必须实现此特征。
#[async_trait]
pub trait EmailTransport: Send + Sync + std::fmt::Debug {
    /// 发送一封 HTML 邮件
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<(), EmailError>;
}

/// Mailer — a transport plus the configured sender address
#[derive(Clone, Debug)]
pub struct Mailer {
    transport: Arc<dyn EmailTransport>,
    from: String,
}

impl Mailer {
    pub fn new(transport: Arc<dyn EmailTransport>, from: impl Into<String>) -> Self {
        Self {
            transport,
            from: from.into(),
        }
    }

    pub fn from_address(&self) -> &str {
        &self.from
    }

    /// Send an HTML email from the configured sender
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        self.transport.send(&self.from, to, subject, html).await
    }
}
