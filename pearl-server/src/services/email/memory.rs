//! Memory 传输层实现 (同进程)
//!
//! 用于测试或本地开发。记录发送的邮件，可模拟传输失败。

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::{EmailError, EmailTransport};

/// A captured email
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// In-process email transport
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    fail_next: Arc<AtomicBool>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emails captured so far
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().expect("email log poisoned").clone()
    }

    /// When set, every send fails with a simulated transport error
    pub fn set_failing(&self, failing: bool) {
        self.fail_next.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmailTransport for MemoryTransport {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<(), EmailError> {
        if self.fail_next.load(Ordering::SeqCst) {
            return Err(EmailError::Send("simulated transport failure".to_string()));
        }

        self.sent.lock().expect("email log poisoned").push(SentEmail {
            from: from.to_string(),
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}
