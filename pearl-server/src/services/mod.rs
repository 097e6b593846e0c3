//! Services Module
//!
//! Outward-facing side-effect services: email delivery, storefront
//! cache revalidation, and the background hook queue that dispatches
//! both.

pub mod email;
pub mod hooks;
pub mod revalidate;

pub use email::{EmailTransport, Mailer, MemoryTransport, SesTransport};
pub use hooks::{HOOK_QUEUE_CAPACITY, HookQueue, HookWorker, SideEffect};
pub use revalidate::Revalidator;
