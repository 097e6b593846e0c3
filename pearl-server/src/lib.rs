//! Pearl Store Server - 无头商城后端
//!
//! # 架构概述
//!
//! 本模块是 Pearl Store Server 的主入口，提供以下核心功能：
//!
//! - **集合 API** (`api`): users / categories / products / special-offers /
//!   ideas / tests / orders 的 RESTful 接口
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储与仓储层
//! - **订单工作流** (`orders`): 订单号分配 + 完成通知
//! - **副作用服务** (`services`): 邮件发送、缓存失效、后台队列
//!
//! # 模块结构
//!
//! ```text
//! pearl-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repository)
//! ├── orders/        # 订单工作流 (allocator + notifier)
//! ├── services/      # 邮件、revalidation、hook 队列
//! └── utils/         # 错误、日志、slug、验证
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{BackgroundTasks, Config, Server, ServerState, TaskKind};
pub use crate::db::DbService;
pub use crate::services::{HookQueue, HookWorker, Mailer, MemoryTransport, Revalidator, SideEffect};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____                  __
   / __ \___  ____ ______/ /
  / /_/ / _ \/ __ `/ ___/ /
 / ____/  __/ /_/ / /  / /
/_/    \___/\__,_/_/  /_/
    _____ __
   / ___// /_____  ________
   \__ \/ __/ __ \/ ___/ _ \
  ___/ / /_/ /_/ / /  /  __/
 /____/\__/\____/_/   \___/
    "#
    );
}
