use std::sync::{Arc, Mutex};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::mpsc;

use crate::core::{BackgroundTasks, Config, TaskKind};
use crate::db::DbService;
use crate::services::email::{Mailer, SesTransport};
use crate::services::hooks::{HOOK_QUEUE_CAPACITY, HookQueue, HookWorker, SideEffect};
use crate::services::revalidate::Revalidator;
use crate::utils::AppError;
use crate::utils::logger::cleanup_old_logs;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是后端的核心数据结构，使用 Arc 实现浅拷贝，
/// 每个请求 clone 的成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | mailer | Mailer | 邮件发送 (SES 或测试传输) |
/// | revalidator | Revalidator | 前端缓存失效客户端 |
/// | hooks | HookQueue | 副作用队列 (revalidation、订单邮件) |
///
/// # 使用示例
///
/// ```ignore
/// // 获取数据库连接
/// let db = state.get_db();
///
/// // 写操作之后入队副作用
/// state.hooks.revalidate(&["products"]);
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 邮件发送服务
    pub mailer: Mailer,
    /// 缓存失效客户端
    pub revalidator: Revalidator,
    /// 副作用队列 (生产端)
    pub hooks: HookQueue,
    /// 副作用队列消费端，由 start_background_tasks 取走
    hook_rx: Arc<Mutex<Option<mpsc::Receiver<SideEffect>>>>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 测试场景直接注入 db / mailer / revalidator；
    /// 生产路径使用 [`ServerState::initialize`]。
    pub fn new(config: Config, db: Surreal<Db>, mailer: Mailer, revalidator: Revalidator) -> Self {
        let (hooks, hook_rx) = HookQueue::new(HOOK_QUEUE_CAPACITY);
        Self {
            config,
            db,
            mailer,
            revalidator,
            hooks,
            hook_rx: Arc::new(Mutex::new(Some(hook_rx))),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据目录结构
    /// 2. 数据库 ({data_dir}/database)
    /// 3. 邮件传输 (SES, 凭证走 SDK 默认 provider chain)
    /// 4. 缓存失效客户端
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        // 0. Ensure data_dir structure exists
        config
            .ensure_data_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create data directory: {e}")))?;

        // 1. Initialize DB
        let db_service = DbService::new(&config.database_dir()).await?;

        // 2. Email transport (explicitly constructed at startup)
        let transport = Arc::new(SesTransport::from_env(config.ses_region.as_deref()).await);
        let mailer = Mailer::new(transport, config.ses_from_email.clone());

        // 3. Revalidation client
        let revalidator = Revalidator::new(config.revalidate_url.clone());
        if config.revalidate_url.is_none() {
            tracing::warn!("REVALIDATE_URL not set, storefront cache revalidation disabled");
        }

        Ok(Self::new(config.clone(), db_service.db, mailer, revalidator))
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 内、开始接收请求之前调用。
    ///
    /// 启动的任务：
    /// - 副作用队列工作者 (HookWorker)
    /// - 日志清理定时任务
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        // Hook worker (the receiver can only be taken once)
        let rx = self
            .hook_rx
            .lock()
            .expect("hook receiver lock poisoned")
            .take();
        match rx {
            Some(rx) => {
                let worker = HookWorker::new(
                    self.db.clone(),
                    self.mailer.clone(),
                    self.revalidator.clone(),
                    self.config.clone(),
                );
                let token = tasks.shutdown_token();
                tasks.spawn("hook_worker", TaskKind::Worker, async move {
                    worker.run(rx, token).await;
                });
            }
            None => {
                tracing::warn!("Hook worker already started, skipping");
            }
        }

        // Daily log cleanup
        let log_dir = self.config.log_dir();
        let token = tasks.shutdown_token();
        tasks.spawn("log_cleanup", TaskKind::Periodic, async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(24 * 3600));
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let Some(dir) = log_dir.to_str() else { continue };
                        match cleanup_old_logs(dir, 30) {
                            Ok(0) => {}
                            Ok(n) => tracing::info!(removed = n, "Old log files cleaned up"),
                            Err(e) => tracing::warn!(error = %e, "Log cleanup failed"),
                        }
                    }
                }
            }
        });
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
