//! 服务器配置 - 后端的所有配置项

use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATA_DIR | ./data | 数据目录 (数据库、日志) |
/// | ENVIRONMENT | development | 运行环境 |
/// | PUBLIC_BASE_URL | http://localhost:3000 | 下载链接的公共前缀 |
/// | REVALIDATE_URL | (未设置) | 前端缓存失效回调地址 |
/// | SES_FROM_EMAIL | noreply@pearl.local | 发件人地址 |
/// | SES_REGION | (未设置) | SES 区域覆盖 |
/// | DEFAULT_ORDER_NOTIFICATION_EMAIL | (未设置) | 订单通知兜底收件人 |
/// | STORE_NAME | Pearl | 邮件品牌名 |
/// | SUPPORT_EMAIL | (未设置) | 邮件页脚联系邮箱 |
/// | SUPPORT_PHONE | (未设置) | 邮件页脚联系电话 |
///
/// # 示例
///
/// ```ignore
/// DATA_DIR=/data/pearl HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据目录，存储数据库和日志文件
    pub data_dir: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 公共站点地址，用于拼接绝对下载链接
    pub public_base_url: String,
    /// 缓存失效回调地址 (未设置则跳过 revalidation)
    pub revalidate_url: Option<String>,
    /// SES 发件人地址
    pub ses_from_email: String,
    /// SES 区域覆盖 (未设置则用默认 provider chain)
    pub ses_region: Option<String>,
    /// 订单通知兜底收件人 (订单无用户或用户无邮箱时使用)
    pub default_order_notification_email: Option<String>,
    /// 邮件品牌名
    pub store_name: String,
    /// 邮件页脚联系邮箱
    pub support_email: Option<String>,
    /// 邮件页脚联系电话
    pub support_phone: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            revalidate_url: std::env::var("REVALIDATE_URL").ok().filter(|s| !s.is_empty()),
            ses_from_email: std::env::var("SES_FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@pearl.local".into()),
            ses_region: std::env::var("SES_REGION").ok().filter(|s| !s.is_empty()),
            default_order_notification_email: std::env::var("DEFAULT_ORDER_NOTIFICATION_EMAIL")
                .ok()
                .filter(|s| !s.is_empty()),
            store_name: std::env::var("STORE_NAME").unwrap_or_else(|_| "Pearl".into()),
            support_email: std::env::var("SUPPORT_EMAIL").ok().filter(|s| !s.is_empty()),
            support_phone: std::env::var("SUPPORT_PHONE").ok().filter(|s| !s.is_empty()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(data_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库目录: {data_dir}/database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("database")
    }

    /// 日志目录: {data_dir}/logs
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("logs")
    }

    /// 确保数据目录结构存在
    pub fn ensure_data_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
