use pearl_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载 .env 与配置
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    // 2. 初始化日志 (数据目录就绪后才能写文件日志)
    config.ensure_data_dir_structure()?;
    init_logger_with_file(None, config.log_dir().to_str());

    // 打印横幅
    print_banner();

    tracing::info!("🫧 Pearl Store Server starting (env: {})", config.environment);

    // 3. 初始化服务器状态
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器 (Server::run 会自动启动后台任务)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
