use reservation_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 工作目录, 日志) 并加载配置
    let config = setup_environment()?;

    // 打印横幅
    print_banner();

    tracing::info!(
        environment = %config.environment,
        backend = config.store_backend.as_str(),
        port = config.http_port,
        "Reservation server starting..."
    );

    // 2. 初始化服务器状态 (目录 + 存储)
    let state = match ServerState::initialize(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize server: {}", e);
            return Err(e.into());
        }
    };

    // 3. 启动 HTTP 服务器，Ctrl-C 优雅退出
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
