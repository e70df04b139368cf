use employee_desk::config::load_config;
use employee_desk::infrastructure::{build_store, logger::Logger};
use employee_desk::{create_routes, AppState};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_path) = load_config()?;
    let _log_guard = Logger::init(&config.logging)?;

    match &config_path {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }
    if config.access.password == employee_desk::config::DEFAULT_PASSWORD {
        warn!("正在使用默认访问口令，请在配置文件或 EMPLOYEE_DESK_PASSWORD 中设置");
    }

    let store = build_store(&config.database).map_err(|e| {
        error!("初始化存储后端失败: {}", e);
        e
    })?;
    info!("存储后端: {:?}", config.database.backend);

    let state = AppState::new(
        store,
        &config.access.password,
        config.access.session_ttl(),
    );
    let app = create_routes(state, Duration::from_secs(config.http.timeout_seconds));

    let listener = TcpListener::bind(config.listen_addr()).await?;
    let addr = listener.local_addr()?;

    info!("🚀 员工档案维护台运行在 http://{}", addr);
    info!("📖 可用端点:");
    info!("   GET  /                      - 登录 / 操作菜单");
    info!("   GET  /employees/view        - 查询员工详情");
    info!("   GET  /employees/update      - 修改员工信息");
    info!("   GET  /transfers             - 转账");
    info!("   GET  /api/employees/:ssn    - 查询员工 (Bearer 口令)");
    info!("   PUT  /api/employees/:ssn    - 修改员工 (Bearer 口令)");
    info!("   POST /api/transfers         - 转账 (Bearer 口令)");
    info!("   GET  /health                - 健康检查");

    axum::serve(listener, app).await?;

    Ok(())
}
