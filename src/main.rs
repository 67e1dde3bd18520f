use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use schooldesk::config::AppConfig;
use schooldesk::models::AppStartTime;
use schooldesk::routes;
use schooldesk::runtime::lifetime;
use schooldesk::utils::{json_error_handler, query_error_handler};

/// 初始化日志：开发环境输出带文件行号的文本，其余环境输出 JSON
fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.app.log_level))
        .with_writer(writer)
        .with_level(true);

    if config.is_development() {
        builder
            .with_ansi(true)
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        builder.with_ansi(false).json().init();
    }
    guard
}

/// 管理面板与 API 分开部署，放开跨域；凭据走 Authorization 头
fn build_cors(config: &AppConfig) -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(config.cors.max_age)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    setup_panic!();

    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    AppConfig::init().map_err(|e| std::io::Error::other(format!("Configuration error: {e}")))?;
    let config = AppConfig::get();
    let _log_guard = init_tracing(config);

    info!(
        "{} v{} starting in {} mode",
        config.app.system_name,
        env!("CARGO_PKG_VERSION"),
        config.app.environment,
    );

    // 建库、迁移、初始化管理员
    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| std::io::Error::other(e.format_simple()))?;
    let storage = startup.storage;

    debug!(
        "Startup finished in {} ms",
        (chrono::Utc::now() - app_start_time.start_datetime).num_milliseconds()
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(config))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Cache-Control", "no-store")),
            )
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PayloadConfig::new(config.server.limits.max_payload_size))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(routes::configure_api_routes)
    })
    .keep_alive(std::time::Duration::from_secs(
        config.server.timeouts.keep_alive,
    ))
    .client_request_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_request,
    ))
    .client_disconnect_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_disconnect,
    ))
    .workers(config.server.workers);

    #[cfg(unix)]
    let server = match config.unix_socket_path() {
        Some(socket_path) => {
            // 上次异常退出会残留套接字文件
            if std::path::Path::new(socket_path).exists() {
                std::fs::remove_file(socket_path)?;
            }
            info!("Listening on unix:{} ({} workers)", socket_path, config.server.workers);
            server.bind_uds(socket_path)?
        }
        None => {
            let address = config.server_bind_address();
            info!("Listening on http://{} ({} workers)", address, config.server.workers);
            server.bind(address)?
        }
    };

    #[cfg(not(unix))]
    let server = {
        let address = config.server_bind_address();
        info!("Listening on http://{} ({} workers)", address, config.server.workers);
        server.bind(address)?
    };

    tokio::select! {
        res = server.run() => res?,
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("{} stopped", config.app.system_name);
        }
    }

    Ok(())
}
