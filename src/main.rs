use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use academy_scheduler::config::{AppConfig, CorsConfig};
use academy_scheduler::routes;
use academy_scheduler::runtime::lifetime;
use academy_scheduler::utils::{json_error_handler, path_error_handler, query_error_handler};

/// 初始化日志：开发环境带文件行号，其余环境输出 JSON
fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.app.log_level))
        .with_writer(writer)
        .event_format(
            tracing_subscriber::fmt::format()
                .with_level(true)
                .with_ansi(true),
        );

    if config.is_development() {
        builder.with_file(true).with_line_number(true).init();
    } else {
        builder.json().init();
    }
    guard
}

/// 按配置构建 CORS，"*" 表示不限制
fn build_cors(cors: &CorsConfig) -> Cors {
    let any = |values: &[String]| values.iter().any(|v| v == "*");
    let mut policy = Cors::default().max_age(cors.max_age);

    policy = if any(&cors.allowed_origins) {
        policy.allow_any_origin()
    } else {
        cors.allowed_origins
            .iter()
            .fold(policy, |policy, origin| policy.allowed_origin(origin))
    };
    policy = if any(&cors.allowed_methods) {
        policy.allow_any_method()
    } else {
        policy.allowed_methods(cors.allowed_methods.iter().map(String::as_str))
    };
    if any(&cors.allowed_headers) {
        policy.allow_any_header()
    } else {
        policy.allowed_headers(cors.allowed_headers.iter().map(String::as_str))
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    setup_panic!();

    let booted_at = chrono::Utc::now();

    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();
    let _log_guard = init_tracing(config);

    warn!(
        "{} v{} starting (environment: {}, database: {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment,
        config.database.url
    );
    info!(
        "Scheduling: UTC offset {} min, {} scan weeks per lesson, at most {} lessons per generation, {} boundaries",
        config.scheduling.utc_offset_minutes,
        config.scheduling.scan_weeks_per_lesson,
        config.scheduling.max_lessons_per_generation,
        if config.scheduling.inclusive_boundaries {
            "inclusive"
        } else {
            "exclusive"
        }
    );

    let startup = lifetime::startup::prepare_server_startup().await;
    let storage = startup.storage.clone();
    let lessons = startup.lessons.clone();
    let courses = startup.courses.clone();

    info!(
        "Storage and scheduling services ready in {} ms, {} workers",
        chrono::Utc::now()
            .signed_duration_since(booted_at)
            .num_milliseconds(),
        config.server.workers
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&config.cors))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add((
                        "Keep-Alive",
                        format!("timeout={}, max=1000", config.server.timeouts.keep_alive),
                    ))
                    .add(("Cache-Control", "no-store")),
            )
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .app_data(web::PayloadConfig::new(
                config.server.limits.max_payload_size,
            ))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::from(lessons.clone()))
            .app_data(web::Data::from(courses.clone()))
            .configure(routes::configure_courses_routes)
            .configure(routes::configure_lessons_routes)
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
            warn!("Listening on Unix socket {}", socket_path);
            if std::path::Path::new(socket_path).exists() {
                std::fs::remove_file(socket_path)?;
            }
            server.bind_uds(socket_path)?
        }
        None => {
            warn!("Listening on http://{}", config.server_bind_address());
            server.bind(config.server_bind_address())?
        }
    };

    #[cfg(not(unix))]
    let server = {
        warn!("Listening on http://{}", config.server_bind_address());
        server.bind(config.server_bind_address())?
    };

    tokio::select! {
        res = server.run() => res?,
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Shutdown signal received, scheduler stopped");
        }
    }

    Ok(())
}
