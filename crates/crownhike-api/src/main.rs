//! CrownHike API 服务
//!
//! 徒步记录与徽章系统的 REST API。

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use axum::{http::HeaderValue, middleware};
use crownhike_api::{AppState, api_routes, middleware::security_headers};
use crownhike_core::OpenRouteServicePlanner;
use crownhike_shared::{
    config::{AppConfig, CorsConfig},
    database::Database,
    observability::{self, middleware as obs_middleware},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};
use tracing::{error, info, warn};

const SERVICE_NAME: &str = "crownhike-api";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(SERVICE_NAME).context("加载配置失败")?;

    let _guard = observability::init(&config.service_name, &config.observability).await?;

    // 生产环境必须通过 CROWNHIKE_AUTH__JWT_SECRET 注入密钥
    if config.auth.uses_default_secret() {
        if config.is_production() {
            bail!("CROWNHIKE_AUTH__JWT_SECRET must be set in production environment");
        }
        warn!("Using default JWT secret - set CROWNHIKE_AUTH__JWT_SECRET for production");
    }

    info!(
        environment = %config.environment,
        "Starting {} on {}",
        SERVICE_NAME,
        config.server_addr()
    );

    let db = Database::connect(&config.database).await?;
    if config.database.run_migrations {
        db.run_migrations().await?;
    }

    let planner = OpenRouteServicePlanner::new(&config.route_planner)?;
    if !planner.is_configured() {
        warn!("Route planner API key not set - GET /peaks/{{id}}/route will be unavailable");
    }

    match config.awards.fixed_offset() {
        Some(offset) => info!(offset = %offset, "Badge award time zone: fixed offset"),
        None => info!("Badge award time zone: server local time"),
    }

    let state = AppState::new(
        db.pool().clone(),
        &config.auth,
        &config.awards,
        Arc::new(planner),
    );

    let app = api_routes(state)
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer(&config.cors, config.is_production()))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        // 可观测性中间件：请求追踪和指标收集
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id));

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 收到 SIGTERM 或 Ctrl+C 时停止接收新连接并等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// CORS 配置：`*` 允许所有来源，否则为逗号分隔的来源列表
fn cors_layer(config: &CorsConfig, production: bool) -> CorsLayer {
    if config.allowed_origins.trim() == "*" {
        if production {
            warn!("CORS allowed_origins=\"*\" 在生产环境中不安全，请设置为具体域名");
        }
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!("CORS allowed_origins: {}", config.allowed_origins);
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 监听关闭信号
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "注册 Ctrl+C 处理器失败");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "注册 SIGTERM 处理器失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
