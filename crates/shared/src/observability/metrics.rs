//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集与导出。
//! 指标通过独立的 HTTP 端口暴露，供 Prometheus 抓取。

use anyhow::Result;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Metrics 资源守卫
pub struct MetricsHandle {
    _server_handle: tokio::task::JoinHandle<()>,
}

/// 初始化 Prometheus 指标导出
///
/// 启动一个独立的 HTTP 服务器在指定端口暴露 `/metrics` 端点。
pub async fn init(service_name: &str, port: u16) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    register_common_metrics(service_name);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let server_handle = start_metrics_server(addr, handle).await?;

    Ok(MetricsHandle {
        _server_handle: server_handle,
    })
}

/// 注册业务指标描述（出现在 /metrics 的 HELP 注释中）
fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!("http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!("badge_awards_total", "Total number of badges awarded");
    metrics::describe_counter!("peak_ascents_total", "Total number of recorded peak ascents");
    metrics::describe_counter!("hikes_recorded_total", "Total number of recorded hikes");
    metrics::describe_counter!(
        "route_planner_requests_total",
        "Total number of route planner calls"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

/// 启动指标 HTTP 服务器
async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = Router::new()
        .route("/metrics", get(move || std::future::ready(handle.render())))
        .route("/health", get(|| async { "OK" }));

    let listener = TcpListener::bind(addr).await?;
    info!("Metrics server listening on {}", addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(server_handle)
}

/// 记录 HTTP 请求
#[inline]
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status_str = status.to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str
    )
    .record(duration_secs);
}

/// 记录徽章发放
///
/// kind: "threshold" 或 "special"
#[inline]
pub fn record_badge_award(code: &str, kind: &str) {
    metrics::counter!(
        "badge_awards_total",
        "code" => code.to_string(),
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// 记录登顶
#[inline]
pub fn record_peak_ascent(status: &str) {
    metrics::counter!("peak_ascents_total", "status" => status.to_string()).increment(1);
}

/// 记录徒步轨迹写入
#[inline]
pub fn record_hike(status: &str) {
    metrics::counter!("hikes_recorded_total", "status" => status.to_string()).increment(1);
}

/// 记录路线规划调用
#[inline]
pub fn record_route_planner_request(status: &str) {
    metrics::counter!("route_planner_requests_total", "status" => status.to_string())
        .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_functions_do_not_panic() {
        // 即使没有初始化 recorder，这些函数也不应该 panic
        record_http_request("GET", "/peaks", 200, 0.1);
        record_badge_award("TATRA_1", "threshold");
        record_badge_award("MORNING", "special");
        record_peak_ascent("success");
        record_hike("failed");
        record_route_planner_request("unavailable");
    }
}
