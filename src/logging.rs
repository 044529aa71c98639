use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::path::Path;
use std::time::Instant;
use tracing::{Subscriber, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

const LOG_DIR: &str = "storage/logs";

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "Incoming request"
    );

    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    match status {
        400..=499 => warn!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms,
            "Client error"
        ),
        500..=599 => error!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms,
            "Server error"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms,
            "Request completed"
        ),
    }

    response
}

/// Error file (`tavern.log`) and JSON file (`tavern.json`) layers rolling
/// daily under `dir`. Buffered lines reach disk when the guards are dropped.
pub fn file_layers<S>(dir: &Path) -> (impl Layer<S> + Send + Sync, Vec<WorkerGuard>)
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let error_appender = RollingFileAppender::new(Rotation::DAILY, dir, "tavern.log");
    let (error_writer, error_guard) = tracing_appender::non_blocking(error_appender);

    let error_layer = fmt::layer()
        .with_writer(error_writer)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    // Structured logs for ingestion
    let json_appender = RollingFileAppender::new(Rotation::DAILY, dir, "tavern.json");
    let (json_writer, json_guard) = tracing_appender::non_blocking(json_appender);

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_writer)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    (error_layer.and_then(json_layer), vec![error_guard, json_guard])
}

/// Console, error file and JSON file logging.
///
/// Files roll daily under `storage/logs`. If that directory cannot be
/// created only the console layer is installed. The returned guards flush the
/// file writers and must be dropped before the process exits.
pub fn init_tracing() -> Vec<WorkerGuard> {
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,tavern_db=info,tower_http=warn,axum::rejection=trace",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    if let Err(e) = std::fs::create_dir_all(LOG_DIR) {
        tracing_subscriber::registry().with(console_layer).init();
        warn!(error = %e, "Could not create {}, logging to console only", LOG_DIR);
        return Vec::new();
    }

    let (files, guards) = file_layers(Path::new(LOG_DIR));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(files)
        .init();

    guards
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(dir: &Path, prefix: &str) -> String {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
            .map(|entry| std::fs::read_to_string(entry.path()).unwrap())
            .collect()
    }

    #[test]
    fn test_file_layers_flush_when_guards_drop() {
        let dir = std::env::temp_dir().join(format!("tavern-logs-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let (files, guards) = file_layers(&dir);
        let subscriber = tracing_subscriber::registry().with(files);
        tracing::subscriber::with_default(subscriber, || {
            error!("listener bind failed");
            info!("state initialized");
        });
        drop(guards);

        let errors = read_all(&dir, "tavern.log");
        assert!(errors.contains("listener bind failed"));
        assert!(!errors.contains("state initialized"));

        let json = read_all(&dir, "tavern.json");
        assert!(json.contains("state initialized"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
