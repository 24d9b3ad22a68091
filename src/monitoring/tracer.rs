/*!
 * Diagnostic Tracing
 * Structured tracing for the supervisor lifecycle using the tracing crate
 *
 * All diagnostics go to stderr. The default filter is `warn` so that a run
 * without RUST_LOG adds nothing to the wrapped program's output.
 */

use crate::config::HookPoint;
use std::time::Instant;
use tracing::{debug, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Hooks running longer than this are reported at warn level
const SLOW_HOOK_MS: u64 = 5_000;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: warn)
/// - PROCWRAP_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let use_json = std::env::var("PROCWRAP_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
    }
}

/// Generate a unique ID correlating all diagnostics of one supervisor run
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one hook execution
pub struct HookSpan {
    span: tracing::Span,
    start: Instant,
    hook: HookPoint,
}

impl HookSpan {
    pub fn new(hook: HookPoint, program: &str) -> Self {
        let span = span!(
            Level::DEBUG,
            "hook",
            hook = %hook,
            program = program,
            duration_ms = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        span.in_scope(|| debug!(hook = %hook, program = program, "hook started"));

        Self {
            span,
            start: Instant::now(),
            hook,
        }
    }

    /// Record the hook result
    pub fn record_result(&self, success: bool) {
        self.span
            .record("result", if success { "success" } else { "error" });
    }

    /// Record an error
    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
        self.span.record("result", "error");
    }
}

impl Drop for HookSpan {
    fn drop(&mut self) {
        let duration_ms = self.start.elapsed().as_millis() as u64;
        let _entered = self.span.enter();
        self.span.record("duration_ms", duration_ms);

        if duration_ms > SLOW_HOOK_MS {
            warn!(
                hook = %self.hook,
                duration_ms,
                slow = true,
                "slow hook detected"
            );
        } else {
            debug!(
                hook = %self.hook,
                duration_ms,
                "hook completed"
            );
        }
    }
}
