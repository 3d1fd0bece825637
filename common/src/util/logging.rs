use std::future::Future;
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{info, LevelFilter};

static MULTI: OnceLock<MultiProgress> = OnceLock::new();

pub fn init(log_level: LevelFilter) {
    let logger = env_logger::builder()
        .filter_level(log_level)
        .parse_default_env() // Allow overriding log level through RUST_LOG env var
        .build();

    let multi = MultiProgress::new();

    let wrapper = LogWrapper::new(multi.clone(), logger);
    if wrapper.try_init().is_ok() {
        let _ = MULTI.set(multi);
    }
}

fn spinner(task_desc: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner()
        .with_message(format!("{}...", task_desc))
        .with_style(
            ProgressStyle::with_template("{spinner:.white} [{elapsed:.green}] {msg}")
                .expect("spinner template is valid"),
        );
    pb.enable_steady_tick(Duration::from_millis(100));

    // Route through the shared MultiProgress so log lines don't jump around
    if let Some(multi) = MULTI.get() {
        multi.add(pb.clone());
    }

    pb
}

fn finish(pb: ProgressBar, target: &str, task_desc: &str, start_time: SystemTime) {
    pb.finish_and_clear();
    if let Some(multi) = MULTI.get() {
        multi.remove(&pb);
    }
    if let Ok(elapsed) = start_time.elapsed() {
        let elapsed = indicatif::HumanDuration(elapsed);
        info!(target: target, "{} finished (took {})", task_desc, elapsed);
    }
}

pub fn run_with_spinner<F, Out>(target: &str, task_desc: &str, function: F) -> Out
where
    F: FnOnce() -> Out,
{
    let start_time = SystemTime::now();
    let pb = spinner(task_desc);

    let out = function();

    finish(pb, target, task_desc, start_time);
    out
}

pub async fn run_with_spinner_async<F, Fut, Out>(target: &str, task_desc: &str, function: F) -> Out
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Out>,
{
    let start_time = SystemTime::now();
    let pb = spinner(task_desc);

    let out = function().await;

    finish(pb, target, task_desc, start_time);
    out
}
