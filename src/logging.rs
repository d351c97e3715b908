use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// tracing 구독자를 초기화한다. `RUST_LOG`가 없으면 `default_filter`를 사용한다.
///
/// 대화형 프롬프트와 섞이지 않도록 로그는 stderr로 보낸다. 두 번째 호출부터는 무시된다.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}
