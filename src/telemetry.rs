use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec, Encoder, TextEncoder};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: CounterVec = register_counter_vec!(
        "trivia_quiz_questions_served_total",
        "Questions handed out by the quiz endpoint",
        &["category"]
    )
    .unwrap();
    pub static ref QUESTION_WRITES: CounterVec = register_counter_vec!(
        "trivia_question_writes_total",
        "Successful question inserts and deletes",
        &["operation"]
    )
    .unwrap();
}

/// Installs the global subscriber.
///
/// `LOG_LEVEL` takes an `EnvFilter` directive and falls back to `default_directive`.
/// Setting `INCLUDE_SPAN_EVENTS=true` logs span enter/exit as well.
pub fn init_tracing(default_directive: &str) {
    let span_events = if std::env::var("INCLUDE_SPAN_EVENTS")
        .is_ok_and(|value| value.eq_ignore_ascii_case("true"))
    {
        FmtSpan::ENTER | FmtSpan::EXIT
    } else {
        FmtSpan::NONE
    };
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_span_events(span_events))
        .try_init();
}

/// Renders every registered metric in the Prometheus text format.
pub fn render_metrics() -> Result<(String, Vec<u8>), prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buf = vec![];
    encoder.encode(&prometheus::gather(), &mut buf)?;
    Ok((encoder.format_type().to_owned(), buf))
}
