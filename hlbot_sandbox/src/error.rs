// Errors surfaced by the sandbox binary. The navigation core itself never
// fails; everything here comes from configuration, arguments or output I/O.

use hlbot_nav::error::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
}
