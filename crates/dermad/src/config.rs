/// Daemon configuration, loaded from environment variables.
pub struct Config {
    /// Path to the classifier ONNX model file.
    pub model_path: String,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Depth of the inference request queue; requests beyond it wait on the
    /// channel send.
    pub queue_depth: usize,
}

impl Config {
    /// Load configuration from `DERMA_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            model_path: std::env::var("DERMA_MODEL_PATH")
                .unwrap_or_else(|_| "models/skin16_b0.onnx".to_string()),
            bind_addr: std::env::var("DERMA_BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
            queue_depth: env_usize("DERMA_QUEUE_DEPTH", 4),
        }
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
