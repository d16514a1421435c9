// Server configuration from environment variables

use std::time::Duration;

/// Configuration for the API server, loaded once at startup
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Path to the model endpoint config file
    pub model_config_path: String,

    /// Path to the custom model store file
    pub custom_models_path: String,

    /// How old a custom model may get before the sweeper expires it
    pub retention: Duration,

    /// Pause between sweeps
    pub sweep_interval: Duration,

    /// Listen port
    pub port: u16,
}

impl ApiConfig {
    /// Read configuration from the environment, falling back to defaults
    /// that match the system this replaces.
    pub fn from_env() -> Self {
        Self {
            model_config_path: std::env::var("MODEL_CONFIG_PATH")
                .unwrap_or_else(|_| "model_config.json".to_string()),
            custom_models_path: std::env::var("CUSTOM_MODELS_PATH")
                .unwrap_or_else(|_| "custom_models.json".to_string()),
            retention: Duration::from_secs(env_u64(
                "CUSTOM_MODEL_RETENTION_SECS",
                roundtable_store::sweeper::DEFAULT_RETENTION_SECS,
            )),
            sweep_interval: Duration::from_secs(env_u64(
                "SWEEP_INTERVAL_SECS",
                roundtable_store::sweeper::DEFAULT_SWEEP_INTERVAL_SECS,
            )),
            port: env_u64("PORT", 5000) as u16,
        }
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
