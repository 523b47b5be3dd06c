use std::path::PathBuf;

/// Runtime settings resolved from the environment with sensible defaults.
///
/// - `SEHAT_SERVICE_HOST`: bind address (default `127.0.0.1`)
/// - `SEHAT_SERVICE_PORT`: listen port (default `8000`)
/// - `SEHAT_MODEL_DIR`: artifact directory (default `models`)
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub model_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            model_dir: PathBuf::from("models"),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("SEHAT_SERVICE_HOST").unwrap_or(defaults.host),
            port: std::env::var("SEHAT_SERVICE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            model_dir: std::env::var("SEHAT_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_baseline() {
        let settings = Settings::default();
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.model_dir, PathBuf::from("models"));
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let settings = Settings {
            host: "0.0.0.0".to_string(),
            port: 9000,
            model_dir: PathBuf::from("models"),
        };
        assert_eq!(settings.bind_addr(), "0.0.0.0:9000");
    }
}
