use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://your-frontend-domain.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    /// Origins allowed to call the API from a browser. Requests without an
    /// `Origin` header are always accepted.
    pub allowed_origins: Vec<String>,

    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub insight_timeout_secs: u64,

    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".into())
                .parse()
                .expect("PORT must be a number"),

            allowed_origins: parse_origins(
                &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.into()),
            ),

            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_else(|_| String::new()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".into()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into()),
            insight_timeout_secs: env::var("INSIGHT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("INSIGHT_TIMEOUT_SECS must be a number"),

            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".into())
                .into(),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "10485760".into()) // 10 MiB
                .parse()
                .expect("MAX_UPLOAD_BYTES must be a number"),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn insight_timeout(&self) -> Duration {
        Duration::from_secs(self.insight_timeout_secs)
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
impl Config {
    /// Configuration for router tests: local upload dir, no real provider.
    pub fn for_tests(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            gemini_api_key: "test-key".into(),
            gemini_model: "gemini-test".into(),
            gemini_base_url: "http://127.0.0.1:9".into(),
            insight_timeout_secs: 5,
            upload_dir: upload_dir.into(),
            max_upload_bytes: 1024 * 1024,
        }
    }
}
