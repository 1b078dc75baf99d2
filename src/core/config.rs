use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub query: QueryConfig,
    pub auth: AuthConfig,
}

/// Backend connection settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every resource path is joined onto (e.g. `https://api.desa.id/api`)
    pub base_url: String,
    /// Ceiling for ordinary requests
    pub timeout: Duration,
    /// Ceiling for multipart uploads
    pub upload_timeout: Duration,
    pub user_agent: String,
}

/// Caching and retry policy for read queries
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// How long a cached result is served without a network call
    pub stale_time: Duration,
    /// How long an unused entry is kept before being pruned
    pub cache_time: Duration,
    /// Retries after the first attempt, never more than 2
    pub max_retries: u32,
    pub retry_base_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Directory holding the persisted cookie and local-storage files
    pub storage_dir: PathBuf,
    /// Entry point the client is sent to after a forced logout
    pub login_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            api: ApiConfig::from_env()?,
            query: QueryConfig::from_env()?,
            auth: AuthConfig::from_env()?,
        })
    }
}

impl ApiConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 120;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("DESA_API_URL")
            .map_err(|_| "DESA_API_URL environment variable is required".to_string())?;

        let timeout_secs = env::var("API_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "API_TIMEOUT_SECS must be a valid number".to_string())?;

        let upload_timeout_secs = env::var("UPLOAD_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_UPLOAD_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "UPLOAD_TIMEOUT_SECS must be a valid number".to_string())?;

        let user_agent = env::var("API_USER_AGENT")
            .unwrap_or_else(|_| format!("desa-portal-client/{}", env!("CARGO_PKG_VERSION")));

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            upload_timeout: Duration::from_secs(upload_timeout_secs),
            user_agent,
        })
    }

    /// Config pointing at `base_url` with default timeouts
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(Self::DEFAULT_UPLOAD_TIMEOUT_SECS),
            user_agent: format!("desa-portal-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl QueryConfig {
    const DEFAULT_STALE_TIME_SECS: u64 = 300; // 5 minutes
    const DEFAULT_CACHE_TIME_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_RETRIES: u32 = 2;
    const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;

    pub fn from_env() -> Result<Self, String> {
        let stale_time_secs = env::var("QUERY_STALE_TIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_STALE_TIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "QUERY_STALE_TIME_SECS must be a valid number".to_string())?;

        let cache_time_secs = env::var("QUERY_CACHE_TIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_CACHE_TIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "QUERY_CACHE_TIME_SECS must be a valid number".to_string())?;

        let max_retries = env::var("QUERY_MAX_RETRIES")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_RETRIES.to_string())
            .parse::<u32>()
            .map_err(|_| "QUERY_MAX_RETRIES must be a valid number".to_string())?;

        let retry_base_delay_ms = env::var("QUERY_RETRY_BASE_DELAY_MS")
            .unwrap_or_else(|_| Self::DEFAULT_RETRY_BASE_DELAY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "QUERY_RETRY_BASE_DELAY_MS must be a valid number".to_string())?;

        Ok(Self {
            stale_time: Duration::from_secs(stale_time_secs),
            cache_time: Duration::from_secs(cache_time_secs),
            max_retries: max_retries.min(Self::DEFAULT_MAX_RETRIES),
            retry_base_delay: Duration::from_millis(retry_base_delay_ms),
        })
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(Self::DEFAULT_STALE_TIME_SECS),
            cache_time: Duration::from_secs(Self::DEFAULT_CACHE_TIME_SECS),
            max_retries: Self::DEFAULT_MAX_RETRIES,
            retry_base_delay: Duration::from_millis(Self::DEFAULT_RETRY_BASE_DELAY_MS),
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, String> {
        let storage_dir = env::var("AUTH_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join("desa-portal"));

        let login_path = env::var("LOGIN_PATH").unwrap_or_else(|_| "/admin/login".to_string());

        Ok(Self {
            storage_dir,
            login_path,
        })
    }
}
