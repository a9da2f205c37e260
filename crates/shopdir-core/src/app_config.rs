use crate::hours::TimeContext;

#[derive(Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub log_level: String,
    pub timezone: TimeContext,
    pub default_radius_km: f64,
    pub nearby_limit: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("log_level", &self.log_level)
            .field("timezone", &self.timezone)
            .field("default_radius_km", &self.default_radius_km)
            .field("nearby_limit", &self.nearby_limit)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish()
    }
}
