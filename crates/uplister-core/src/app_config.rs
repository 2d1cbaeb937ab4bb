use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the Spree storefront, e.g. `https://shop.example.com`.
    pub admin_base_url: String,
    pub admin_email: String,
    pub admin_password: String,
    pub taxonomy_path: PathBuf,
    pub report_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failed navigation.
    pub max_retries: u32,
    /// Base delay for linear backoff: the n-th retry waits `base * n` ms.
    pub retry_backoff_base_ms: u64,
    /// Spree shipping category assigned to every created product.
    pub shipping_category_id: Option<String>,
    /// Supplier marker appended to every submitted SKU, e.g. `"Trendyol_TR"`.
    pub sku_suffix: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("admin_base_url", &self.admin_base_url)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[redacted]")
            .field("taxonomy_path", &self.taxonomy_path)
            .field("report_dir", &self.report_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("shipping_category_id", &self.shipping_category_id)
            .field("sku_suffix", &self.sku_suffix)
            .finish()
    }
}
