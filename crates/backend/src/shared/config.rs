use contracts::dashboards::d400_order_summary::StockThresholds;
use once_cell::sync::OnceCell;
use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub stock: StockConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Store API the orders and products are read from.
///
/// `{user_id}` and `{order_id}` in the paths are replaced with the
/// url-encoded identifier.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub orders_path: String,
    pub products_path: String,
    pub user_orders_path: String,
    pub ordered_products_path: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
            orders_path: "/get-total-orders".to_string(),
            products_path: "/get-products".to_string(),
            user_orders_path: "/order-list/{user_id}".to_string(),
            ordered_products_path: "/ordered-products/{order_id}".to_string(),
        }
    }
}

impl UpstreamConfig {
    /// Join `base_url` and a path, tolerating slashes on either side
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn orders_url(&self) -> String {
        self.url(&self.orders_path)
    }

    pub fn products_url(&self) -> String {
        self.url(&self.products_path)
    }

    pub fn user_orders_url(&self, user_id: &str) -> String {
        self.url(
            &self
                .user_orders_path
                .replace("{user_id}", &urlencoding::encode(user_id)),
        )
    }

    pub fn ordered_products_url(&self, order_id: &str) -> String {
        self.url(
            &self
                .ordered_products_path
                .replace("{order_id}", &urlencoding::encode(order_id)),
        )
    }
}

/// Пороги складских остатков
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct StockConfig {
    pub low_stock_max: i64,
    pub out_of_stock_max: i64,
}

impl Default for StockConfig {
    fn default() -> Self {
        let thresholds = StockThresholds::default();
        Self {
            low_stock_max: thresholds.low_stock_max,
            out_of_stock_max: thresholds.out_of_stock_max,
        }
    }
}

impl StockConfig {
    pub fn thresholds(&self) -> StockThresholds {
        StockThresholds {
            low_stock_max: self.low_stock_max,
            out_of_stock_max: self.out_of_stock_max,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[upstream]
base_url = "http://localhost:5000"
timeout_secs = 30
orders_path = "/get-total-orders"
products_path = "/get-products"
user_orders_path = "/order-list/{user_id}"
ordered_products_path = "/ordered-products/{order_id}"

[stock]
low_stock_max = 10
out_of_stock_max = 1
"#;

/// Parse and validate a config document
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    config
        .stock
        .thresholds()
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid [stock] section: {}", e))?;
    if config.upstream.timeout_secs == 0 {
        anyhow::bail!("invalid [upstream] section: timeout_secs must be positive");
    }
    Ok(config)
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

/// Load the configuration once; later calls return the same instance
pub fn init() -> anyhow::Result<&'static Config> {
    CONFIG.get_or_try_init(load_config)
}

/// Loaded configuration, defaults when [`init`] has not run
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
