use crate::cart::{Cart, IdentityKeyMode};
use crate::receipt::ReceiptOptions;

/// 引擎配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | (unset) | 日志文件目录 (按天滚动) |
/// | TAX_RATE | 0.0 | 税率 (小数, 0.0825 = 8.25%) |
/// | CART_KEY_MODE | ordered | 购物车合并键: ordered / canonical |
///
/// # 示例
///
/// ```ignore
/// TAX_RATE=0.0825 CART_KEY_MODE=canonical cargo run -- orders.json
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level filter (overridden by RUST_LOG)
    pub log_level: String,
    /// JSON log lines instead of human-readable ones
    pub log_json: bool,
    /// Directory for daily rolling log files
    pub log_dir: Option<String>,
    /// Fractional tax rate for records without a stored tax amount
    pub tax_rate: f64,
    /// Whether topping/sauce order participates in cart merge keys
    pub cart_key_mode: IdentityKeyMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            tax_rate: 0.0,
            cart_key_mode: IdentityKeyMode::Ordered,
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, test maps, ...)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_level: lookup("LOG_LEVEL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_level),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.log_json),
            log_dir: lookup("LOG_DIR").filter(|v| !v.trim().is_empty()),
            tax_rate: lookup("TAX_RATE")
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|r| r.is_finite() && *r >= 0.0)
                .unwrap_or(defaults.tax_rate),
            cart_key_mode: lookup("CART_KEY_MODE")
                .and_then(|v| IdentityKeyMode::parse(&v))
                .unwrap_or(defaults.cart_key_mode),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(tax_rate: f64, cart_key_mode: IdentityKeyMode) -> Self {
        let mut config = Self::from_env();
        config.tax_rate = tax_rate;
        config.cart_key_mode = cart_key_mode;
        config
    }

    pub fn receipt_options(&self) -> ReceiptOptions {
        ReceiptOptions {
            tax_rate: self.tax_rate,
        }
    }

    /// 按配置的合并键模式创建购物车
    pub fn new_cart(&self) -> Cart {
        Cart::with_mode(self.cart_key_mode)
    }
}
