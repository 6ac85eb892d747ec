//! Order engine - 购物车合并与订单定制项归一化
//!
//! # 模块结构
//!
//! ```text
//! order-engine/src/
//! ├── core/            # 配置
//! ├── cart/            # 合并键 (identity key)、购物车、校验
//! ├── customizations/  # 历史订单定制项归一化
//! ├── receipt/         # 小票组装
//! ├── money.rs         # rust_decimal 金额计算
//! ├── replay.rs        # 历史订单导出重放
//! └── utils/           # 日志
//! ```
//!
//! Everything except `replay` and `utils::logger` is pure and synchronous:
//! no I/O, no shared state, safe to call from any thread.

pub mod cart;
pub mod core;
pub mod customizations;
pub mod money;
pub mod receipt;
pub mod replay;
pub mod utils;

// Re-export 公共类型
pub use cart::{Cart, CartError, IdentityKeyMode, identity_key, identity_key_with};
pub use crate::core::Config;
pub use customizations::{ShapeError, extract_customizations, try_extract_customizations};
pub use receipt::{CheckoutInfo, ReceiptOptions, build_receipt, receipt_from_cart, receipt_item};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置环境 (dotenv, 日志)
pub fn setup_environment() -> anyhow::Result<Config> {
    // .env is optional
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    Ok(config)
}
