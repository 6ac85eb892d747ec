use order_engine::{replay, setup_environment};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志) 并加载配置
    let config = setup_environment()?;

    // 2. 读取订单导出 (文件参数或 stdin)
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    tracing::info!(
        input = %path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<stdin>".into()),
        tax_rate = config.tax_rate,
        "Replaying order history"
    );
    let orders = replay::read_orders(path.as_deref())?;

    // 3. 生成小票并输出 JSON
    let report = replay::replay(&orders, &config.receipt_options());
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
