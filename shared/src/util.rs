use crate::types::Timestamp;
use serde_json::Value;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

/// Read a timestamp written by any client version
///
/// Accepts Unix milliseconds (number or numeric string), Unix seconds
/// (values below 10^11) and RFC 3339 strings.
pub fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).map(normalize_epoch),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                return Some(normalize_epoch(n));
            }
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.timestamp_millis())
        }
        _ => None,
    }
}

fn normalize_epoch(n: i64) -> Timestamp {
    // Seconds-precision epochs from older clients
    if n.abs() < 100_000_000_000 { n * 1000 } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_timestamp_variants() {
        assert_eq!(parse_timestamp(&json!(1_700_000_000_000i64)), Some(1_700_000_000_000));
        assert_eq!(parse_timestamp(&json!(1_700_000_000)), Some(1_700_000_000_000));
        assert_eq!(parse_timestamp(&json!("1700000000000")), Some(1_700_000_000_000));
        assert_eq!(
            parse_timestamp(&json!("2023-11-14T22:13:20Z")),
            Some(1_700_000_000_000)
        );
        assert_eq!(parse_timestamp(&json!("yesterday")), None);
        assert_eq!(parse_timestamp(&json!(null)), None);
    }

    #[test]
    fn test_now_millis_is_positive() {
        assert!(now_millis() > 0);
    }
}
