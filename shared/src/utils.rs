use serde_json::Value;

// 文本清洗工具函数

/// 将任意 JSON 值转换为去除首尾空白的字符串。
///
/// `null`、`false`、`0` 与缺失值一样视为空字符串；
/// 数组和对象不是合法的表单值，同样视为空。
pub fn sanitize_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// 去除首尾空白，空字符串返回 `None`
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 解析逗号分隔的来源列表，保留顺序并丢弃空项
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// 验证工具函数
pub fn validate_email(email: &str) -> bool {
    email.contains('@')
}

/// 解析正整数月数；`"3"`、`"3.0"` 均可，`"0"`、`"-1"`、`"1.5"` 不行
pub fn parse_positive_integer(value: &str) -> Option<u32> {
    if let Ok(n) = value.parse::<u32>() {
        return (n >= 1).then_some(n);
    }

    let n = value.parse::<f64>().ok()?;
    if n.is_finite() && n.fract() == 0.0 && n >= 1.0 && n <= f64::from(u32::MAX) {
        Some(n as u32)
    } else {
        None
    }
}

/// 读取 JSON 对象中的字符串字段，数字会被转换为字符串
pub fn string_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
