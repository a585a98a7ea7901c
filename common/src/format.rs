//! 表示用フォーマット
//!
//! 結果JSONは緩く型付けされているため、欠損値や文字列の数値をここで吸収する。
//! - 文字列欠損 → "N/A"
//! - 数値欠損/非数値 → 0
//! - 金額は US ロケール（桁区切り）で小数2桁固定

use serde_json::Value;

/// 欠損文字列の表示
pub const NOT_AVAILABLE: &str = "N/A";

/// JSONの値が「真」か（null・空文字・0・false は偽）
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 値をそのまま文字列化（文字列は引用符なし）
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(|f| f.to_string()).unwrap_or_default()
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// 文字列フィールドの表示（偽値は "N/A"）
pub fn text_or_na(value: &Value) -> String {
    if is_truthy(value) {
        display_text(value)
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// 数量など、数値をそのまま表示（偽値は "0"）
pub fn number_or_zero(value: &Value) -> String {
    if is_truthy(value) {
        display_text(value)
    } else {
        "0".to_string()
    }
}

/// 数値への変換（非数値・欠損は 0）
///
/// 文字列は先頭から読める範囲だけを数値として扱う（"12.5 USD" → 12.5）。
pub fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_float_prefix(s).unwrap_or(0.0),
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// 文字列先頭の浮動小数点数を読む
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // 指数部は数字が続く場合のみ
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// US ロケールの金額表記（小数2桁・桁区切り）
pub fn format_amount(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.00 は符号なし
    let negative = amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac_part)
}

/// ドル表記
pub fn format_usd(amount: f64) -> String {
    format!("${}", format_amount(amount))
}

/// JSON値を金額表記に（欠損は $0.00）
pub fn currency_field(value: &Value) -> String {
    format_usd(coerce_number(value))
}

/// ファイルサイズの表示（1024単位、小数2桁まで・末尾の0は省略）
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut scaled = bytes as f64;
    let mut exp = 0;
    while scaled >= 1024.0 && exp < UNITS.len() - 1 {
        scaled /= 1024.0;
        exp += 1;
    }

    let mut text = format!("{:.2}", scaled);
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    format!("{} {}", text, UNITS[exp])
}
