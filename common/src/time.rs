//! 再生位置の丸めと表示

/// 経過秒を `m:ss` 形式に整形
///
/// 負数・NaN・無限大は0として扱う。
pub fn format_time(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// 小数点以下3桁に丸める（分割位置の保存形式）
///
/// 2進数の値そのものを10進3桁に丸める。ちょうど中間の値は絶対値の大きい側。
/// 1918.0075 は実際には 1918.00749999... なので 1918.007 になる。
pub fn round_millis(seconds: f64) -> f64 {
    if !seconds.is_finite() {
        return seconds;
    }
    let magnitude = seconds.abs();
    let doubled = magnitude * 2000.0;
    // 積が誤差なく奇数の整数になる場合だけが真の中間値
    let exact_tie = magnitude.mul_add(2000.0, -doubled) == 0.0
        && doubled.fract() == 0.0
        && doubled % 2.0 == 1.0;
    let text = if exact_tie {
        format!("{:.3}", (doubled + 1.0) / 2000.0)
    } else {
        format!("{:.3}", magnitude)
    };
    text.parse::<f64>().unwrap_or(magnitude).copysign(seconds)
}

/// 分割位置として使える秒数に正規化（非有限値は0、負数は0、3桁に丸め）
pub fn split_position(seconds: f64) -> f64 {
    if seconds.is_finite() {
        round_millis(seconds.max(0.0))
    } else {
        0.0
    }
}

/// 秒数の配列をJSON配列として表記（整数値は小数部なし）
pub fn format_times(times: &[f64]) -> String {
    let items: Vec<String> = times.iter().map(|t| format_number(*t)).collect();
    format!("[{}]", items.join(","))
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
