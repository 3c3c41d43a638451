/// 用 ANSI 红色加粗包裹文本
pub fn red_and_bold(text: &str) -> String {
    format!("\x1b[91m\x1b[1m{}\x1b[0m", text)
}

/// 警告前缀，`color` 为 false 时不加修饰
pub fn warning_label(color: bool) -> String {
    if color {
        red_and_bold("Warning:")
    } else {
        "Warning:".to_string()
    }
}

/// 以两位小数显示兆字节数
pub fn format_megabytes(megabytes: f64) -> String {
    format!("{:.2}", megabytes)
}
