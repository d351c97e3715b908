/// 통화 기호 기본값(나이라).
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₦";

/// 소수 둘째 자리까지 반올림하고 천 단위 쉼표를 넣는다. 예: `47029.0` → `47,029.00`
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// 통화 기호를 붙인 가격 문자열. 예: `₦47,029.00`
pub fn format_price(value: f64, currency_symbol: &str) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(rest) => format!("-{currency_symbol}{rest}"),
        None => format!("{currency_symbol}{amount}"),
    }
}

/// 범위/가중치 표에 쓰는 숫자 표기. 정수면 쉼표 구분, 아니면 유효 자릿수만 남긴다.
pub fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() >= 1000.0 {
        let s = format_amount(value);
        s.trim_end_matches(".00").to_string()
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_thousands() {
        assert_eq!(format_price(47_029.0, "₦"), "₦47,029.00");
        assert_eq!(format_price(300_000.0, "₦"), "₦300,000.00");
        assert_eq!(format_price(20_000.0, "$"), "$20,000.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(12.5), "12.50");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn negative_and_zero() {
        assert_eq!(format_price(-1_500.0, "₦"), "-₦1,500.00");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn plain_numbers() {
        assert_eq!(format_plain(1_500_000.0), "1,500,000");
        assert_eq!(format_plain(500.0), "500");
        assert_eq!(format_plain(0.00001), "0.00001");
        assert_eq!(format_plain(0.035), "0.035");
    }
}
