use rust_decimal::Decimal;

/// Format an amount with Indian digit grouping: ₹1,23,456.78
pub fn money(val: Decimal, symbol: &str) -> String {
    let negative = val.is_sign_negative() && !val.is_zero();
    let fixed = format!("{:.2}", val.abs().round_dp(2));
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let split = digits.len().saturating_sub(3);
    groups.push(digits[split..].iter().collect());
    let mut rest = &digits[..split];
    while !rest.is_empty() {
        let cut = rest.len().saturating_sub(2);
        groups.push(rest[cut..].iter().collect());
        rest = &rest[..cut];
    }
    groups.reverse();
    let grouped = groups.join(",");

    if negative {
        format!("-{symbol}{grouped}.{dec_part}")
    } else {
        format!("{symbol}{grouped}.{dec_part}")
    }
}
