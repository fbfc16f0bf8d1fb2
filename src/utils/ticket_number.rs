/// 由占用的原始号码派生展示票号：前缀 + 4位补零
/// 同一前缀下该映射是单射，号码不同则展示串必不同
pub fn format_ticket_number(prefix: &str, number: i64) -> String {
    format!("{prefix}{number:04}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_format_ticket_number() {
        assert_eq!(format_ticket_number("LUCKY-", 151), "LUCKY-0151");
        assert_eq!(format_ticket_number("LUCKY-", 2000), "LUCKY-2000");
        assert_eq!(format_ticket_number("LUCKY-", 7), "LUCKY-0007");
    }

    #[test]
    fn test_format_keeps_digits_beyond_width() {
        // 补零宽度为下限而不是截断
        assert_eq!(format_ticket_number("LUCKY-", 10001), "LUCKY-10001");
    }

    #[test]
    fn test_format_injective_over_range() {
        let all: HashSet<String> = (151..=2000)
            .map(|n| format_ticket_number("LUCKY-", n))
            .collect();
        assert_eq!(all.len(), 1850);
    }
}
