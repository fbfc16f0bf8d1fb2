use crate::error::{AppError, AppResult};
use regex::Regex;

/// 校验电话号码形态
/// 购票表单不限定国家/地区，只做宽松的结构检查：
/// 可带 + 前缀与常见分隔符，数字位数 7-15
pub fn validate_phone(phone: &str) -> AppResult<()> {
    let shape = Regex::new(r"^\+?[0-9()\-\s]{7,20}$").unwrap();

    if !shape.is_match(phone) {
        return Err(AppError::ValidationError(
            "Invalid phone number format".to_string(),
        ));
    }

    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=15).contains(&digits) {
        return Err(AppError::ValidationError(
            "Phone number must contain 7-15 digits".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+919876543210").is_ok());
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("(234) 567-8901").is_ok());
        assert!(validate_phone("12345").is_err()); // 位数不足
        assert!(validate_phone("abc1234567").is_err()); // 非法字符
        assert!(validate_phone("+123456789012345678").is_err()); // 超长
    }
}
