//! 表单输入的格式校验
//!
//! SSN 只接受两种形状：9 位连续数字，或 `XXX-XX-XXXX`。
//! 9 位数字写库前统一转成带横线的形式。

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// 校验失败的原因，`Display` 即界面上的提示文字
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid SSN format.")]
    Ssn,
    #[error("Invalid email format. Update failed.")]
    Email,
    #[error("Please enter a valid amount.")]
    Amount,
    #[error("Please enter an amount greater than 0.")]
    NonPositiveAmount,
}

pub fn validate_ssn_format(ssn: &str) -> bool {
    let bytes = ssn.as_bytes();
    match bytes.len() {
        9 => bytes.iter().all(u8::is_ascii_digit),
        11 => bytes.iter().enumerate().all(|(i, b)| match i {
            3 | 6 => *b == b'-',
            _ => b.is_ascii_digit(),
        }),
        _ => false,
    }
}

/// 9 位数字转成 `XXX-XX-XXXX`，其余输入原样返回
pub fn format_ssn(ssn: &str) -> String {
    if ssn.len() == 9 && ssn.is_ascii() {
        format!("{}-{}-{}", &ssn[..3], &ssn[3..5], &ssn[5..])
    } else {
        ssn.to_string()
    }
}

pub fn validate_email_format(email: &str) -> bool {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
        .is_match(email)
}

/// 转账金额：必须是数字且大于 0
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let amount = Decimal::from_str(input.trim()).map_err(|_| ValidationError::Amount)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(amount.normalize())
}

/// 校验并规范化过的 SSN，内部总是 `XXX-XX-XXXX`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ssn(String);

impl Ssn {
    /// 原样校验，首尾带空白的输入同样视为格式错误
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if !validate_ssn_format(input) {
            return Err(ValidationError::Ssn);
        }
        Ok(Self(format_ssn(input)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ssn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Ssn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Ssn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
