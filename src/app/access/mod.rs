//! 口令门禁与会话

pub mod handler;
pub mod session;

/// 逐字节比较，不去空白也不忽略大小写
pub fn verify_password(candidate: &str, expected: &str) -> bool {
    candidate.as_bytes() == expected.as_bytes()
}
