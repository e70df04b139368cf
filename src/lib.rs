//! # 员工档案维护台
//!
//! 单操作员使用的员工档案 Web 表单，包括：
//! - 共享口令门禁和浏览器会话
//! - 按 SSN 查询员工详情
//! - 修改姓氏、邮箱或城市中的一个字段
//! - 转账表单（只校验输入并给出回执，不改动余额）
//! - 同样功能的 JSON 接口和健康检查
//!
//! 存储后端为 MySQL，另有进程内样例数据后端用于演示和测试。

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{create_routes, AppState};
pub use config::Config;
