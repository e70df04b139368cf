//! 核心层：错误、响应、中间件和页面渲染

pub mod error;
pub mod middleware;
pub mod page;
pub mod response;
