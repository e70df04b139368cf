//! 员工档案：查询、单字段修改、转账回执

pub mod api;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;
pub mod validation;
