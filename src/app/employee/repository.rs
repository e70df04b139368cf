//! 员工数据存储接口

use async_trait::async_trait;

use super::model::{Employee, EmployeeField};
use super::validation::Ssn;

/// 存储层错误，消息直接展示给操作员
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Connection(String),
    #[error("{0}")]
    Query(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// 每个方法对应一条 SQL 语句，不跨语句开事务
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// `SELECT ssn, first_name, last_name, email, city, balance FROM employees WHERE ssn = ?`
    async fn fetch_by_ssn(&self, ssn: &Ssn) -> Result<Option<Employee>, StoreError>;

    /// `UPDATE employees SET <column> = ? WHERE ssn = ?`，返回受影响行数
    async fn update_field(
        &self,
        ssn: &Ssn,
        field: EmployeeField,
        value: &str,
    ) -> Result<u64, StoreError>;

    /// 连通性检查
    async fn ping(&self) -> Result<(), StoreError>;
}
