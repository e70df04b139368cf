//! 员工业务服务
//!
//! 每个操作的流程相同：校验格式，规范化 SSN，最多执行一条 SQL。

use std::sync::Arc;
use tracing::{info, warn};

use super::model::{Employee, EmployeeField, TransferReceipt, UpdateOutcome};
use super::repository::EmployeeStore;
use super::validation::{parse_amount, validate_email_format, Ssn, ValidationError};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// 按 SSN 查询；`Ok(None)` 表示没有这个员工
    pub async fn view(&self, ssn_input: &str) -> Result<Option<Employee>, CoreError> {
        let ssn = Ssn::parse(ssn_input)?;
        let employee = self.store.fetch_by_ssn(&ssn).await?;
        if employee.is_none() {
            info!("未找到员工: {}", ssn);
        }
        Ok(employee)
    }

    /// 改写单个字段
    ///
    /// 不检查员工是否存在，受影响行数为 0 同样视为成功。
    pub async fn update(
        &self,
        ssn_input: &str,
        field: EmployeeField,
        new_value: &str,
    ) -> Result<UpdateOutcome, CoreError> {
        let ssn = Ssn::parse(ssn_input)?;
        if field == EmployeeField::Email && !validate_email_format(new_value) {
            return Err(ValidationError::Email.into());
        }

        let rows_affected = self.store.update_field(&ssn, field, new_value).await?;
        if rows_affected == 0 {
            warn!("更新 {} 未影响任何行: {}", field.column(), ssn);
        } else {
            info!("已更新 {}: {}", field.column(), ssn);
        }

        Ok(UpdateOutcome {
            ssn,
            field,
            value: new_value.to_string(),
            rows_affected,
        })
    }

    /// 转账只做输入校验并返回回执，不读写数据库
    pub fn transfer(
        &self,
        from_input: &str,
        to_input: &str,
        amount_input: &str,
    ) -> Result<TransferReceipt, CoreError> {
        let (from, to) = match (Ssn::parse(from_input), Ssn::parse(to_input)) {
            (Ok(from), Ok(to)) => (from, to),
            _ => return Err(ValidationError::Ssn.into()),
        };
        let amount = parse_amount(amount_input)?;

        info!("转账请求: {} -> {} 金额 {}", from, to, amount);
        Ok(TransferReceipt { from, to, amount })
    }

    pub async fn ping(&self) -> Result<(), CoreError> {
        self.store.ping().await?;
        Ok(())
    }
}
