//! 员工数据模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::Ssn;

/// `employees` 表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Employee {
    pub ssn: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city: String,
    pub balance: Decimal,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 允许修改的列
///
/// 列名只来自这个枚举，从不取自用户输入。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeField {
    LastName,
    Email,
    City,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 3] = [Self::LastName, Self::Email, Self::City];

    /// 数据库列名
    pub fn column(self) -> &'static str {
        match self {
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::City => "city",
        }
    }

    /// 界面上显示的名称
    pub fn label(self) -> &'static str {
        match self {
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::City => "City",
        }
    }

    /// 按列名查找，用于表单单选框的取值
    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.column() == column)
    }
}

impl fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 单列更新的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateOutcome {
    pub ssn: Ssn,
    pub field: EmployeeField,
    pub value: String,
    pub rows_affected: u64,
}

impl UpdateOutcome {
    pub fn message(&self) -> String {
        format!("{} updated successfully.", self.field.label())
    }
}

/// 转账回执，只用于展示，不改动任何余额
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferReceipt {
    pub from: Ssn,
    pub to: Ssn,
    pub amount: Decimal,
}

impl TransferReceipt {
    pub fn message(&self) -> String {
        format!(
            "Transferred ${} from {} to {}.",
            self.amount, self.from, self.to
        )
    }
}
