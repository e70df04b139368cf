//! 进程内员工存储，用于演示和测试

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::app::employee::model::{Employee, EmployeeField};
use crate::app::employee::repository::{EmployeeStore, StoreError};
use crate::app::employee::validation::Ssn;

#[derive(Default)]
pub struct MemoryEmployeeStore {
    rows: RwLock<HashMap<String, Employee>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let rows = employees
            .into_iter()
            .map(|employee| (employee.ssn.clone(), employee))
            .collect();
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub fn with_sample_data() -> Self {
        Self::with_employees(sample_employees())
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 演示用样例数据
pub fn sample_employees() -> Vec<Employee> {
    [
        ("123-45-6789", "John", "Smith", "john.smith@example.com", "Chicago", 150000),
        ("987-65-4321", "Maria", "Garcia", "maria.garcia@example.com", "Houston", 275050),
        ("555-12-3456", "Wei", "Chen", "wei.chen@example.com", "Seattle", 9925),
    ]
    .into_iter()
    .map(|(ssn, first, last, email, city, cents)| Employee {
        ssn: ssn.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        city: city.to_string(),
        balance: Decimal::new(cents, 2),
    })
    .collect()
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn fetch_by_ssn(&self, ssn: &Ssn) -> Result<Option<Employee>, StoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(rows.get(ssn.as_str()).cloned())
    }

    async fn update_field(
        &self,
        ssn: &Ssn,
        field: EmployeeField,
        value: &str,
    ) -> Result<u64, StoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let Some(employee) = rows.get_mut(ssn.as_str()) else {
            return Ok(0);
        };

        let slot = match field {
            EmployeeField::LastName => &mut employee.last_name,
            EmployeeField::Email => &mut employee.email,
            EmployeeField::City => &mut employee.city,
        };
        *slot = value.to_string();
        Ok(1)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
