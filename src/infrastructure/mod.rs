//! 基础设施层：存储后端与日志

#[cfg(feature = "database")]
pub mod database;
pub mod logger;
pub mod memory;

use std::sync::Arc;
use tracing::info;

use crate::app::employee::repository::EmployeeStore;
use crate::config::{Backend, DatabaseConfig};

/// 按配置选择员工存储后端
pub fn build_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn EmployeeStore>> {
    match config.backend {
        Backend::Memory => {
            let store = memory::MemoryEmployeeStore::with_sample_data();
            info!("使用内存存储，样例员工 {} 名", store.len());
            Ok(Arc::new(store))
        }
        #[cfg(feature = "database")]
        Backend::Mysql => {
            let manager = database::DatabaseManager::connect_lazy(config)?;
            Ok(Arc::new(manager.into_store()))
        }
        #[cfg(not(feature = "database"))]
        Backend::Mysql => anyhow::bail!("MySQL 后端需要启用 database feature"),
    }
}
