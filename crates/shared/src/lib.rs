//! CrownHike 共享库
//!
//! 提供各服务共用的基础设施组件：配置、数据库连接、错误类型、可观测性与测试工具。

pub mod config;
pub mod database;
pub mod error;
pub mod observability;
pub mod test_utils;

pub use error::{InfraError, Result};
