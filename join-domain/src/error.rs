//! 领域层统一错误定义
//!
//! 聚焦序列化、标识解析与查找失败等最小必要集合，
//! 便于在应用层统一转换。
//!
use thiserror::Error;

/// 统一错误类型（领域最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("parse error: {reason}")]
    Parse { reason: String },
    #[error("not found: {entity} id={id}")]
    NotFound { entity: &'static str, id: String },
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl From<std::num::ParseIntError> for DomainError {
    fn from(err: std::num::ParseIntError) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}
