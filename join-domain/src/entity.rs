//! 实体（Entity）基础抽象
//!
//! 已持久化实体拥有不可变的唯一标识；新建变体与其同形，但标识恒为 null，
//! 由后端在保存时分配。
//!
use serde::de::{Error as _, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt::Display, hash::Hash, str::FromStr};

/// 具备唯一标识的已持久化实体
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示、可比较与可克隆
    type Id: FromStr + Clone + Display + Eq + Hash + Send + Sync;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;
}

/// 尚未持久化的实体（标识恒为 null）
pub trait NewEntity: Send + Sync + Sized {
    type Persisted: Entity;

    /// 后端分配标识后转换为已持久化形状
    fn with_id(self, id: <Self::Persisted as Entity>::Id) -> Self::Persisted;

    /// 丢弃标识，得到同值的新建变体
    fn from_persisted(entity: Self::Persisted) -> Self;
}

/// 恒为 null 的标识
///
/// 序列化为 `null`；反序列化仅接受 `null` 或缺省。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NullId;

impl Serialize for NullId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_none()
    }
}

impl<'de> Deserialize<'de> for NullId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<IgnoredAny>::deserialize(deserializer)? {
            None => Ok(NullId),
            Some(_) => Err(D::Error::custom("a new entity cannot already have an ID")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Wrapper {
        #[serde(default)]
        id: NullId,
    }

    #[test]
    fn null_id_serializes_as_null() {
        let json = serde_json::to_string(&Wrapper { id: NullId }).unwrap();
        assert_eq!(json, r#"{"id":null}"#);
    }

    #[test]
    fn null_id_accepts_null_or_missing() {
        let a: Wrapper = serde_json::from_str(r#"{"id":null}"#).unwrap();
        let b: Wrapper = serde_json::from_str("{}").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn null_id_rejects_value() {
        let err = serde_json::from_str::<Wrapper>(r#"{"id":7}"#).unwrap_err();
        assert!(err.to_string().contains("cannot already have an ID"));
    }
}
