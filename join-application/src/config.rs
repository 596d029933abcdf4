use crate::error::AppError;
use std::time::Duration;

/// 后端 REST 客户端配置，从环境变量加载。
///
/// 所有字段都有适合本地开发的默认值。
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// 后端根地址，不含 `/api`（默认 `http://localhost:8080`）
    pub base_url: String,
    /// 单次请求超时（默认 30 秒）
    pub timeout: Duration,
    /// Bearer token，可选
    pub token: Option<String>,
    /// 关联实体选项列表的分页大小（默认 20）
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            timeout: Duration::from_secs(30),
            token: None,
            page_size: 20,
        }
    }
}

impl ClientConfig {
    /// 从环境变量加载配置
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `JOIN_API_BASE_URL`     | `http://localhost:8080` |
    /// | `JOIN_API_TIMEOUT_SECS` | `30`                    |
    /// | `JOIN_API_TOKEN`        | 未设置                  |
    /// | `JOIN_PAGE_SIZE`        | `20`                    |
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 以任意键值来源加载，便于测试
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("JOIN_API_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);

        let timeout = match lookup("JOIN_API_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("JOIN_API_TIMEOUT_SECS", &raw)?),
            None => defaults.timeout,
        };

        let token = lookup("JOIN_API_TOKEN").filter(|s| !s.trim().is_empty());

        let page_size = match lookup("JOIN_PAGE_SIZE") {
            Some(raw) => parse_number("JOIN_PAGE_SIZE", &raw)?,
            None => defaults.page_size,
        };

        Ok(Self {
            base_url,
            timeout,
            token,
            page_size,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{key} must be a valid number, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.base_url, "http://localhost:8080");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert!(cfg.token.is_none());
        assert_eq!(cfg.page_size, 20);
    }

    #[test]
    fn overrides_and_trims_trailing_slash() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("JOIN_API_BASE_URL", "https://join.example/"),
            ("JOIN_API_TIMEOUT_SECS", "5"),
            ("JOIN_API_TOKEN", "abc"),
            ("JOIN_PAGE_SIZE", "50"),
        ]))
        .unwrap();
        assert_eq!(cfg.base_url, "https://join.example");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.token.as_deref(), Some("abc"));
        assert_eq!(cfg.page_size, 50);
    }

    #[test]
    fn invalid_number_is_config_error() {
        let err = ClientConfig::from_lookup(lookup(&[("JOIN_PAGE_SIZE", "many")])).unwrap_err();
        match err {
            AppError::Config(msg) => assert!(msg.contains("JOIN_PAGE_SIZE")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
