use bon::Builder;

/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用（保存/查询）所需的横切信息，例如：
/// - 关联追踪 `correlation_id`：随请求以 `X-Correlation-Id` 头发送，并写入日志；
/// - 操作者 `actor_id`：仅用于日志与审计，不参与鉴权。
///
/// 典型用法：
/// ```rust
/// use join_application::context::AppContext;
///
/// let ctx = AppContext::builder()
///     .maybe_correlation_id(Some("cor-123".into()))
///     .maybe_actor_id(Some("admin".into()))
///     .build();
/// assert_eq!(ctx.correlation_id(), Some("cor-123"));
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct AppContext {
    correlation_id: Option<String>,
    actor_id: Option<String>,
}

impl AppContext {
    /// 生成带随机关联 ID 的上下文，用于一次表单会话
    pub fn traced() -> Self {
        Self {
            correlation_id: Some(uuid::Uuid::new_v4().to_string()),
            actor_id: None,
        }
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }
}
