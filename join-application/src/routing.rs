//! 路由（Routing）
//!
//! 每个实体注册一条顶层路由：路径段、页面标题键与一个延迟加载的实体模块。
//! 模块在首次激活时加载并缓存（[`tokio::sync::OnceCell`]），加载失败不会被缓存，
//! 下次激活会重试。
//!
use crate::error::AppError;
use crate::update::Navigator;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;

type ModuleFuture = Pin<Box<dyn Future<Output = Result<Arc<dyn EntityModule>, AppError>> + Send>>;

type ModuleLoader = Arc<dyn Fn() -> ModuleFuture + Send + Sync>;

/// 子路由对应的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    List,
    View,
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRoute {
    pub path: &'static str,
    pub action: RouteAction,
}

const CRUD_ROUTES: &[ChildRoute] = &[
    ChildRoute {
        path: "",
        action: RouteAction::List,
    },
    ChildRoute {
        path: ":id/view",
        action: RouteAction::View,
    },
    ChildRoute {
        path: "new",
        action: RouteAction::Create,
    },
    ChildRoute {
        path: ":id/edit",
        action: RouteAction::Edit,
    },
];

/// 延迟加载的实体模块
pub trait EntityModule: Send + Sync {
    fn name(&self) -> &'static str;

    fn child_routes(&self) -> &'static [ChildRoute] {
        CRUD_ROUTES
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProdutoModule;

impl EntityModule for ProdutoModule {
    fn name(&self) -> &'static str {
        "produto"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoriaModule;

impl EntityModule for CategoriaModule {
    fn name(&self) -> &'static str {
        "categoria"
    }
}

pub struct EntityRoute {
    path: &'static str,
    page_title: &'static str,
    loader: ModuleLoader,
    module: OnceCell<Arc<dyn EntityModule>>,
}

impl EntityRoute {
    pub fn new<F, Fut>(path: &'static str, page_title: &'static str, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn EntityModule>, AppError>> + Send + 'static,
    {
        Self {
            path,
            page_title,
            loader: Arc::new(move || Box::pin(loader()) as ModuleFuture),
            module: OnceCell::new(),
        }
    }

    /// 以现成的模块构造（加载总是成功）
    pub fn eager<M: EntityModule + Clone + 'static>(
        path: &'static str,
        page_title: &'static str,
        module: M,
    ) -> Self {
        Self::new(path, page_title, move || {
            let module = module.clone();
            async move { Ok(Arc::new(module) as Arc<dyn EntityModule>) }
        })
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn page_title(&self) -> &'static str {
        self.page_title
    }

    pub fn is_loaded(&self) -> bool {
        self.module.initialized()
    }

    pub async fn module(&self) -> Result<Arc<dyn EntityModule>, AppError> {
        let module = self
            .module
            .get_or_try_init(|| {
                tracing::debug!(route = self.path, "loading entity module");
                (self.loader)()
            })
            .await
            .map_err(|err| match err {
                AppError::ModuleLoad { .. } => err,
                other => AppError::ModuleLoad {
                    route: self.path,
                    reason: other.to_string(),
                },
            })?;
        Ok(Arc::clone(module))
    }
}

impl std::fmt::Debug for EntityRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRoute")
            .field("path", &self.path)
            .field("page_title", &self.page_title)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// 解析后的 URL：顶层路由 + 子路由 + 可选的 `:id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub path: &'static str,
    pub page_title: &'static str,
    pub action: RouteAction,
    pub id: Option<String>,
}

/// 路由注册表
#[derive(Debug, Default)]
pub struct RouteRegistrar {
    routes: Vec<EntityRoute>,
}

impl RouteRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// 默认实体路由：`produto`、`categoria`
    pub fn entity_routes() -> Self {
        let mut registrar = Self::new();
        registrar.register(EntityRoute::eager(
            "produto",
            "joinAppApp.produto.home.title",
            ProdutoModule,
        ));
        registrar.register(EntityRoute::eager(
            "categoria",
            "joinAppApp.categoria.home.title",
            CategoriaModule,
        ));
        registrar
    }

    /// 注册路由；同一路径后注册者覆盖前者
    pub fn register(&mut self, route: EntityRoute) {
        self.routes.retain(|r| r.path != route.path);
        self.routes.push(route);
    }

    pub fn routes(&self) -> &[EntityRoute] {
        &self.routes
    }

    pub fn find(&self, path: &str) -> Option<&EntityRoute> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// 激活顶层路由，必要时加载模块
    pub async fn activate(&self, path: &str) -> Result<Arc<dyn EntityModule>, AppError> {
        let route = self
            .find(path)
            .ok_or_else(|| AppError::RouteNotFound(path.to_string()))?;
        route.module().await
    }

    /// 解析形如 `produto/42/edit` 的 URL，并激活其模块
    pub async fn resolve(&self, url: &str) -> Result<RouteMatch, AppError> {
        let url = url.trim_matches('/');
        let (head, rest) = url.split_once('/').unwrap_or((url, ""));
        let route = self
            .find(head)
            .ok_or_else(|| AppError::RouteNotFound(url.to_string()))?;
        let module = route.module().await?;

        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        module
            .child_routes()
            .iter()
            .find_map(|child| match_child(child, &segments))
            .map(|(action, id)| RouteMatch {
                path: route.path,
                page_title: route.page_title,
                action,
                id,
            })
            .ok_or_else(|| AppError::RouteNotFound(url.to_string()))
    }
}

fn match_child(child: &ChildRoute, segments: &[&str]) -> Option<(RouteAction, Option<String>)> {
    let pattern: Vec<&str> = child.path.split('/').filter(|s| !s.is_empty()).collect();
    if pattern.len() != segments.len() {
        return None;
    }
    let mut id = None;
    for (expected, actual) in pattern.iter().zip(segments) {
        if *expected == ":id" {
            id = Some((*actual).to_string());
        } else if expected != actual {
            return None;
        }
    }
    Some((child.action, id))
}

/// 基于栈的浏览历史
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&self, url: impl Into<String>) {
        let url = url.into();
        tracing::debug!(%url, "navigate");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url);
    }

    pub fn current(&self) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Navigator for History {
    fn previous_state(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.pop();
        tracing::debug!(current = ?entries.last(), "history back");
    }
}
