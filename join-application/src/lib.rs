//! join 应用层（join-application）
//!
//! 表单、实体服务（HTTP 与内存实现）、编辑页保存流程与路由注册。
//!
pub mod config;
pub mod context;
pub mod error;
pub mod form;
pub mod http_service;
pub mod inmemory_service;
pub mod resource;
pub mod routing;
pub mod service;
pub mod update;

pub use http_service::HttpEntityService;
pub use inmemory_service::InMemoryEntityService;
pub use routing::{History, RouteRegistrar};
pub use update::{CategoriaUpdate, ProdutoUpdate};
