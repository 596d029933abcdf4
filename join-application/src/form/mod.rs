//! 表单（Form）
//!
//! 以强类型记录表达一个实体的编辑表单：
//! - 标识字段为只读（[`ReadOnly`]），表单中可见但没有任何修改入口；
//! - 业务字段集中在可变的 `*FormValues` 中，并通过 `validator` 标注必填；
//! - 校验失败以字段级错误（[`ValidationErrors`]）暴露给展示层，而不是抛出错误。
//!
mod categoria;
mod produto;

pub use categoria::{
    CategoriaFormGroup, CategoriaFormInput, CategoriaFormService, CategoriaFormValues,
};
pub use produto::{ProdutoFormGroup, ProdutoFormInput, ProdutoFormService, ProdutoFormValues};

use crate::resource::Resource;
use join_domain::entity::Entity;
use validator::ValidationErrors;

/// 从表单提取的实体：标识非空时为已持久化形状，否则为新建形状
#[derive(Debug, Clone, PartialEq)]
pub enum Draft<E, N> {
    Persisted(E),
    New(N),
}

impl<E: Entity, N> Draft<E, N> {
    pub fn id(&self) -> Option<&E::Id> {
        match self {
            Draft::Persisted(entity) => Some(entity.id()),
            Draft::New(_) => None,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Draft::New(_))
    }
}

/// 只读控件
///
/// 值在构造表单时确定，之后只能随整个表单一起重建。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnly<T>(Option<T>);

impl<T> ReadOnly<T> {
    pub(crate) fn new(value: Option<T>) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub const fn disabled(&self) -> bool {
        true
    }
}

/// 控件描述，供展示层渲染必填/禁用状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub required: bool,
    pub disabled: bool,
}

/// 一个实体的编辑表单
pub trait FormGroup {
    /// 全部控件（含只读标识）
    fn fields(&self) -> &'static [FormField];

    /// 校验可编辑字段；禁用控件不参与校验
    fn validate(&self) -> Result<(), ValidationErrors>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// 未通过校验的字段名（按名称排序）
    fn invalid_fields(&self) -> Vec<String> {
        let mut names: Vec<String> = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors.field_errors().keys().map(|k| k.to_string()).collect(),
        };
        names.sort();
        names
    }
}

/// 表单服务：构造、提取与重置
///
/// `Input` 的 `Default` 即表单默认值（标识为空，即新建模式）。
pub trait EntityFormService: Send + Sync {
    type Entity: Resource;
    type Input: Default + From<Self::Entity>;
    type Group: FormGroup;

    /// 以输入构造表单，标识置为只读
    fn create_form_group(&self, input: Self::Input) -> Self::Group;

    /// 读取原始值（包括只读标识）
    fn get_entity(
        &self,
        form: &Self::Group,
    ) -> Draft<Self::Entity, <Self::Entity as Resource>::New>;

    /// 以新输入重建表单
    fn reset_form(&self, form: &mut Self::Group, input: Self::Input) {
        *form = self.create_form_group(input);
    }
}
