//! 编辑页流程（Update Workflow）
//!
//! 状态机：`Idle → Loading → Ready → Saving → (Success | Error → Ready)`。
//! 保存时按表单标识分派到 `create` 或 `update`，无论结果如何都会先执行收尾
//! （清除 `is_saving`），成功后经 [`Navigator`] 返回上一页，失败则交给
//! [`SaveErrorHandler`] 并回到 `Ready` 以便重试。
//!
mod categoria;
mod produto;

pub use categoria::CategoriaUpdate;
pub use produto::ProdutoUpdate;

use crate::form::{Draft, EntityFormService, FormGroup};
use crate::service::EntityService;
use crate::{context::AppContext, error::AppError, resource::Resource};
use join_domain::entity::Entity;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateState {
    #[default]
    Idle,
    Loading,
    Ready,
    Saving,
    Success,
    Error,
}

/// 保存结果；失败细节只交给 [`SaveErrorHandler`]
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome<E> {
    Saved(E),
    Failed,
}

impl<E> SaveOutcome<E> {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }
}

/// 页面导航
pub trait Navigator: Send + Sync {
    /// 返回上一页
    fn previous_state(&self);
}

/// 保存失败钩子
pub trait SaveErrorHandler: Send + Sync {
    fn on_save_error(&self, err: &AppError);
}

impl<F> SaveErrorHandler for F
where
    F: Fn(&AppError) + Send + Sync,
{
    fn on_save_error(&self, err: &AppError) {
        self(err)
    }
}

/// 默认钩子：不做任何事
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreSaveError;

impl SaveErrorHandler for IgnoreSaveError {
    fn on_save_error(&self, _err: &AppError) {}
}

/// 保存期间持有；释放时清除 `is_saving`，未决的 `Saving` 回到 `Ready`
struct SavingGuard<'a> {
    is_saving: &'a mut bool,
    state: &'a mut UpdateState,
}

impl<'a> SavingGuard<'a> {
    fn begin(is_saving: &'a mut bool, state: &'a mut UpdateState) -> Self {
        *is_saving = true;
        *state = UpdateState::Saving;
        Self { is_saving, state }
    }
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        *self.is_saving = false;
        if *self.state == UpdateState::Saving {
            *self.state = UpdateState::Ready;
        }
    }
}

/// 与具体实体无关的编辑/保存核心
pub struct SaveWorkflow<F: EntityFormService> {
    form_service: F,
    service: Arc<dyn EntityService<F::Entity>>,
    navigator: Arc<dyn Navigator>,
    error_handler: Arc<dyn SaveErrorHandler>,
    edit_form: F::Group,
    entity: Option<F::Entity>,
    is_saving: bool,
    state: UpdateState,
}

impl<F: EntityFormService> SaveWorkflow<F> {
    pub fn new(
        form_service: F,
        service: Arc<dyn EntityService<F::Entity>>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let edit_form = form_service.create_form_group(F::Input::default());
        Self {
            form_service,
            service,
            navigator,
            error_handler: Arc::new(IgnoreSaveError),
            edit_form,
            entity: None,
            is_saving: false,
            state: UpdateState::Idle,
        }
    }

    pub fn with_error_handler(mut self, handler: Arc<dyn SaveErrorHandler>) -> Self {
        self.error_handler = handler;
        self
    }

    /// 进入 `Loading`；有实体时以其重建表单，否则重建为默认（新建）表单
    pub fn begin_loading(&mut self, entity: Option<F::Entity>) {
        self.state = UpdateState::Loading;
        let input = entity.clone().map(F::Input::from).unwrap_or_default();
        self.form_service.reset_form(&mut self.edit_form, input);
        self.entity = entity;
    }

    pub fn finish_loading(&mut self) {
        self.state = UpdateState::Ready;
    }

    /// 保存；future 被丢弃（超时、取消）时同样执行收尾
    pub async fn save(&mut self, ctx: &AppContext) -> SaveOutcome<F::Entity> {
        let finalize = SavingGuard::begin(&mut self.is_saving, &mut self.state);

        let result = match self.form_service.get_entity(&self.edit_form) {
            Draft::Persisted(entity) => self.service.update(ctx, entity).await,
            Draft::New(entity) => self.service.create(ctx, entity).await,
        };

        drop(finalize);
        match result {
            Ok(saved) => self.on_save_success(saved),
            Err(err) => self.on_save_error(err),
        }
    }

    fn on_save_success(&mut self, saved: F::Entity) -> SaveOutcome<F::Entity> {
        let resource = <F::Entity as Resource>::NAME;
        tracing::info!(resource, id = %saved.id(), "saved");
        self.state = UpdateState::Success;
        self.navigator.previous_state();
        SaveOutcome::Saved(saved)
    }

    fn on_save_error(&mut self, err: AppError) -> SaveOutcome<F::Entity> {
        let resource = <F::Entity as Resource>::NAME;
        tracing::warn!(resource, error = %err, "save failed");
        self.state = UpdateState::Error;
        self.error_handler.on_save_error(&err);
        self.state = UpdateState::Ready;
        SaveOutcome::Failed
    }

    /// 表单有效且没有进行中的保存
    pub fn can_submit(&self) -> bool {
        !self.is_saving && self.edit_form.is_valid()
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn state(&self) -> UpdateState {
        self.state
    }

    /// 初始化时传入的实体（新建模式下为 `None`）
    pub fn entity(&self) -> Option<&F::Entity> {
        self.entity.as_ref()
    }

    pub fn edit_form(&self) -> &F::Group {
        &self.edit_form
    }

    pub fn edit_form_mut(&mut self) -> &mut F::Group {
        &mut self.edit_form
    }

    pub fn form_service(&self) -> &F {
        &self.form_service
    }
}
