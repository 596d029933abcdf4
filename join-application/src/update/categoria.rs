use super::{Navigator, SaveErrorHandler, SaveOutcome, SaveWorkflow, UpdateState};
use crate::context::AppContext;
use crate::form::{CategoriaFormGroup, CategoriaFormService};
use crate::service::EntityService;
use join_domain::Categoria;
use std::sync::Arc;

/// Categoria 编辑页，没有关联实体
pub struct CategoriaUpdate {
    workflow: SaveWorkflow<CategoriaFormService>,
}

impl CategoriaUpdate {
    pub fn new(service: Arc<dyn EntityService<Categoria>>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            workflow: SaveWorkflow::new(CategoriaFormService, service, navigator),
        }
    }

    pub fn with_error_handler(mut self, handler: Arc<dyn SaveErrorHandler>) -> Self {
        self.workflow = self.workflow.with_error_handler(handler);
        self
    }

    pub fn init(&mut self, categoria: Option<Categoria>) {
        self.workflow.begin_loading(categoria);
        self.workflow.finish_loading();
    }

    pub async fn save(&mut self, ctx: &AppContext) -> SaveOutcome<Categoria> {
        self.workflow.save(ctx).await
    }

    pub fn edit_form(&self) -> &CategoriaFormGroup {
        self.workflow.edit_form()
    }

    pub fn edit_form_mut(&mut self) -> &mut CategoriaFormGroup {
        self.workflow.edit_form_mut()
    }

    pub fn can_submit(&self) -> bool {
        self.workflow.can_submit()
    }

    pub fn is_saving(&self) -> bool {
        self.workflow.is_saving()
    }

    pub fn state(&self) -> UpdateState {
        self.workflow.state()
    }
}
