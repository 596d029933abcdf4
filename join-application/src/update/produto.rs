use super::{Navigator, SaveErrorHandler, SaveOutcome, SaveWorkflow, UpdateState};
use crate::form::{ProdutoFormGroup, ProdutoFormService};
use crate::service::{EntityService, PageRequest};
use crate::{context::AppContext, error::AppError};
use join_domain::related::{add_to_collection_if_missing, compare};
use join_domain::{Categoria, CategoriaRef, Produto};
use std::sync::Arc;

/// Produto 编辑页
///
/// 除通用保存流程外，还维护分类下拉选项 `categorias_shared_collection`：
/// 当前产品引用的分类即使不在查询结果中，也会被追加到列表里。
pub struct ProdutoUpdate {
    workflow: SaveWorkflow<ProdutoFormService>,
    categoria_service: Arc<dyn EntityService<Categoria>>,
    categorias_shared_collection: Vec<Categoria>,
    options_page: PageRequest,
    options_error: Option<String>,
}

impl ProdutoUpdate {
    pub fn new(
        produto_service: Arc<dyn EntityService<Produto>>,
        categoria_service: Arc<dyn EntityService<Categoria>>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            workflow: SaveWorkflow::new(ProdutoFormService, produto_service, navigator),
            categoria_service,
            categorias_shared_collection: Vec::new(),
            options_page: PageRequest::default(),
            options_error: None,
        }
    }

    pub fn with_error_handler(mut self, handler: Arc<dyn SaveErrorHandler>) -> Self {
        self.workflow = self.workflow.with_error_handler(handler);
        self
    }

    /// 选项列表的分页参数（默认第 0 页、20 条）
    pub fn with_options_page(mut self, page: PageRequest) -> Self {
        self.options_page = page;
        self
    }

    /// 以路由解析出的产品（新建时为 `None`）初始化页面
    pub async fn init(&mut self, ctx: &AppContext, produto: Option<Produto>) {
        self.categorias_shared_collection.clear();
        self.options_error = None;
        self.workflow.begin_loading(produto);
        if let Some(current) = self.current_categoria() {
            self.update_form(current);
        }
        self.load_relationships_options(ctx).await;
        self.workflow.finish_loading();
    }

    fn current_categoria(&self) -> Option<Categoria> {
        self.workflow
            .entity()
            .and_then(|produto| produto.categoria.clone())
            .map(Categoria::from)
    }

    fn update_form(&mut self, current: Categoria) {
        let collection = std::mem::take(&mut self.categorias_shared_collection);
        self.categorias_shared_collection =
            add_to_collection_if_missing(collection, [Some(current)]);
    }

    async fn load_relationships_options(&mut self, ctx: &AppContext) {
        let result = self.categoria_service.query(ctx, &self.options_page).await;
        match result {
            Ok(categorias) => {
                self.options_error = None;
                self.categorias_shared_collection =
                    add_to_collection_if_missing(categorias, [self.current_categoria()]);
            }
            Err(err) => self.on_options_error(err),
        }
    }

    fn on_options_error(&mut self, err: AppError) {
        tracing::warn!(error = %err, "failed to load categoria options");
        self.options_error = Some(err.to_string());
    }

    pub async fn save(&mut self, ctx: &AppContext) -> SaveOutcome<Produto> {
        self.workflow.save(ctx).await
    }

    /// 按标识比较两个分类（选择控件用）
    pub fn compare_categoria(a: Option<&Categoria>, b: Option<&Categoria>) -> bool {
        compare(a, b)
    }

    /// 将下拉选中的分类写入表单
    pub fn select_categoria(&mut self, categoria: Option<&Categoria>) {
        self.workflow.edit_form_mut().values_mut().categoria = categoria.map(CategoriaRef::from);
    }

    /// 当前表单选中的分类在选项列表中的条目
    pub fn selected_categoria(&self) -> Option<&Categoria> {
        let selected = self.workflow.edit_form().values().categoria.as_ref()?;
        self.categorias_shared_collection
            .iter()
            .find(|c| compare(Some(*c), Some(selected)))
    }

    pub fn categorias_shared_collection(&self) -> &[Categoria] {
        &self.categorias_shared_collection
    }

    /// 最近一次加载选项失败的原因
    pub fn options_error(&self) -> Option<&str> {
        self.options_error.as_deref()
    }

    pub fn edit_form(&self) -> &ProdutoFormGroup {
        self.workflow.edit_form()
    }

    pub fn edit_form_mut(&mut self) -> &mut ProdutoFormGroup {
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
