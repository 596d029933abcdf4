use join_application::context::AppContext;
use join_application::error::AppError;
use join_application::form::FormGroup;
use join_application::service::{EntityService, PageRequest};
use join_application::update::{SaveErrorHandler, SaveOutcome, UpdateState};
use join_application::{CategoriaUpdate, History, InMemoryEntityService, ProdutoUpdate};
use join_domain::{Categoria, CategoriaId, CategoriaRef, NewProduto, Produto, ProdutoId, samples};
use join_domain::entity::NewEntity;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

struct Fixture {
    produtos: Arc<InMemoryEntityService<Produto>>,
    categorias: Arc<InMemoryEntityService<Categoria>>,
    history: Arc<History>,
}

impl Fixture {
    fn new(produtos: Vec<Produto>) -> Self {
        let history = History::new();
        history.navigate("/produto");
        history.navigate("/produto/new");
        Self {
            produtos: Arc::new(InMemoryEntityService::with_entities(produtos)),
            categorias: Arc::new(InMemoryEntityService::with_entities([
                samples::categoria::sample_with_required_data(),
                samples::categoria::sample_with_partial_data(),
                samples::categoria::sample_with_full_data(),
            ])),
            history: Arc::new(history),
        }
    }

    fn page(&self) -> ProdutoUpdate {
        ProdutoUpdate::new(self.produtos.clone(), self.categorias.clone(), self.history.clone())
    }
}

fn categoria_ref(id: i64) -> CategoriaRef {
    CategoriaRef {
        id: CategoriaId::new(id),
        nome: None,
    }
}

fn produto_42() -> Produto {
    Produto {
        id: ProdutoId::new(42),
        nome: Some("X".into()),
        quantidade: Some(5),
        categoria: Some(categoria_ref(1)),
    }
}

fn counting_handler() -> (Arc<AtomicUsize>, Arc<dyn SaveErrorHandler>) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let handler: Arc<dyn SaveErrorHandler> = Arc::new(move |_: &AppError| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (count, handler)
}

#[tokio::test]
async fn new_produto_is_created() {
    let fx = Fixture::new(vec![]);
    let ctx = AppContext::default();
    let mut page = fx.page();
    page.init(&ctx, None).await;
    assert_eq!(page.state(), UpdateState::Ready);
    assert!(!page.can_submit());

    let values = page.edit_form_mut().values_mut();
    values.nome = Some("X".into());
    values.quantidade = Some(5);
    values.categoria = Some(categoria_ref(1));
    assert!(page.can_submit());

    let outcome = page.save(&ctx).await;
    match outcome {
        SaveOutcome::Saved(produto) => {
            assert_eq!(produto.id, ProdutoId::new(1));
            assert_eq!(produto.categoria, Some(categoria_ref(1)));
        }
        SaveOutcome::Failed => panic!("save failed"),
    }
    assert_eq!(fx.produtos.calls("create"), 1);
    assert_eq!(fx.produtos.calls("update"), 0);
    assert!(!page.is_saving());
    assert_eq!(page.state(), UpdateState::Success);
    assert_eq!(fx.history.current().as_deref(), Some("/produto"));
}

#[tokio::test]
async fn existing_produto_is_updated() {
    let fx = Fixture::new(vec![produto_42()]);
    let ctx = AppContext::default();
    let mut page = fx.page();
    page.init(&ctx, Some(produto_42())).await;
    page.edit_form_mut().values_mut().quantidade = Some(9);

    let outcome = page.save(&ctx).await;
    assert!(outcome.is_saved());
    assert_eq!(fx.produtos.calls("update"), 1);
    assert_eq!(fx.produtos.calls("create"), 0);
    assert_eq!(
        fx.produtos.get(&ProdutoId::new(42)).and_then(|p| p.quantidade),
        Some(9)
    );
}

#[tokio::test]
async fn failed_save_keeps_session_open() {
    let fx = Fixture::new(vec![produto_42()]);
    let ctx = AppContext::default();
    let (errors, handler) = counting_handler();
    let mut page = fx.page().with_error_handler(handler);
    page.init(&ctx, Some(produto_42())).await;

    fx.produtos.fail_next_saves(1);
    assert_eq!(page.save(&ctx).await, SaveOutcome::Failed);
    assert!(!page.is_saving());
    assert_eq!(page.state(), UpdateState::Ready);
    assert_eq!(errors.load(Ordering::SeqCst), 1);
    assert_eq!(fx.history.len(), 2);
    assert_eq!(fx.history.current().as_deref(), Some("/produto/new"));

    // 重试成功
    assert!(page.save(&ctx).await.is_saved());
    assert_eq!(fx.history.len(), 1);
    assert_eq!(fx.produtos.calls("update"), 2);
}

#[tokio::test]
async fn validation_rejection_goes_through_error_hook() {
    let fx = Fixture::new(vec![]);
    let ctx = AppContext::default();
    let (errors, handler) = counting_handler();
    let mut page = fx.page().with_error_handler(handler);
    page.init(&ctx, None).await;

    assert_eq!(page.save(&ctx).await, SaveOutcome::Failed);
    assert_eq!(errors.load(Ordering::SeqCst), 1);
    assert!(fx.produtos.is_empty());
}

#[tokio::test]
async fn options_include_current_categoria() {
    let fx = Fixture::new(vec![]);
    let ctx = AppContext::default();
    let mut produto = produto_42();
    produto.categoria = Some(CategoriaRef {
        id: CategoriaId::new(999),
        nome: Some("Ferragens".into()),
    });

    let mut page = fx.page();
    page.init(&ctx, Some(produto)).await;

    let ids: Vec<i64> = page
        .categorias_shared_collection()
        .iter()
        .map(|c| c.id.get())
        .collect();
    assert_eq!(ids, vec![13342, 23485, 34642, 999]);
    assert_eq!(
        page.selected_categoria().map(|c| c.id),
        Some(CategoriaId::new(999))
    );
    assert!(page.options_error().is_none());
}

#[tokio::test]
async fn current_categoria_is_not_duplicated() {
    let fx = Fixture::new(vec![]);
    let ctx = AppContext::default();
    let mut produto = produto_42();
    produto.categoria = Some(categoria_ref(13342));

    let mut page = fx.page();
    page.init(&ctx, Some(produto)).await;
    assert_eq!(page.categorias_shared_collection().len(), 3);

    let web = &page.categorias_shared_collection()[0];
    assert!(ProdutoUpdate::compare_categoria(Some(web), page.selected_categoria()));
    assert!(!ProdutoUpdate::compare_categoria(Some(web), None));
}

#[tokio::test]
async fn options_respect_page_size() {
    let fx = Fixture::new(vec![]);
    let ctx = AppContext::default();
    let mut page = fx.page().with_options_page(PageRequest::of_size(2));
    page.init(&ctx, None).await;
    assert_eq!(page.categorias_shared_collection().len(), 2);
}

#[tokio::test]
async fn options_failure_still_reaches_ready() {
    let fx = Fixture::new(vec![]);
    fx.categorias.fail_queries(true);
    let ctx = AppContext::default();

    let mut page = fx.page();
    page.init(&ctx, Some(produto_42())).await;

    assert_eq!(page.state(), UpdateState::Ready);
    assert!(page.options_error().is_some_and(|e| e.contains("500")));
    let ids: Vec<i64> = page
        .categorias_shared_collection()
        .iter()
        .map(|c| c.id.get())
        .collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn selecting_a_categoria_updates_the_form() {
    let fx = Fixture::new(vec![]);
    let ctx = AppContext::default();
    let mut page = fx.page();
    page.init(&ctx, None).await;

    let first = page.categorias_shared_collection()[0].clone();
    page.select_categoria(Some(&first));
    assert_eq!(
        page.edit_form().values().categoria,
        Some(CategoriaRef::from(&first))
    );
    assert_eq!(page.edit_form().invalid_fields(), vec!["nome", "quantidade"]);
}

#[tokio::test]
async fn categoria_session_creates_then_navigates_back() {
    let service = Arc::new(InMemoryEntityService::<Categoria>::new());
    let history = Arc::new(History::new());
    history.navigate("/categoria");
    history.navigate("/categoria/new");
    let ctx = AppContext::default();

    let mut page = CategoriaUpdate::new(service.clone(), history.clone());
    page.init(None);
    assert!(page.edit_form().id().value().is_none());
    assert!(!page.can_submit());
    page.edit_form_mut().values_mut().nome = Some("Ferragens".into());
    match page.save(&ctx).await {
        SaveOutcome::Saved(categoria) => assert_eq!(categoria.nome.as_deref(), Some("Ferragens")),
        SaveOutcome::Failed => panic!("save failed"),
    }
    assert_eq!(service.calls("create"), 1);
    assert_eq!(history.current().as_deref(), Some("/categoria"));
}

/// 保存永远不返回的后端
struct StalledProdutos;

#[async_trait::async_trait]
impl EntityService<Produto> for StalledProdutos {
    async fn create(
        &self,
        _ctx: &AppContext,
        entity: NewProduto,
    ) -> Result<Produto, AppError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(entity.with_id(ProdutoId::new(1)))
    }

    async fn update(&self, _ctx: &AppContext, entity: Produto) -> Result<Produto, AppError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(entity)
    }

    async fn partial_update(
        &self,
        _ctx: &AppContext,
        entity: Produto,
    ) -> Result<Produto, AppError> {
        Ok(entity)
    }

    async fn find(
        &self,
        _ctx: &AppContext,
        _id: &ProdutoId,
    ) -> Result<Option<Produto>, AppError> {
        Ok(None)
    }

    async fn query(
        &self,
        _ctx: &AppContext,
        _page: &PageRequest,
    ) -> Result<Vec<Produto>, AppError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _ctx: &AppContext, _id: &ProdutoId) -> Result<(), AppError> {
        Ok(())
    }
}

#[tokio::test]
async fn abandoned_save_still_finalizes() {
    let fx = Fixture::new(vec![]);
    let ctx = AppContext::default();
    let mut page = ProdutoUpdate::new(
        Arc::new(StalledProdutos),
        fx.categorias.clone(),
        fx.history.clone(),
    );
    page.init(&ctx, Some(produto_42())).await;
    assert!(page.can_submit());

    let timed_out = tokio::time::timeout(Duration::from_millis(50), page.save(&ctx))
        .await
        .is_err();
    assert!(timed_out);
    assert!(!page.is_saving());
    assert_eq!(page.state(), UpdateState::Ready);
    assert!(page.can_submit());
    assert_eq!(fx.history.current().as_deref(), Some("/produto/new"));
}

#[tokio::test]
async fn reinit_without_entity_switches_to_create() {
    let fx = Fixture::new(vec![produto_42()]);
    let ctx = AppContext::default();
    let mut page = fx.page();
    page.init(&ctx, Some(produto_42())).await;
    page.init(&ctx, None).await;

    assert!(page.edit_form().id().value().is_none());
    assert!(page.edit_form().values().nome.is_none());

    let values = page.edit_form_mut().values_mut();
    values.nome = Some("Novo".into());
    values.quantidade = Some(1);
    values.categoria = Some(categoria_ref(13342));
    assert!(page.save(&ctx).await.is_saved());
    assert_eq!(fx.produtos.calls("create"), 1);
    assert_eq!(fx.produtos.calls("update"), 0);
    assert_eq!(fx.produtos.len(), 2);
}

#[tokio::test]
async fn failed_reload_drops_previous_options() {
    let fx = Fixture::new(vec![]);
    let ctx = AppContext::default();
    let mut page = fx.page();
    page.init(&ctx, None).await;
    assert_eq!(page.categorias_shared_collection().len(), 3);

    fx.categorias.fail_queries(true);
    page.init(&ctx, Some(produto_42())).await;
    let ids: Vec<i64> = page
        .categorias_shared_collection()
        .iter()
        .map(|c| c.id.get())
        .collect();
    assert_eq!(ids, vec![1]);
    assert!(page.options_error().is_some());

    fx.categorias.fail_queries(false);
    page.init(&ctx, None).await;
    assert!(page.options_error().is_none());
    assert_eq!(page.categorias_shared_collection().len(), 3);
}
