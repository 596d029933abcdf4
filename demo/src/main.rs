use join_application::config::ClientConfig;
use join_application::context::AppContext;
use join_application::error::AppError;
use join_application::form::FormGroup;
use join_application::routing::RouteAction;
use join_application::service::{EntityService, PageRequest};
use join_application::update::{SaveErrorHandler, SaveOutcome};
use join_application::{History, InMemoryEntityService, ProdutoUpdate, RouteRegistrar};
use join_domain::error::DomainError;
use join_domain::{Categoria, Produto, ProdutoId, samples};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "join_application=debug,demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(base_url = %config.base_url, page_size = config.page_size, "config loaded");

    let produtos: Arc<InMemoryEntityService<Produto>> = Arc::new(InMemoryEntityService::new());
    let categorias: Arc<InMemoryEntityService<Categoria>> =
        Arc::new(InMemoryEntityService::with_entities([
            samples::categoria::sample_with_required_data(),
            samples::categoria::sample_with_partial_data(),
            samples::categoria::sample_with_full_data(),
        ]));

    let registrar = RouteRegistrar::entity_routes();
    let history = Arc::new(History::new());
    let on_error: Arc<dyn SaveErrorHandler> =
        Arc::new(|err: &AppError| tracing::error!(error = %err, "could not save produto"));
    let ctx = AppContext::traced();

    // 新建
    history.navigate("/produto");
    let route = registrar.resolve("produto/new").await?;
    history.navigate("/produto/new");
    tracing::info!(title = route.page_title, action = ?route.action, "page opened");

    let mut page = ProdutoUpdate::new(produtos.clone(), categorias.clone(), history.clone())
        .with_options_page(PageRequest::of_size(config.page_size))
        .with_error_handler(on_error.clone());
    page.init(&ctx, None).await;

    let escolhida = page.categorias_shared_collection().first().cloned();
    let values = page.edit_form_mut().values_mut();
    values.nome = Some("Parafuso sextavado".into());
    values.quantidade = Some(120);
    page.select_categoria(escolhida.as_ref());
    tracing::info!(
        can_submit = page.can_submit(),
        invalid = ?page.edit_form().invalid_fields(),
        "form filled"
    );

    let created = match page.save(&ctx).await {
        SaveOutcome::Saved(produto) => produto,
        SaveOutcome::Failed => return Err(AppError::Transport("create failed".into())),
    };
    tracing::info!(id = %created.id, current = ?history.current(), "produto created");

    // 编辑
    let route = registrar.resolve(&format!("produto/{}/edit", created.id)).await?;
    history.navigate(format!("/produto/{}/edit", created.id));
    let id: ProdutoId = match (route.action, route.id) {
        (RouteAction::Edit, Some(raw)) => raw.parse().map_err(DomainError::from)?,
        _ => return Err(AppError::RouteNotFound(format!("produto/{}/edit", created.id))),
    };
    let existing = produtos.find(&ctx, &id).await?;

    let mut page = ProdutoUpdate::new(produtos.clone(), categorias.clone(), history.clone())
        .with_options_page(PageRequest::of_size(config.page_size))
        .with_error_handler(on_error);
    page.init(&ctx, existing).await;
    page.edit_form_mut().values_mut().quantidade = Some(80);

    if let SaveOutcome::Saved(updated) = page.save(&ctx).await {
        tracing::info!(
            id = %updated.id,
            quantidade = ?updated.quantidade,
            categoria = ?updated.categoria.as_ref().and_then(|c| c.nome.as_deref()),
            "produto updated"
        );
    }

    tracing::info!(
        produtos = produtos.len(),
        creates = produtos.calls("create"),
        updates = produtos.calls("update"),
        "session finished"
    );
    Ok(())
}
