use join_application::context::AppContext;
use join_application::error::AppError;
use join_application::form::FormGroup;
use join_application::service::EntityService;
use join_application::update::SaveOutcome;
use join_application::{CategoriaUpdate, History, InMemoryEntityService};
use join_domain::Categoria;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let service: Arc<InMemoryEntityService<Categoria>> = Arc::new(InMemoryEntityService::new());
    let history = Arc::new(History::new());
    let ctx = AppContext::traced();

    history.navigate("/categoria");
    history.navigate("/categoria/new");

    let mut page = CategoriaUpdate::new(service.clone(), history.clone())
        .with_error_handler(Arc::new(|err: &AppError| println!("save failed: {err}")));
    page.init(None);
    println!("invalid before typing: {:?}", page.edit_form().invalid_fields());

    page.edit_form_mut().values_mut().nome = Some("Ferragens".into());
    let created = match page.save(&ctx).await {
        SaveOutcome::Saved(categoria) => categoria,
        SaveOutcome::Failed => return Ok(()),
    };
    println!("created: {created:?}, back at {:?}", history.current());

    // 第二次保存失败：表单保持可编辑
    service.fail_next_saves(1);
    history.navigate(format!("/categoria/{}/edit", created.id));
    let mut page = CategoriaUpdate::new(service.clone(), history.clone());
    page.init(service.find(&ctx, &created.id).await?);
    page.edit_form_mut().values_mut().nome = Some("Ferragens e Parafusos".into());
    let outcome = page.save(&ctx).await;
    println!(
        "saved={} is_saving={} state={:?} still at {:?}",
        outcome.is_saved(),
        page.is_saving(),
        page.state(),
        history.current()
    );
    Ok(())
}
