use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "TaskFlow API",
        version = "0.1.0",
        description = "Tasks, categories and the due-date board"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/tasks", api = domain_tasks::ApiDoc),
        (path = "/categories", api = domain_categories::ApiDoc),
        (path = "/board", api = crate::api::board::BoardApiDoc)
    )
)]
pub struct ApiDoc;
