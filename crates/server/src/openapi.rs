use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Wire shape of a todo; timestamps are ISO-8601 text.
#[derive(ToSchema)]
pub struct TodoDoc {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct CreateTodoInputDoc {
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub deadline_at: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateTodoInputDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub deadline_at: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::todos::list,
        crate::routes::todos::get,
        crate::routes::todos::create,
        crate::routes::todos::update,
        crate::routes::todos::delete,
    ),
    components(
        schemas(
            HealthResponse,
            TodoDoc,
            CreateTodoInputDoc,
            UpdateTodoInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "todos")
    )
)]
pub struct ApiDoc;
