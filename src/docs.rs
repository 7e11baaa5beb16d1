use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::combine::handler::combine_videos,
    ),
    components(
        schemas(
            crate::modules::combine::dto::CombineRequest,
            crate::modules::combine::dto::VideoEntry,
            crate::common::response::ErrorResponse,
        )
    ),
    tags(
        (name = "Combine", description = "Join several YouTube videos into one file")
    )
)]
pub struct ApiDoc;
