/// OpenAPI documentation for the snippet service
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Share-A-Code Snippet Service API",
        version = "1.0.0",
        description = "Feed, search and profile API for shared code snippets. Serves the sampled home feed, post detail, author profiles, filtered search and the like action; login, signup and OAuth sign-in are forwarded to the hosted identity provider.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    paths(
        crate::handlers::feed::get_feed,
        crate::handlers::posts::get_post,
        crate::handlers::posts::like_post,
        crate::handlers::users::get_user,
        crate::handlers::search::search_posts,
        crate::handlers::search::list_languages,
    ),
    components(
        schemas(
            crate::models::DisplayPost,
            crate::models::DisplayUser,
            crate::handlers::posts::LikeRequest,
        )
    ),
    tags(
        (name = "feed", description = "Sampled home feed"),
        (name = "posts", description = "Post detail and likes"),
        (name = "users", description = "Author profiles"),
        (name = "search", description = "Filtered post search"),
    ),
)]
pub struct ApiDoc;
