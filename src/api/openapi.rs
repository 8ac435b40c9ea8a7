//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, genres, health, instances, loans, stats, users, visits};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LocalLibrary API",
        version = "1.0.0",
        description = "Library catalog REST API: books, authors, genres and loanable copies",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::list_author_books,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Instances
        instances::list_instances,
        instances::get_instance,
        instances::create_instance,
        instances::update_instance,
        instances::delete_instance,
        // Loans
        loans::list_my_loans,
        loans::return_instance,
        // Users
        users::get_user,
        users::create_user,
        users::delete_user,
        // Stats
        stats::get_stats,
        // Visits
        visits::record_visit,
        visits::get_visits,
    ),
    components(
        schemas(
            // Genres
            crate::models::genre::Genre,
            crate::models::genre::CreateGenre,
            crate::models::genre::UpdateGenre,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Books
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Instances
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::LoanStatus,
            crate::models::book_instance::CreateBookInstance,
            crate::models::book_instance::UpdateBookInstance,
            // Loans
            loans::ReturnResponse,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            // Stats
            stats::CatalogStats,
            // Visits
            crate::models::visit::VisitCount,
            crate::models::visit::RecordVisit,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "genres", description = "Genre management"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book catalog management"),
        (name = "instances", description = "Physical copy management"),
        (name = "loans", description = "Loan lifecycle"),
        (name = "users", description = "User accounts"),
        (name = "stats", description = "Catalog statistics"),
        (name = "visits", description = "Session visit counters")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
