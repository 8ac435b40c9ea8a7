//! Catalog management service: genres, authors, books, book instances.
//!
//! All input validation happens here, before anything reaches the repository.
//! The Author lifespan invariant in particular is a save-time check, not a
//! storage constraint.

use uuid::Uuid;
use validator::Validate;

use crate::{
    config::CatalogConfig,
    error::AppResult,
    models::{
        author::{self, Author, CreateAuthor, UpdateAuthor},
        book::{Book, BookQuery, BookShort, CreateBook, UpdateBook},
        book_instance::{BookInstance, BookInstanceQuery, CreateBookInstance, UpdateBookInstance},
        genre::{CreateGenre, Genre, UpdateGenre},
        user::{CreateUser, User},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    /// Effective pagination parameters: defaults applied, clamped to >= 1.
    /// Handlers echo these in the response envelope, so the values there are
    /// the ones actually queried.
    pub fn page_params(&self, page: Option<i64>, per_page: Option<i64>) -> (i64, i64) {
        (
            page.unwrap_or(1).max(1),
            per_page.unwrap_or(self.config.page_size).max(1),
        )
    }

    /// Round-trip to the database, for readiness probing
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }

    // =========================================================================
    // GENRES
    // =========================================================================

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create_genre(&self, genre: CreateGenre) -> AppResult<Genre> {
        genre.validate()?;
        self.repository.genres.create(&genre).await
    }

    pub async fn update_genre(&self, id: i32, genre: UpdateGenre) -> AppResult<Genre> {
        genre.validate()?;
        self.repository.genres.update(id, &genre).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        author.validate()?;
        author::validate_lifespan(author.date_of_birth, author.date_of_death)?;
        self.repository.authors.create(&author).await
    }

    /// Update an author. The lifespan invariant is checked against the merged
    /// state, so an update cannot sneak an invalid date pair past it.
    pub async fn update_author(&self, id: i32, update: UpdateAuthor) -> AppResult<Author> {
        update.validate()?;

        let mut author = self.repository.authors.get_by_id(id).await?;
        if let Some(first_name) = update.first_name {
            author.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            author.last_name = last_name;
        }
        if update.date_of_birth.is_some() {
            author.date_of_birth = update.date_of_birth;
        }
        if update.date_of_death.is_some() {
            author.date_of_death = update.date_of_death;
        }

        author::validate_lifespan(author.date_of_birth, author.date_of_death)?;
        self.repository.authors.update(&author).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    /// Books written by an author, for the author detail view
    pub async fn list_books_by_author(&self, author_id: i32) -> AppResult<Vec<BookShort>> {
        // Verify author exists
        self.repository.authors.get_by_id(author_id).await?;
        self.repository.books.list_by_author(author_id).await
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    /// Search books with title filter and pagination
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        let (page, per_page) = self.page_params(query.page, query.per_page);
        let filter = query.title.as_deref().unwrap_or("");
        self.repository.books.search(filter, page, per_page).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        if let Some(author_id) = book.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        for genre_id in &book.genre_ids {
            self.repository.genres.get_by_id(*genre_id).await?;
        }
        self.repository.books.create(&book).await
    }

    pub async fn update_book(&self, id: i32, update: UpdateBook) -> AppResult<Book> {
        update.validate()?;
        if let Some(author_id) = update.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        if let Some(ref genre_ids) = update.genre_ids {
            for genre_id in genre_ids {
                self.repository.genres.get_by_id(*genre_id).await?;
            }
        }
        self.repository.books.update(id, &update).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    // =========================================================================
    // BOOK INSTANCES
    // =========================================================================

    pub async fn list_instances(
        &self,
        query: &BookInstanceQuery,
    ) -> AppResult<(Vec<BookInstance>, i64)> {
        let (page, per_page) = self.page_params(query.page, query.per_page);
        self.repository
            .instances
            .list(query.status, page, per_page)
            .await
    }

    pub async fn get_instance(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.instances.get_by_id(id).await
    }

    pub async fn create_instance(&self, instance: CreateBookInstance) -> AppResult<BookInstance> {
        instance.validate()?;
        if let Some(book_id) = instance.book_id {
            self.repository.books.get_by_id(book_id).await?;
        }
        if let Some(borrower_id) = instance.borrower_id {
            self.repository.users.get_by_id(borrower_id).await?;
        }
        self.repository.instances.create(&instance).await
    }

    pub async fn update_instance(
        &self,
        id: Uuid,
        update: UpdateBookInstance,
    ) -> AppResult<BookInstance> {
        update.validate()?;
        if let Some(book_id) = update.book_id {
            self.repository.books.get_by_id(book_id).await?;
        }
        if let Some(borrower_id) = update.borrower_id {
            self.repository.users.get_by_id(borrower_id).await?;
        }
        self.repository.instances.update(id, &update).await
    }

    pub async fn delete_instance(&self, id: Uuid) -> AppResult<()> {
        self.repository.instances.delete(id).await
    }

    // =========================================================================
    // USERS
    // =========================================================================

    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        user.validate()?;
        self.repository.users.create(&user).await
    }

    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await
    }
}
