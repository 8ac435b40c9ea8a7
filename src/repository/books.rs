//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookShort, CreateBook, UpdateBook},
        genre::Genre,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

/// Escape ILIKE metacharacters so the filter is a literal substring match.
/// Postgres treats backslash as the default escape character.
fn escape_like(filter: &str) -> String {
    filter
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Search books by title substring with pagination.
    /// An empty filter matches everything.
    pub async fn search(
        &self,
        title_filter: &str,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<BookShort>, i64)> {
        let offset = (page - 1) * per_page;
        let filter = escape_like(title_filter);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM books WHERE title ILIKE '%' || $1 || '%'",
        )
        .bind(&filter)
        .fetch_one(&self.pool)
        .await?;

        let books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.title, b.isbn, b.author_id,
                   CASE WHEN a.id IS NULL THEN NULL
                        ELSE a.last_name || ', ' || a.first_name
                   END as author_name
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.id
            WHERE b.title ILIKE '%' || $1 || '%'
            ORDER BY b.title, b.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&filter)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((books, total))
    }

    /// Get book by ID with author and genres loaded
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let mut book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if let Some(author_id) = book.author_id {
            book.author = sqlx::query_as("SELECT * FROM authors WHERE id = $1")
                .bind(author_id)
                .fetch_optional(&self.pool)
                .await?;
        }

        book.genres = self.get_book_genres(id).await?;

        Ok(book)
    }

    /// List all books by a given author (derived join, not a stored relation)
    pub async fn list_by_author(&self, author_id: i32) -> AppResult<Vec<BookShort>> {
        let books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.title, b.isbn, b.author_id,
                   a.last_name || ', ' || a.first_name as author_name
            FROM books b
            JOIN authors a ON b.author_id = a.id
            WHERE b.author_id = $1
            ORDER BY b.title, b.id
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Load all genres for a book via the book_genres junction table
    async fn get_book_genres(&self, book_id: i32) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = $1
            ORDER BY g.name, g.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(genres)
    }

    /// Create a new book with its genre links. ISBN duplicates are allowed.
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO books (title, author_id, summary, isbn)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(book.author_id)
        .bind(&book.summary)
        .bind(&book.isbn)
        .fetch_one(&mut *tx)
        .await?;

        for genre_id in &book.genre_ids {
            sqlx::query(
                "INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(genre_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Update a book; a provided genre_ids replaces the full genre set
    pub async fn update(&self, id: i32, update: &UpdateBook) -> AppResult<Book> {
        let existing = self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE books
            SET title = $1, author_id = $2, summary = $3, isbn = $4
            WHERE id = $5
            "#,
        )
        .bind(update.title.as_ref().unwrap_or(&existing.title))
        .bind(update.author_id.or(existing.author_id))
        .bind(update.summary.as_ref().unwrap_or(&existing.summary))
        .bind(update.isbn.as_ref().unwrap_or(&existing.isbn))
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if let Some(ref genre_ids) = update.genre_ids {
            sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for genre_id in genre_ids {
                sqlx::query(
                    "INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Delete a book. Dependent instances keep existing with a null book
    /// reference (ON DELETE SET NULL).
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_escape_leaves_plain_text_alone() {
        assert_eq!(escape_like("wild sheep chase"), "wild sheep chase");
        assert_eq!(escape_like(""), "");
    }

    #[test]
    fn like_escape_neutralizes_wildcards() {
        assert_eq!(escape_like("100% cotton"), "100\\% cotton");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
    }

    #[test]
    fn like_escape_handles_backslash_first() {
        // A raw backslash must not end up escaping the added ones
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("\\%"), "\\\\\\%");
    }
}
