//! Book instances repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{
        BookInstance, CreateBookInstance, LoanStatus, UpdateBookInstance,
    },
};

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get instance by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(
            r#"
            SELECT bi.*, b.title as book_title
            FROM book_instances bi
            LEFT JOIN books b ON bi.book_id = b.id
            WHERE bi.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// List instances ordered by due date, optionally filtered by status
    pub async fn list(
        &self,
        status: Option<LoanStatus>,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<BookInstance>, i64)> {
        let offset = (page - 1) * per_page;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE ($1::varchar IS NULL OR status = $1)",
        )
        .bind(status.map(|s| s.as_code()))
        .fetch_one(&self.pool)
        .await?;

        let instances = sqlx::query_as::<_, BookInstance>(
            r#"
            SELECT bi.*, b.title as book_title
            FROM book_instances bi
            LEFT JOIN books b ON bi.book_id = b.id
            WHERE ($1::varchar IS NULL OR bi.status = $1)
            ORDER BY bi.due_back, bi.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status.map(|s| s.as_code()))
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((instances, total))
    }

    /// List instances currently on loan to a user, ordered by due date
    pub async fn list_on_loan_for_user(&self, user_id: i32) -> AppResult<Vec<BookInstance>> {
        let instances = sqlx::query_as::<_, BookInstance>(
            r#"
            SELECT bi.*, b.title as book_title
            FROM book_instances bi
            LEFT JOIN books b ON bi.book_id = b.id
            WHERE bi.borrower_id = $1 AND bi.status = 'o'
            ORDER BY bi.due_back, bi.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(instances)
    }

    /// Create a new instance. The UUID is generated here; status defaults to
    /// Maintenance when not specified.
    pub async fn create(&self, instance: &CreateBookInstance) -> AppResult<BookInstance> {
        let id = Uuid::new_v4();
        let status = instance.status.unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, due_back, status, borrower_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(instance.book_id)
        .bind(&instance.imprint)
        .bind(instance.due_back)
        .bind(status)
        .bind(instance.borrower_id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an instance
    pub async fn update(&self, id: Uuid, update: &UpdateBookInstance) -> AppResult<BookInstance> {
        let existing = self.get_by_id(id).await?;

        sqlx::query(
            r#"
            UPDATE book_instances
            SET book_id = $1, imprint = $2, due_back = $3, status = $4, borrower_id = $5
            WHERE id = $6
            "#,
        )
        .bind(update.book_id.or(existing.book_id))
        .bind(update.imprint.as_ref().unwrap_or(&existing.imprint))
        .bind(update.due_back.or(existing.due_back))
        .bind(update.status.unwrap_or(existing.status))
        .bind(update.borrower_id.or(existing.borrower_id))
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Mark an instance returned: status becomes Available and the borrower
    /// is cleared, in one statement. The borrower predicate makes the
    /// ownership check and the write atomic, so two racing returns cannot
    /// interleave into a lost update.
    pub async fn mark_returned(&self, id: Uuid, borrower_id: i32) -> AppResult<BookInstance> {
        let returned = sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET status = 'a', borrower_id = NULL
            WHERE id = $1 AND borrower_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(borrower_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::Authorization("This copy is not on loan to your account".to_string())
        })?;

        Ok(returned)
    }

    /// Delete an instance
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }
        Ok(())
    }

    /// Count all instances
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count instances with a given status
    pub async fn count_with_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
