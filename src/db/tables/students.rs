//! `students` table: DDL and parameterized statements over `Student`.

use crate::db::{is_unique_violation, sql_state, Table, SQLSTATE_TABLE_EXISTS, SQLSTATE_UNKNOWN_TABLE};
use crate::error::AppError;
use crate::model::Student;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub const STUDENTS_TABLE: &str = "students";

const CREATE_SQL: &str = r#"
    CREATE TABLE students (
        id INT NOT NULL PRIMARY KEY,
        firstName CHAR(40),
        lastName CHAR(40),
        birthday DATE
    )
"#;
const DROP_SQL: &str = "DROP TABLE students";
const SELECT_COLUMNS: &str = "SELECT id, firstName, lastName, birthday FROM students";

/// Everything the HTTP layer needs from student storage.
#[async_trait]
pub trait StudentsRepo: Table<Student, i32> {
    /// Students born on exactly `date`, ordered by id.
    async fn find_by_birthday(&self, date: NaiveDate) -> Result<Vec<Student>, AppError>;
}

#[derive(Clone)]
pub struct StudentsTable {
    pool: MySqlPool,
}

impl StudentsTable {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT 1 FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}

/// NULL names read back as empty strings.
fn student_from_row(row: &MySqlRow) -> Result<Student, AppError> {
    Ok(Student {
        id: row.try_get("id")?,
        first_name: row.try_get::<Option<String>, _>("firstName")?.unwrap_or_default(),
        last_name: row.try_get::<Option<String>, _>("lastName")?.unwrap_or_default(),
        birthday: row.try_get("birthday")?,
    })
}

#[async_trait]
impl Table<Student, i32> for StudentsTable {
    fn table_name(&self) -> &'static str {
        STUDENTS_TABLE
    }

    async fn create_table(&self) -> Result<bool, AppError> {
        match sqlx::query(CREATE_SQL).execute(&self.pool).await {
            Ok(_) => {
                tracing::info!(table = STUDENTS_TABLE, "created table");
                Ok(true)
            }
            Err(e) if sql_state(&e).as_deref() == Some(SQLSTATE_TABLE_EXISTS) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn drop_table(&self) -> Result<bool, AppError> {
        match sqlx::query(DROP_SQL).execute(&self.pool).await {
            Ok(_) => {
                tracing::info!(table = STUDENTS_TABLE, "dropped table");
                Ok(true)
            }
            Err(e) if sql_state(&e).as_deref() == Some(SQLSTATE_UNKNOWN_TABLE) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_primary_key(&self, id: i32) -> Result<Option<Student>, AppError> {
        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(student_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(student_from_row).collect()
    }

    async fn save(&self, student: &Student) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO students (id, firstName, lastName, birthday) VALUES (?, ?, ?, ?)",
        )
        .bind(student.id)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(student.birthday)
        .execute(&self.pool)
        .await;
        match result {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(id = student.id, "duplicate student id");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, student: &Student) -> Result<bool, AppError> {
        let affected = sqlx::query(
            "UPDATE students SET firstName = ?, lastName = ?, birthday = ? WHERE id = ?",
        )
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(student.birthday)
        .bind(student.id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        if affected > 0 {
            return Ok(true);
        }
        // MySQL counts changed rows, not matched ones: an unchanged row still exists.
        self.exists(student.id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let affected = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

#[async_trait]
impl StudentsRepo for StudentsTable {
    async fn find_by_birthday(&self, date: NaiveDate) -> Result<Vec<Student>, AppError> {
        let sql = format!("{} WHERE birthday = ? ORDER BY id", SELECT_COLUMNS);
        tracing::debug!(sql = %sql, birthday = %date, "query");
        let rows = sqlx::query(&sql).bind(date).fetch_all(&self.pool).await?;
        rows.iter().map(student_from_row).collect()
    }
}
