//! Database repository for received applications.
//!
//! An application and its attachments are written in one transaction.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{AttachmentMeta, NewApplication, StoredApplication};

/// A stored attachment with its content.
#[derive(Debug, Clone)]
pub struct AttachmentBlob {
    pub meta: AttachmentMeta,
    pub data: Vec<u8>,
}

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store an accepted application with its files.
    pub async fn insert_application(
        &self,
        application: &NewApplication,
    ) -> Result<StoredApplication, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO applications (id, form, vacancy, name, phone, email, lang, received_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&application.form)
        .bind(&application.vacancy)
        .bind(&application.name)
        .bind(&application.phone)
        .bind(&application.email)
        .bind(&application.lang)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let mut attachments = Vec::with_capacity(application.attachments.len());
        for attachment in &application.attachments {
            let meta = AttachmentMeta {
                index: attachment.index as i64,
                filename: attachment.filename.clone(),
                content_type: attachment.content_type.clone(),
                size: attachment.data.len() as i64,
            };

            sqlx::query(
                "INSERT INTO attachments (application_id, idx, filename, content_type, size, data) VALUES (?, ?, ?, ?, ?, ?)"
            )
            .bind(&id)
            .bind(meta.index)
            .bind(&meta.filename)
            .bind(&meta.content_type)
            .bind(meta.size)
            .bind(&attachment.data)
            .execute(&mut *tx)
            .await?;

            attachments.push(meta);
        }

        tx.commit().await?;

        Ok(StoredApplication {
            id,
            form: application.form.clone(),
            vacancy: application.vacancy.clone(),
            name: application.name.clone(),
            phone: application.phone.clone(),
            email: application.email.clone(),
            lang: application.lang.clone(),
            received_at: now,
            attachments,
        })
    }

    /// List applications, newest first, without attachment contents.
    pub async fn list_applications(&self) -> Result<Vec<StoredApplication>, AppError> {
        let rows = sqlx::query(
            "SELECT id, form, vacancy, name, phone, email, lang, received_at FROM applications ORDER BY received_at DESC, id"
        )
        .fetch_all(&self.pool)
        .await?;

        let mut applications: Vec<StoredApplication> =
            rows.iter().map(application_from_row).collect();

        let attachment_rows = sqlx::query(
            "SELECT application_id, idx, filename, content_type, size FROM attachments ORDER BY application_id, idx"
        )
        .fetch_all(&self.pool)
        .await?;

        for row in &attachment_rows {
            let application_id: String = row.get("application_id");
            if let Some(app) = applications.iter_mut().find(|a| a.id == application_id) {
                app.attachments.push(attachment_from_row(row));
            }
        }

        Ok(applications)
    }

    /// Get one application by ID.
    pub async fn get_application(&self, id: &str) -> Result<Option<StoredApplication>, AppError> {
        let row = sqlx::query(
            "SELECT id, form, vacancy, name, phone, email, lang, received_at FROM applications WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut application) = row.as_ref().map(application_from_row) else {
            return Ok(None);
        };

        let rows = sqlx::query(
            "SELECT idx, filename, content_type, size FROM attachments WHERE application_id = ? ORDER BY idx"
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        application.attachments = rows.iter().map(attachment_from_row).collect();

        Ok(Some(application))
    }

    /// Get one attachment with its content.
    pub async fn get_attachment(
        &self,
        application_id: &str,
        index: i64,
    ) -> Result<Option<AttachmentBlob>, AppError> {
        let row = sqlx::query(
            "SELECT idx, filename, content_type, size, data FROM attachments WHERE application_id = ? AND idx = ?"
        )
        .bind(application_id)
        .bind(index)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| AttachmentBlob {
            meta: attachment_from_row(&row),
            data: row.get("data"),
        }))
    }
}

// Helper functions for row conversion

fn application_from_row(row: &sqlx::sqlite::SqliteRow) -> StoredApplication {
    StoredApplication {
        id: row.get("id"),
        form: row.get("form"),
        vacancy: row.get("vacancy"),
        name: row.get("name"),
        phone: row.get("phone"),
        email: row.get("email"),
        lang: row.get("lang"),
        received_at: row.get("received_at"),
        attachments: Vec::new(),
    }
}

fn attachment_from_row(row: &sqlx::sqlite::SqliteRow) -> AttachmentMeta {
    AttachmentMeta {
        index: row.get("idx"),
        filename: row.get("filename"),
        content_type: row.get("content_type"),
        size: row.get("size"),
    }
}
