#![forbid(unsafe_code)]

use super::requests::AuthorIdentity;
use super::{SqliteStore, StoreError};
use rusqlite::{OptionalExtension, Row, Transaction, params};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeveloperRow {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at_ms: i64,
}

impl SqliteStore {
    pub fn developer_by_username(
        &self,
        username: &str,
    ) -> Result<Option<DeveloperRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, username, name, avatar_url, created_at_ms \
                 FROM developers WHERE username=?1",
                params![username],
                developer_from_row,
            )
            .optional()?)
    }

    pub fn developer_count(&self) -> Result<i64, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(1) FROM developers", [], |row| {
                row.get::<_, i64>(0)
            })?)
    }
}

/// Find-or-create keyed by username, refreshing name/avatar only when the
/// incoming value is non-null and differs from the stored one. The
/// insert-or-ignore plus the unique index on `username` keeps concurrent
/// same-username ingestions from creating duplicate identities.
pub(super) fn sync_developer_tx(
    tx: &Transaction<'_>,
    author: &AuthorIdentity,
    now_ms: i64,
) -> Result<DeveloperRow, StoreError> {
    tx.execute(
        "INSERT OR IGNORE INTO developers(username, name, avatar_url, created_at_ms) \
         VALUES (?1, ?2, ?3, ?4)",
        params![author.username, author.name, author.avatar_url, now_ms],
    )?;

    let mut developer = tx
        .query_row(
            "SELECT id, username, name, avatar_url, created_at_ms \
             FROM developers WHERE username=?1",
            params![author.username],
            developer_from_row,
        )
        .optional()?
        .ok_or(StoreError::UnknownId)?;

    let next_name = author
        .name
        .as_ref()
        .filter(|name| developer.name.as_ref() != Some(name))
        .cloned();
    let next_avatar = author
        .avatar_url
        .as_ref()
        .filter(|avatar| developer.avatar_url.as_ref() != Some(avatar))
        .cloned();

    if next_name.is_some() || next_avatar.is_some() {
        tx.execute(
            "UPDATE developers SET name=COALESCE(?2, name), avatar_url=COALESCE(?3, avatar_url) \
             WHERE id=?1",
            params![developer.id, next_name, next_avatar],
        )?;
        if let Some(name) = next_name {
            developer.name = Some(name);
        }
        if let Some(avatar) = next_avatar {
            developer.avatar_url = Some(avatar);
        }
    }

    Ok(developer)
}

fn developer_from_row(row: &Row<'_>) -> rusqlite::Result<DeveloperRow> {
    Ok(DeveloperRow {
        id: row.get(0)?,
        username: row.get(1)?,
        name: row.get(2)?,
        avatar_url: row.get(3)?,
        created_at_ms: row.get(4)?,
    })
}
