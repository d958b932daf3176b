//! `PostgreSQL` implementation of the `ContestantDirectory` trait.
//!
//! The record-keeping statements are free functions over a `PgConnection` so
//! the battle repository can run them inside its resolution transaction.

use arena_core::contestant::{Contestant, ContestantStatus};
use arena_core::error::DomainError;
use arena_core::repository::ContestantDirectory;
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{StoreError, to_count};

#[derive(sqlx::FromRow)]
struct ContestantRow {
    id: Uuid,
    name: String,
    strength: i32,
    agility: i32,
    status: String,
    wins: i32,
    losses: i32,
    dictator_id: Option<Uuid>,
}

impl ContestantRow {
    fn into_contestant(self) -> Result<Contestant, StoreError> {
        Ok(Contestant {
            id: self.id,
            name: self.name,
            strength: to_count("strength", self.strength)?,
            agility: to_count("agility", self.agility)?,
            status: self.status.parse()?,
            wins: to_count("wins", self.wins)?,
            losses: to_count("losses", self.losses)?,
            dictator_id: self.dictator_id,
        })
    }
}

/// Maps a zero-row guarded update on a living contestant to the right error.
async fn missed_living_update(conn: &mut PgConnection, id: Uuid) -> StoreError {
    match contestant_exists(conn, id).await {
        Ok(true) => StoreError::Domain(DomainError::InvalidState(format!(
            "contestant {id} is dead"
        ))),
        Ok(false) => StoreError::Domain(DomainError::contestant_not_found(id)),
        Err(e) => e,
    }
}

pub(crate) async fn contestant_exists(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<bool, StoreError> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM contestants WHERE id = $1)")
            .bind(id)
            .fetch_one(conn)
            .await?;
    Ok(exists)
}

pub(crate) async fn increment_wins(conn: &mut PgConnection, id: Uuid) -> Result<(), StoreError> {
    let result =
        sqlx::query("UPDATE contestants SET wins = wins + 1 WHERE id = $1 AND status = 'ALIVE'")
            .bind(id)
            .execute(&mut *conn)
            .await?;
    if result.rows_affected() == 0 {
        return Err(missed_living_update(conn, id).await);
    }
    Ok(())
}

pub(crate) async fn increment_losses(conn: &mut PgConnection, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query(
        "UPDATE contestants SET losses = losses + 1 WHERE id = $1 AND status = 'ALIVE'",
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() == 0 {
        return Err(missed_living_update(conn, id).await);
    }
    Ok(())
}

/// Marks a living contestant dead.
pub(crate) async fn kill(conn: &mut PgConnection, id: Uuid) -> Result<(), StoreError> {
    let result =
        sqlx::query("UPDATE contestants SET status = 'DEAD' WHERE id = $1 AND status = 'ALIVE'")
            .bind(id)
            .execute(&mut *conn)
            .await?;
    if result.rows_affected() == 0 {
        return Err(missed_living_update(conn, id).await);
    }
    Ok(())
}

/// PostgreSQL-backed contestant directory.
#[derive(Debug, Clone)]
pub struct PgContestantDirectory {
    pool: PgPool,
}

impl PgContestantDirectory {
    /// Creates a new `PgContestantDirectory`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stores a contestant record. Contestant registration lives outside the
    /// battle engine; this is used for seeding and tests.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the insert fails or an
    /// attribute does not fit the column.
    pub async fn insert(&self, contestant: &Contestant) -> Result<(), DomainError> {
        let column = |name: &str, value: u32| {
            i32::try_from(value).map_err(|_| {
                DomainError::Infrastructure(format!("{name} out of range: {value}"))
            })
        };

        sqlx::query(
            r"
            INSERT INTO contestants
                (id, name, strength, agility, status, wins, losses, dictator_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(contestant.id)
        .bind(&contestant.name)
        .bind(column("strength", contestant.strength)?)
        .bind(column("agility", contestant.agility)?)
        .bind(contestant.status.as_str())
        .bind(column("wins", contestant.wins)?)
        .bind(column("losses", contestant.losses)?)
        .bind(contestant.dictator_id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from)?;
        Ok(())
    }

    async fn acquire(&self) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, StoreError> {
        Ok(self.pool.acquire().await?)
    }
}

#[async_trait]
impl ContestantDirectory for PgContestantDirectory {
    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.acquire().await?;
        Ok(contestant_exists(&mut conn, id).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Contestant, DomainError> {
        let row: Option<ContestantRow> = sqlx::query_as(
            r"
            SELECT id, name, strength, agility, status, wins, losses, dictator_id
            FROM contestants WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from)?;

        match row {
            Some(row) => Ok(row.into_contestant()?),
            None => Err(DomainError::contestant_not_found(id)),
        }
    }

    async fn increment_wins(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.acquire().await?;
        Ok(increment_wins(&mut conn, id).await?)
    }

    async fn increment_losses(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.acquire().await?;
        Ok(increment_losses(&mut conn, id).await?)
    }

    async fn set_status(&self, id: Uuid, status: ContestantStatus) -> Result<(), DomainError> {
        let mut conn = self.acquire().await?;
        // DEAD is terminal.
        let result =
            sqlx::query("UPDATE contestants SET status = $2 WHERE id = $1 AND status = 'ALIVE'")
                .bind(id)
                .bind(status.as_str())
                .execute(&mut *conn)
                .await
                .map_err(StoreError::from)?;
        if result.rows_affected() == 0 {
            return Err(missed_living_update(&mut conn, id).await.into());
        }
        Ok(())
    }
}
