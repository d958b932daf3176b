//! `PostgreSQL` implementation of the `BattleRepository` trait.

use arena_core::battle::Battle;
use arena_core::contestant::{ContestantTransition, LoserFate};
use arena_core::error::DomainError;
use arena_core::repository::BattleRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::StoreError;
use crate::pg_contestant_directory;

const SELECT_BATTLE: &str = r"
    SELECT id, contestant_1_id, contestant_2_id, winner_id, death_occurred, injuries, date
    FROM battles
";

#[derive(sqlx::FromRow)]
struct BattleRow {
    id: Uuid,
    contestant_1_id: Uuid,
    contestant_2_id: Uuid,
    winner_id: Option<Uuid>,
    death_occurred: bool,
    injuries: Option<String>,
    date: DateTime<Utc>,
}

impl From<BattleRow> for Battle {
    fn from(row: BattleRow) -> Self {
        Self {
            id: row.id,
            contestant_1_id: row.contestant_1_id,
            contestant_2_id: row.contestant_2_id,
            winner_id: row.winner_id,
            death_occurred: row.death_occurred,
            injuries: row.injuries,
            date: row.date,
        }
    }
}

/// Maps a zero-row guarded update on an unresolved battle to the right
/// error. `conflict` describes why an existing battle did not match.
async fn missed_pending_update(conn: &mut PgConnection, id: Uuid, conflict: &str) -> StoreError {
    let exists: Result<(bool,), sqlx::Error> =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM battles WHERE id = $1)")
            .bind(id)
            .fetch_one(conn)
            .await;
    match exists {
        Ok((true,)) => {
            StoreError::Domain(DomainError::InvalidState(format!("battle {id} {conflict}")))
        }
        Ok((false,)) => StoreError::Domain(DomainError::battle_not_found(id)),
        Err(e) => StoreError::Database(e),
    }
}

/// PostgreSQL-backed battle repository.
#[derive(Debug, Clone)]
pub struct PgBattleRepository {
    pool: PgPool,
}

impl PgBattleRepository {
    /// Creates a new `PgBattleRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Battle outcome plus both contestant updates, in one transaction.
    /// The battle row must still be unresolved and hold the same pair the
    /// outcome was derived from. Dropping the transaction on any early
    /// return rolls everything back.
    async fn commit_in_transaction(
        &self,
        battle: &Battle,
        transition: &ContestantTransition,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            UPDATE battles
            SET winner_id = $2, death_occurred = $3, injuries = $4
            WHERE id = $1
              AND winner_id IS NULL
              AND contestant_1_id = $5
              AND contestant_2_id = $6
            ",
        )
        .bind(battle.id)
        .bind(battle.winner_id)
        .bind(battle.death_occurred)
        .bind(battle.injuries.as_deref())
        .bind(battle.contestant_1_id)
        .bind(battle.contestant_2_id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(missed_pending_update(
                &mut tx,
                battle.id,
                "was resolved or re-paired since it was loaded",
            )
            .await);
        }

        pg_contestant_directory::increment_wins(&mut tx, transition.winner_id).await?;
        match transition.loser_fate {
            LoserFate::Killed => pg_contestant_directory::kill(&mut tx, transition.loser_id).await?,
            LoserFate::Defeated => {
                pg_contestant_directory::increment_losses(&mut tx, transition.loser_id).await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl BattleRepository for PgBattleRepository {
    async fn find(&self, id: Uuid) -> Result<Option<Battle>, DomainError> {
        let row: Option<BattleRow> = sqlx::query_as(&format!("{SELECT_BATTLE} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(row.map(Battle::from))
    }

    async fn list(&self) -> Result<Vec<Battle>, DomainError> {
        let rows: Vec<BattleRow> = sqlx::query_as(&format!("{SELECT_BATTLE} ORDER BY date DESC"))
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(rows.into_iter().map(Battle::from).collect())
    }

    async fn list_for_contestant(&self, contestant_id: Uuid) -> Result<Vec<Battle>, DomainError> {
        let rows: Vec<BattleRow> = sqlx::query_as(&format!(
            "{SELECT_BATTLE} WHERE contestant_1_id = $1 OR contestant_2_id = $1 ORDER BY date DESC"
        ))
        .bind(contestant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from)?;
        Ok(rows.into_iter().map(Battle::from).collect())
    }

    async fn insert(&self, battle: &Battle) -> Result<(), DomainError> {
        sqlx::query(
            r"
            INSERT INTO battles
                (id, contestant_1_id, contestant_2_id, winner_id, death_occurred, injuries, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(battle.id)
        .bind(battle.contestant_1_id)
        .bind(battle.contestant_2_id)
        .bind(battle.winner_id)
        .bind(battle.death_occurred)
        .bind(battle.injuries.as_deref())
        .bind(battle.date)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from)?;
        Ok(())
    }

    async fn update_pairing(&self, battle: &Battle) -> Result<(), DomainError> {
        let mut conn = self.pool.acquire().await.map_err(StoreError::from)?;
        let result = sqlx::query(
            r"
            UPDATE battles
            SET contestant_1_id = $2, contestant_2_id = $3
            WHERE id = $1 AND winner_id IS NULL
            ",
        )
        .bind(battle.id)
        .bind(battle.contestant_1_id)
        .bind(battle.contestant_2_id)
        .execute(&mut *conn)
        .await
        .map_err(StoreError::from)?;
        if result.rows_affected() == 0 {
            return Err(missed_pending_update(&mut conn, battle.id, "is already resolved")
                .await
                .into());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM battles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn commit_resolution(
        &self,
        battle: &Battle,
        transition: &ContestantTransition,
    ) -> Result<(), DomainError> {
        self.commit_in_transaction(battle, transition)
            .await
            .map_err(|e| {
                let e = DomainError::from(e);
                if matches!(e, DomainError::Infrastructure(_)) {
                    error!(battle_id = %battle.id, error = %e, "resolution rolled back");
                } else {
                    warn!(battle_id = %battle.id, error = %e, "resolution rejected");
                }
                e
            })
    }
}
