//! Repository for the `compound` table.

use kinscreen_core::model::Compound;
use sqlx::PgPool;

use crate::models::CompoundRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "compound_name, chemotype, s10, smiles, source, \
     primary_reference, primary_reference_url, hidden";

/// Provides lookups and the batch upsert for compounds.
pub struct CompoundRepo;

impl CompoundRepo {
    /// List compounds, optionally filtered by a case-insensitive name
    /// prefix. Hidden compounds are excluded from unfiltered listings.
    pub async fn list(
        pool: &PgPool,
        name_filter: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CompoundRow>, sqlx::Error> {
        match name_filter {
            Some(prefix) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM compound \
                     WHERE compound_name ILIKE $1 || '%' \
                     ORDER BY lower(compound_name) LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, CompoundRow>(&query)
                    .bind(prefix)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM compound \
                     WHERE hidden = FALSE \
                     ORDER BY lower(compound_name) LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, CompoundRow>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Find a compound by name, case-insensitively.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<CompoundRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM compound WHERE lower(compound_name) = lower($1)");
        sqlx::query_as::<_, CompoundRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Fetch all compounds whose lower-cased name appears in `lower_names`.
    ///
    /// Used to build the master-data snapshot for an import batch.
    pub async fn find_by_names(
        pool: &PgPool,
        lower_names: &[String],
    ) -> Result<Vec<CompoundRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM compound WHERE lower(compound_name) = ANY($1)");
        sqlx::query_as::<_, CompoundRow>(&query)
            .bind(lower_names)
            .fetch_all(pool)
            .await
    }

    /// Persist merged compounds as a single all-or-nothing batch.
    ///
    /// Upserts on the case-insensitive name key; the `hidden` flag is not
    /// touched by imports.
    pub async fn save_all(pool: &PgPool, compounds: &[Compound]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut saved = 0;

        for compound in compounds {
            let result = sqlx::query(
                "INSERT INTO compound \
                    (compound_name, chemotype, s10, smiles, source, \
                     primary_reference, primary_reference_url) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) \
                 ON CONFLICT (lower(compound_name)) DO UPDATE SET \
                    chemotype = EXCLUDED.chemotype, \
                    s10 = EXCLUDED.s10, \
                    smiles = EXCLUDED.smiles, \
                    source = EXCLUDED.source, \
                    primary_reference = EXCLUDED.primary_reference, \
                    primary_reference_url = EXCLUDED.primary_reference_url",
            )
            .bind(&compound.compound_name)
            .bind(&compound.chemotype)
            .bind(compound.s10)
            .bind(&compound.smiles)
            .bind(&compound.source)
            .bind(&compound.primary_reference)
            .bind(&compound.primary_reference_url)
            .execute(&mut *tx)
            .await?;
            saved += result.rows_affected();
        }

        tx.commit().await?;
        tracing::debug!(saved, "Committed compound batch");
        Ok(saved)
    }
}
