//! Repository for the `activity_profile` table.

use kinscreen_core::model::ActivityProfile;
use sqlx::PgPool;

use crate::models::ActivityProfileRow;

const COLUMNS: &str = "id, compound_name, discoverx_gene_symbol, entrez_gene_symbol, \
     percent_control, compound_concentration, kd, kd_qualifier, create_date";

/// Provides lookups and the commit-gate batch write for activity profiles.
pub struct ActivityProfileRepo;

impl ActivityProfileRepo {
    /// List activity profiles, newest first, optionally filtered by
    /// compound name (case-insensitive).
    pub async fn list(
        pool: &PgPool,
        compound_filter: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityProfileRow>, sqlx::Error> {
        match compound_filter {
            Some(compound) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM activity_profile \
                     WHERE lower(compound_name) = lower($1) \
                     ORDER BY create_date DESC LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, ActivityProfileRow>(&query)
                    .bind(compound)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM activity_profile \
                     ORDER BY create_date DESC LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, ActivityProfileRow>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Fetch the existing-record snapshot for an import batch: every
    /// profile whose lower-cased compound name appears in `lower_names`.
    pub async fn find_for_compounds(
        pool: &PgPool,
        lower_names: &[String],
    ) -> Result<Vec<ActivityProfileRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_profile WHERE lower(compound_name) = ANY($1)"
        );
        sqlx::query_as::<_, ActivityProfileRow>(&query)
            .bind(lower_names)
            .fetch_all(pool)
            .await
    }

    /// Persist merged profiles as a single all-or-nothing batch.
    ///
    /// Upserts on the composite natural key. `create_date` is only set on
    /// insert; updates keep the original creation timestamp.
    pub async fn save_all(pool: &PgPool, profiles: &[ActivityProfile]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut saved = 0;

        for profile in profiles {
            let result = sqlx::query(
                "INSERT INTO activity_profile \
                    (compound_name, discoverx_gene_symbol, entrez_gene_symbol, \
                     percent_control, compound_concentration, kd, kd_qualifier, create_date) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
                 ON CONFLICT (lower(compound_name), discoverx_gene_symbol) DO UPDATE SET \
                    entrez_gene_symbol = EXCLUDED.entrez_gene_symbol, \
                    percent_control = EXCLUDED.percent_control, \
                    compound_concentration = EXCLUDED.compound_concentration, \
                    kd = EXCLUDED.kd, \
                    kd_qualifier = EXCLUDED.kd_qualifier",
            )
            .bind(&profile.compound_name)
            .bind(&profile.discoverx_gene_symbol)
            .bind(&profile.entrez_gene_symbol)
            .bind(profile.percent_control)
            .bind(profile.compound_concentration)
            .bind(profile.kd)
            .bind(&profile.kd_qualifier)
            .bind(profile.create_date)
            .execute(&mut *tx)
            .await?;
            saved += result.rows_affected();
        }

        tx.commit().await?;
        tracing::debug!(saved, "Committed activity profile batch");
        Ok(saved)
    }
}
