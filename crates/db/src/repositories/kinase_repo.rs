//! Repository for the `kinase` table. Kinases are read-only reference
//! data; nothing in the import path creates or mutates them.

use sqlx::PgPool;

use crate::models::KinaseRow;

const COLUMNS: &str = "id, discoverx_gene_symbol, entrez_gene_symbol";

pub struct KinaseRepo;

impl KinaseRepo {
    /// List kinases ordered by DiscoveRx gene symbol.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<KinaseRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM kinase \
             ORDER BY discoverx_gene_symbol LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, KinaseRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Fetch all kinases matching any of the given DiscoveRx or Entrez
    /// gene symbols. Used to build the master-data snapshot for an import.
    pub async fn find_by_symbols(
        pool: &PgPool,
        discoverx_symbols: &[String],
        entrez_symbols: &[String],
    ) -> Result<Vec<KinaseRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM kinase \
             WHERE discoverx_gene_symbol = ANY($1) OR entrez_gene_symbol = ANY($2) \
             ORDER BY id"
        );
        sqlx::query_as::<_, KinaseRow>(&query)
            .bind(discoverx_symbols)
            .bind(entrez_symbols)
            .fetch_all(pool)
            .await
    }
}
