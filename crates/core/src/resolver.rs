//! Master-data lookups consulted during reconciliation.
//!
//! The engine never queries storage mid-pass: the caller loads every
//! compound name and kinase the batch could reference into a [`MasterData`]
//! snapshot up front, which keeps a reconciliation pass deterministic and
//! side-effect-free.

use std::collections::{HashMap, HashSet};

use crate::model::Kinase;

/// Read-only lookups against compound and kinase master data.
pub trait ReferenceResolver {
    /// Whether a compound with this name exists (case-insensitive).
    fn compound_exists(&self, name: &str) -> bool;

    /// Look up a kinase by its DiscoveRx gene symbol.
    fn kinase_by_discoverx(&self, symbol: &str) -> Option<&Kinase>;

    /// Look up a kinase by its Entrez gene symbol. Entrez symbols are not
    /// guaranteed unique; when several kinases share one, the first loaded
    /// wins.
    fn kinase_by_entrez(&self, symbol: &str) -> Option<&Kinase>;
}

/// In-memory [`ReferenceResolver`] built from a snapshot of master data.
#[derive(Debug, Clone, Default)]
pub struct MasterData {
    compound_names: HashSet<String>,
    by_discoverx: HashMap<String, Kinase>,
    by_entrez: HashMap<String, Kinase>,
}

impl MasterData {
    pub fn new<I>(compound_names: I, kinases: Vec<Kinase>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let compound_names = compound_names
            .into_iter()
            .map(|n| n.to_lowercase())
            .collect();

        let mut by_discoverx = HashMap::new();
        let mut by_entrez = HashMap::new();
        for kinase in kinases {
            by_entrez
                .entry(kinase.entrez_gene_symbol.clone())
                .or_insert_with(|| kinase.clone());
            by_discoverx.insert(kinase.discoverx_gene_symbol.clone(), kinase);
        }

        Self {
            compound_names,
            by_discoverx,
            by_entrez,
        }
    }
}

impl ReferenceResolver for MasterData {
    fn compound_exists(&self, name: &str) -> bool {
        self.compound_names.contains(&name.to_lowercase())
    }

    fn kinase_by_discoverx(&self, symbol: &str) -> Option<&Kinase> {
        self.by_discoverx.get(symbol)
    }

    fn kinase_by_entrez(&self, symbol: &str) -> Option<&Kinase> {
        self.by_entrez.get(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinase(id: i64, discoverx: &str, entrez: &str) -> Kinase {
        Kinase {
            id,
            discoverx_gene_symbol: discoverx.to_string(),
            entrez_gene_symbol: entrez.to_string(),
        }
    }

    #[test]
    fn test_compound_exists_is_case_insensitive() {
        let master = MasterData::new(vec!["CompoundA".to_string()], vec![]);
        assert!(master.compound_exists("compounda"));
        assert!(master.compound_exists("COMPOUNDA"));
        assert!(!master.compound_exists("compoundB"));
    }

    #[test]
    fn test_kinase_lookup_by_either_symbol() {
        let master = MasterData::new(vec![], vec![kinase(1, "ABL1(E255K)", "ABL1")]);
        assert_eq!(master.kinase_by_discoverx("ABL1(E255K)").map(|k| k.id), Some(1));
        assert_eq!(master.kinase_by_entrez("ABL1").map(|k| k.id), Some(1));
        assert!(master.kinase_by_discoverx("ABL1").is_none());
    }

    #[test]
    fn test_duplicate_entrez_first_loaded_wins() {
        let master = MasterData::new(
            vec![],
            vec![kinase(1, "ABL1(E255K)", "ABL1"), kinase(2, "ABL1(T315I)", "ABL1")],
        );
        assert_eq!(master.kinase_by_entrez("ABL1").map(|k| k.id), Some(1));
        assert_eq!(master.kinase_by_discoverx("ABL1(T315I)").map(|k| k.id), Some(2));
    }
}
