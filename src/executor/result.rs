//! Result types for query execution

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Estado, Expediente};

/// Summary statistics over the full matched set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    /// Sum of `monto` across matched records
    pub total_monto: f64,
    /// Occurrences per estado label present in the matched set
    pub count_by_estado: BTreeMap<String, usize>,
    /// Occurrences per color label present in the matched set
    pub count_by_color: BTreeMap<String, usize>,
}

impl Aggregates {
    /// Accumulates statistics in one pass
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Expediente>) -> Self {
        let mut aggregates = Self::default();
        for record in records {
            aggregates.total_monto += record.monto;
            *aggregates
                .count_by_estado
                .entry(record.estado.as_str().to_string())
                .or_insert(0) += 1;
            *aggregates
                .count_by_color
                .entry(record.color.clone())
                .or_insert(0) += 1;
        }
        aggregates
    }

    /// Count of matched records whose estado equals `label`, ignoring case
    pub fn count_for_estado(&self, label: &str) -> usize {
        let label = label.to_lowercase();
        self.count_by_estado
            .iter()
            .filter(|(estado, _)| estado.to_lowercase() == label)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn abiertos(&self) -> usize {
        self.count_for_estado(Estado::Abierto.as_str())
    }

    pub fn pagados(&self) -> usize {
        self.count_for_estado(Estado::Pagado.as_str())
    }

    pub fn cerrados(&self) -> usize {
        self.count_for_estado(Estado::Cerrado.as_str())
    }

    pub fn pendientes(&self) -> usize {
        self.count_for_estado(Estado::Pendiente.as_str())
    }

    pub fn faltan_firmas(&self) -> usize {
        self.count_for_estado(Estado::FaltanFirmas.as_str())
    }
}

/// Result of one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Records on the requested page, in sort order
    pub records: Vec<Expediente>,
    /// Size of the matched set before pagination
    pub total_matches: usize,
    /// `ceil(total_matches / items_per_page)`, 0 when nothing matched
    pub total_pages: usize,
    /// 1-based page that was requested, after clamping
    pub current_page: usize,
    /// Page size used, after clamping
    pub items_per_page: usize,
    /// Statistics over the whole matched set
    pub aggregates: Aggregates,
}

impl QueryResult {
    /// Returns true if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records on the page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns an iterator over the page records
    pub fn iter(&self) -> impl Iterator<Item = &Expediente> {
        self.records.iter()
    }

    /// Returns true if a later page exists
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}
