//! Record query engine
//!
//! Execution flow (strict order):
//! 1. Filter records by every active predicate
//! 2. Aggregate over the full matched set
//! 3. Stable sort by the requested field and direction
//! 4. Slice the requested page
//!
//! The engine is a pure function of `(records, spec)`. It reads the
//! collection it is handed and keeps no state between calls.

use crate::model::Expediente;
use crate::query::QuerySpec;

use super::filters::RecordFilter;
use super::paginator::Page;
use super::result::{Aggregates, QueryResult};
use super::sorter::RecordSorter;

/// Executes query specs against a record collection
pub struct QueryEngine;

impl QueryEngine {
    /// Runs one query.
    ///
    /// Deterministic: same records in the same order + same spec = same result.
    pub fn query(records: &[Expediente], spec: &QuerySpec) -> QueryResult {
        let mut matched = Self::matching(records, spec);

        let aggregates = Aggregates::from_records(matched.iter().copied());

        RecordSorter::sort(&mut matched, &spec.sort);

        let page = Page::new(spec.page(), spec.items_per_page());
        let total_matches = matched.len();

        QueryResult {
            records: matched[page.range(total_matches)]
                .iter()
                .map(|record| (*record).clone())
                .collect(),
            total_matches,
            total_pages: page.total_pages(total_matches),
            current_page: page.number,
            items_per_page: page.size,
            aggregates,
        }
    }

    /// Returns the full matched set in collection order
    pub fn matching<'a>(records: &'a [Expediente], spec: &QuerySpec) -> Vec<&'a Expediente> {
        records
            .iter()
            .filter(|record| RecordFilter::matches(record, spec))
            .collect()
    }
}

/// Shorthand for [`QueryEngine::query`]
pub fn query(records: &[Expediente], spec: &QuerySpec) -> QueryResult {
    QueryEngine::query(records, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Estado, NewExpediente};
    use crate::query::{SortDirection, SortField};
    use chrono::{TimeZone, Utc};

    fn make_record(id: &str, monto: f64, estado: Estado, month: u32) -> Expediente {
        NewExpediente::new(format!("{}/2024", id), "softBlue", monto)
            .with_estado(estado)
            .with_fecha_ingreso(Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0).unwrap())
            .into_expediente(id.to_string(), Utc::now())
    }

    fn two_records() -> Vec<Expediente> {
        vec![
            make_record("A", 100.0, Estado::Abierto, 1),
            make_record("B", 200.0, Estado::Pagado, 2),
        ]
    }

    fn ids(result: &QueryResult) -> Vec<&str> {
        result.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_estado_filter_scenario() {
        let result = query(&two_records(), &QuerySpec::new().with_estado("abierto"));
        assert_eq!(ids(&result), vec!["A"]);
        assert_eq!(result.total_matches, 1);
        assert_eq!(result.aggregates.total_monto, 100.0);
    }

    #[test]
    fn test_monto_min_scenario() {
        let result = query(&two_records(), &QuerySpec::new().with_monto_min(150.0));
        assert_eq!(ids(&result), vec!["B"]);
        assert_eq!(result.total_matches, 1);
    }

    #[test]
    fn test_second_page_ascending_by_date() {
        let spec = QuerySpec::new()
            .with_page(2)
            .with_items_per_page(1)
            .with_sort(SortField::parse("fecha").unwrap(), SortDirection::Asc);
        let result = query(&two_records(), &spec);

        assert_eq!(ids(&result), vec!["B"]);
        assert_eq!(result.total_pages, 2);
        assert_eq!(result.current_page, 2);
        assert!(!result.has_next_page());
        assert!(query(&two_records(), &spec.clone().with_page(1)).has_next_page());
    }

    #[test]
    fn test_default_sort_newest_first() {
        let result = query(&two_records(), &QuerySpec::new());
        assert_eq!(ids(&result), vec!["B", "A"]);
    }

    #[test]
    fn test_empty_collection() {
        let result = query(&[], &QuerySpec::new().with_estado("pagado").with_page(3));
        assert!(result.is_empty());
        assert_eq!(result.total_matches, 0);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.aggregates, Aggregates::default());
    }

    #[test]
    fn test_out_of_range_page() {
        let result = query(&two_records(), &QuerySpec::new().with_page(5));
        assert!(result.is_empty());
        assert_eq!(result.total_matches, 2);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.current_page, 5);
    }

    #[test]
    fn test_aggregates_cover_all_pages() {
        let spec = QuerySpec::new().with_items_per_page(1);
        let result = query(&two_records(), &spec);

        assert_eq!(result.len(), 1);
        assert_eq!(result.aggregates.total_monto, 300.0);
        assert_eq!(result.aggregates.abiertos(), 1);
        assert_eq!(result.aggregates.pagados(), 1);
    }

    #[test]
    fn test_input_not_mutated() {
        let records = two_records();
        let before = records.clone();
        let _ = query(&records, &QuerySpec::new().with_sort(SortField::Monto, SortDirection::Asc));
        assert_eq!(records, before);
    }

    #[test]
    fn test_unbalanced_payments_tolerated() {
        let mut records = two_records();
        records[0].monto = 999.0;
        assert!(!records[0].pagos_balanced());

        let result = query(&records, &QuerySpec::new());
        assert_eq!(result.total_matches, 2);
        assert_eq!(result.aggregates.total_monto, 1199.0);
    }
}
