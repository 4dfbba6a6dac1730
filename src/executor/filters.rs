//! Predicate filtering for query execution
//!
//! A record is kept only if every active predicate holds. String
//! predicates compare lowercased values; no locale-specific folding.

use crate::model::Expediente;
use crate::query::QuerySpec;

/// Evaluates spec predicates against records
pub struct RecordFilter;

impl RecordFilter {
    /// Checks if a record matches all active predicates (AND semantics)
    pub fn matches(record: &Expediente, spec: &QuerySpec) -> bool {
        Self::date_match(record, spec)
            && Self::estado_match(record, spec)
            && Self::color_match(record, spec)
            && Self::monto_match(record, spec)
            && Self::search_match(record, spec)
    }

    /// Inclusive bounds on the intake instant
    fn date_match(record: &Expediente, spec: &QuerySpec) -> bool {
        let after_start = spec
            .date_start
            .map_or(true, |start| record.fecha_ingreso >= start);
        let before_end = spec
            .date_end
            .map_or(true, |end| record.fecha_ingreso <= end);
        after_start && before_end
    }

    fn estado_match(record: &Expediente, spec: &QuerySpec) -> bool {
        match spec.active_estado() {
            Some(estado) => record.estado.matches_label(estado),
            None => true,
        }
    }

    fn color_match(record: &Expediente, spec: &QuerySpec) -> bool {
        match spec.active_color() {
            Some(color) => record.color.to_lowercase() == color.to_lowercase(),
            None => true,
        }
    }

    /// Inclusive numeric bounds. NaN amounts fail any active bound.
    fn monto_match(record: &Expediente, spec: &QuerySpec) -> bool {
        let above_min = spec.monto_min.map_or(true, |min| record.monto >= min);
        let below_max = spec.monto_max.map_or(true, |max| record.monto <= max);
        above_min && below_max
    }

    /// Substring of numero OR descripcion
    fn search_match(record: &Expediente, spec: &QuerySpec) -> bool {
        match spec.active_search_term() {
            Some(term) => {
                let term = term.to_lowercase();
                record.numero_expediente.to_lowercase().contains(&term)
                    || record.descripcion.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Estado, NewExpediente};
    use chrono::{TimeZone, Utc};

    fn record(numero: &str, descripcion: &str, monto: f64, estado: Estado) -> Expediente {
        NewExpediente::new(numero, "softBlue", monto)
            .with_descripcion(descripcion)
            .with_estado(estado)
            .into_expediente(
                numero.to_string(),
                Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            )
    }

    #[test]
    fn test_no_predicates_matches() {
        let rec = record("0001/2024", "Compra", 100.0, Estado::Abierto);
        assert!(RecordFilter::matches(&rec, &QuerySpec::new()));
    }

    #[test]
    fn test_estado_case_insensitive() {
        let rec = record("0001/2024", "Compra", 100.0, Estado::FaltanFirmas);
        assert!(RecordFilter::matches(&rec, &QuerySpec::new().with_estado("faltan firmas")));
        assert!(!RecordFilter::matches(&rec, &QuerySpec::new().with_estado("faltan")));
    }

    #[test]
    fn test_color_case_insensitive() {
        let rec = record("0001/2024", "Compra", 100.0, Estado::Abierto);
        assert!(RecordFilter::matches(&rec, &QuerySpec::new().with_color("SOFTBLUE")));
        assert!(!RecordFilter::matches(&rec, &QuerySpec::new().with_color("softPink")));
    }

    #[test]
    fn test_date_bounds_inclusive() {
        let rec = record("0001/2024", "Compra", 100.0, Estado::Abierto);
        let instant = rec.fecha_ingreso;

        let spec = QuerySpec::new().with_date_start(instant).with_date_end(instant);
        assert!(RecordFilter::matches(&rec, &spec));

        let later = Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap();
        assert!(!RecordFilter::matches(&rec, &QuerySpec::new().with_date_start(later)));
    }

    #[test]
    fn test_monto_bounds_inclusive() {
        let rec = record("0001/2024", "Compra", 100.0, Estado::Abierto);
        assert!(RecordFilter::matches(&rec, &QuerySpec::new().with_monto_min(100.0)));
        assert!(RecordFilter::matches(&rec, &QuerySpec::new().with_monto_max(100.0)));
        assert!(!RecordFilter::matches(&rec, &QuerySpec::new().with_monto_min(100.01)));
    }

    #[test]
    fn test_search_numero_or_descripcion() {
        let rec = record("ABC-2024", "Mantenimiento de vehiculos", 100.0, Estado::Abierto);
        assert!(RecordFilter::matches(&rec, &QuerySpec::new().with_search_term("abc")));
        assert!(RecordFilter::matches(&rec, &QuerySpec::new().with_search_term("VEHICULOS")));
        assert!(!RecordFilter::matches(&rec, &QuerySpec::new().with_search_term("obra")));
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let rec = record("0001/2024", "Compra", 100.0, Estado::Pagado);
        let spec = QuerySpec::new().with_estado("pagado").with_monto_min(500.0);
        assert!(!RecordFilter::matches(&rec, &spec));
    }

    #[test]
    fn test_nan_monto_fails_active_bounds_only() {
        let rec = record("0001/2024", "Compra", f64::NAN, Estado::Abierto);
        assert!(RecordFilter::matches(&rec, &QuerySpec::new()));
        assert!(!RecordFilter::matches(&rec, &QuerySpec::new().with_monto_min(0.0)));
    }
}
