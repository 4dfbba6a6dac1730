//! Loosely typed query request
//!
//! Collaborators send filters as a plain JSON object whose values come
//! straight from form inputs: dates as strings, amounts as numbers or
//! strings, empty strings for "no filter". `QueryRequest` accepts that
//! shape and `normalize` turns it into a `QuerySpec`.
//!
//! Normalization never fails. Each value that cannot be interpreted is
//! dropped and reported as a `QueryWarning`.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{RequestError, RequestResult};
use super::spec::{QuerySpec, SortDirection, SortField, DEFAULT_ITEMS_PER_PAGE};

/// A request value that was ignored during normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWarning {
    /// Request field name
    pub field: &'static str,
    /// Why the value was ignored
    pub reason: String,
}

impl QueryWarning {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for QueryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Query request as received from collaborators.
///
/// Field names are camelCase; the older Spanish spellings
/// (`fechaInicio`, `montoMinimo`, ...) are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryRequest {
    #[serde(alias = "fechaInicio")]
    pub date_start: Option<Value>,
    #[serde(alias = "fechaFin")]
    pub date_end: Option<Value>,
    pub estado: Option<Value>,
    pub color: Option<Value>,
    #[serde(alias = "montoMinimo")]
    pub monto_min: Option<Value>,
    #[serde(alias = "montoMaximo")]
    pub monto_max: Option<Value>,
    pub search_term: Option<Value>,
    pub sort_field: Option<Value>,
    pub sort_direction: Option<Value>,
    pub page: Option<Value>,
    pub items_per_page: Option<Value>,
}

impl QueryRequest {
    /// Reads a request from a JSON value.
    ///
    /// Only a value that is not an object is rejected; unknown keys are
    /// ignored.
    pub fn from_json(value: Value) -> RequestResult<Self> {
        if !value.is_object() {
            return Err(RequestError::query_invalid(
                "Query request must be a JSON object",
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| RequestError::query_invalid(format!("Invalid query request: {}", e)))
    }

    /// Normalizes with the built-in default page size
    pub fn normalize(&self) -> (QuerySpec, Vec<QueryWarning>) {
        self.normalize_with_page_size(DEFAULT_ITEMS_PER_PAGE)
    }

    /// Normalizes into a typed spec.
    ///
    /// `default_items_per_page` applies when the request has no usable
    /// page size.
    pub fn normalize_with_page_size(
        &self,
        default_items_per_page: usize,
    ) -> (QuerySpec, Vec<QueryWarning>) {
        let mut warnings = Vec::new();
        let mut spec = QuerySpec::new().with_items_per_page(default_items_per_page);

        spec.date_start = date_value("dateStart", &self.date_start, &mut warnings);
        spec.date_end = date_value("dateEnd", &self.date_end, &mut warnings);
        spec.estado = string_value("estado", &self.estado, &mut warnings);
        spec.color = string_value("color", &self.color, &mut warnings);
        spec.monto_min = number_value("montoMin", &self.monto_min, &mut warnings);
        spec.monto_max = number_value("montoMax", &self.monto_max, &mut warnings);
        spec.search_term = string_value("searchTerm", &self.search_term, &mut warnings);

        if let Some(name) = string_value("sortField", &self.sort_field, &mut warnings) {
            match SortField::parse(&name) {
                Ok(field) => spec.sort.field = field,
                Err(e) => warnings.push(QueryWarning::new("sortField", e.message())),
            }
        }

        if let Some(direction) = string_value("sortDirection", &self.sort_direction, &mut warnings) {
            match SortDirection::parse(&direction) {
                Ok(direction) => spec.sort.direction = direction,
                Err(e) => warnings.push(QueryWarning::new("sortDirection", e.message())),
            }
        }

        if let Some(page) = count_value("page", &self.page, &mut warnings) {
            spec = spec.with_page(page);
        }

        if let Some(items) = count_value("itemsPerPage", &self.items_per_page, &mut warnings) {
            spec = spec.with_items_per_page(items);
        }

        (spec, warnings)
    }
}

/// Parses a date bound.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` (read as UTC)
/// and plain `YYYY-MM-DD` (midnight UTC).
pub fn parse_date_bound(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn string_value(
    field: &'static str,
    value: &Option<Value>,
    warnings: &mut Vec<QueryWarning>,
) -> Option<String> {
    match value {
        None => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            warnings.push(QueryWarning::new(
                field,
                format!("expected a string, got {}", json_type_name(other)),
            ));
            None
        }
    }
}

fn date_value(
    field: &'static str,
    value: &Option<Value>,
    warnings: &mut Vec<QueryWarning>,
) -> Option<DateTime<Utc>> {
    let raw = string_value(field, value, warnings)?;
    let parsed = parse_date_bound(&raw);
    if parsed.is_none() {
        warnings.push(QueryWarning::new(field, format!("'{}' is not a date", raw)));
    }
    parsed
}

fn number_value(
    field: &'static str,
    value: &Option<Value>,
    warnings: &mut Vec<QueryWarning>,
) -> Option<f64> {
    let parsed = match value {
        None => return None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return None,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            warnings.push(QueryWarning::new(field, "expected a finite number"));
            None
        }
    }
}

/// Reads a page number or page size; negatives become 0 and are clamped
/// by the `QuerySpec` setters.
fn count_value(
    field: &'static str,
    value: &Option<Value>,
    warnings: &mut Vec<QueryWarning>,
) -> Option<usize> {
    let parsed = match value {
        None => return None,
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Some(i),
            (None, Some(f)) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
            _ => None,
        },
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(n) => Some(usize::try_from(n).unwrap_or(0)),
        None => {
            warnings.push(QueryWarning::new(field, "expected an integer"));
            None
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn normalize(value: Value) -> (QuerySpec, Vec<QueryWarning>) {
        QueryRequest::from_json(value).unwrap().normalize()
    }

    #[test]
    fn test_empty_request_is_default_spec() {
        let (spec, warnings) = normalize(json!({}));
        assert_eq!(spec, QuerySpec::new());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_non_object_rejected() {
        let err = QueryRequest::from_json(json!([1, 2])).unwrap_err();
        assert_eq!(err.code().code(), "EXP_QUERY_INVALID");
    }

    #[test]
    fn test_full_request() {
        let (spec, warnings) = normalize(json!({
            "dateStart": "2024-01-01",
            "dateEnd": "2024-12-31T23:59:59Z",
            "estado": "abierto",
            "color": "softBlue",
            "montoMin": 100,
            "montoMax": "5000.5",
            "searchTerm": "0001",
            "sortField": "monto",
            "sortDirection": "asc",
            "page": 2,
            "itemsPerPage": 25
        }));

        assert!(warnings.is_empty());
        assert_eq!(spec.date_start, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert_eq!(spec.date_end, Some(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()));
        assert_eq!(spec.estado.as_deref(), Some("abierto"));
        assert_eq!(spec.monto_min, Some(100.0));
        assert_eq!(spec.monto_max, Some(5000.5));
        assert_eq!(spec.sort.field, SortField::Monto);
        assert_eq!(spec.sort.direction, SortDirection::Asc);
        assert_eq!(spec.page(), 2);
        assert_eq!(spec.items_per_page(), 25);
    }

    #[test]
    fn test_spanish_aliases() {
        let (spec, _) = normalize(json!({
            "fechaInicio": "2024-02-01",
            "montoMinimo": 150,
            "montoMaximo": 300
        }));
        assert!(spec.date_start.is_some());
        assert_eq!(spec.monto_min, Some(150.0));
        assert_eq!(spec.monto_max, Some(300.0));
    }

    #[test]
    fn test_malformed_values_degrade_to_unconstrained() {
        let (spec, warnings) = normalize(json!({
            "dateStart": "not-a-date",
            "montoMin": "abc",
            "montoMax": true,
            "estado": 5,
            "sortField": "observaciones",
            "sortDirection": "sideways",
            "page": "x"
        }));

        assert!(spec.is_unconstrained());
        assert_eq!(spec.sort, Default::default());
        assert_eq!(spec.page(), 1);

        let fields: Vec<&str> = warnings.iter().map(|w| w.field).collect();
        assert_eq!(
            fields,
            vec!["dateStart", "estado", "montoMin", "montoMax", "sortField", "sortDirection", "page"]
        );
    }

    #[test]
    fn test_empty_strings_are_not_warnings() {
        let (spec, warnings) = normalize(json!({
            "estado": "",
            "dateStart": "",
            "montoMin": "",
            "searchTerm": null
        }));
        assert!(spec.is_unconstrained());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_negative_pagination_clamped() {
        let (spec, warnings) = normalize(json!({"page": -3, "itemsPerPage": 0}));
        assert!(warnings.is_empty());
        assert_eq!(spec.page(), 1);
        assert_eq!(spec.items_per_page(), 1);
    }

    #[test]
    fn test_default_page_size_override() {
        let request = QueryRequest::default();
        let (spec, _) = request.normalize_with_page_size(50);
        assert_eq!(spec.items_per_page(), 50);
    }

    #[test]
    fn test_parse_date_bound_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap();
        assert_eq!(parse_date_bound("2024-03-05T10:30:00Z"), Some(expected));
        assert_eq!(parse_date_bound("2024-03-05T07:30:00-03:00"), Some(expected));
        assert_eq!(parse_date_bound("2024-03-05T10:30:00"), Some(expected));
        assert!(parse_date_bound("05/03/2024").is_none());
    }
}
