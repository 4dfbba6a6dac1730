//! Typed query specification
//!
//! Every field is optional except pagination, which defaults to page 1 of
//! `DEFAULT_ITEMS_PER_PAGE` records sorted by intake date, newest first.

use chrono::{DateTime, Utc};

use super::errors::{RequestError, RequestResult};

/// Page size used when none is given
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Closed set of sortable record fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    FechaIngreso,
    Monto,
    Estado,
    Numero,
    Color,
    Descripcion,
}

impl SortField {
    /// Resolves a field name, ignoring case.
    ///
    /// Both the camelCase and the stored snake_case spellings are accepted.
    pub fn parse(name: &str) -> RequestResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "fechaingreso" | "fecha_ingreso" | "fecha" => Ok(SortField::FechaIngreso),
            "monto" => Ok(SortField::Monto),
            "estado" => Ok(SortField::Estado),
            "numero" | "numero_expediente" | "numeroexpediente" => Ok(SortField::Numero),
            "color" => Ok(SortField::Color),
            "descripcion" => Ok(SortField::Descripcion),
            _ => Err(RequestError::unknown_sort_field(name)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::FechaIngreso => "fechaIngreso",
            SortField::Monto => "monto",
            SortField::Estado => "estado",
            SortField::Numero => "numero",
            SortField::Color => "color",
            SortField::Descripcion => "descripcion",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(direction: &str) -> RequestResult<Self> {
        match direction.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(RequestError::unknown_sort_direction(direction)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    /// Field to sort by
    pub field: SortField,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Filter, sort and page specification for one query
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    /// Inclusive lower bound on `fecha_ingreso`
    pub date_start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `fecha_ingreso`
    pub date_end: Option<DateTime<Utc>>,
    /// Case-insensitive exact match on the estado label
    pub estado: Option<String>,
    /// Case-insensitive exact match on the color label
    pub color: Option<String>,
    /// Inclusive lower bound on `monto`
    pub monto_min: Option<f64>,
    /// Inclusive upper bound on `monto`
    pub monto_max: Option<f64>,
    /// Case-insensitive substring of `numero_expediente` or `descripcion`
    pub search_term: Option<String>,
    /// Sort order applied before pagination
    pub sort: SortSpec,
    page: usize,
    items_per_page: usize,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            date_start: None,
            date_end: None,
            estado: None,
            color: None,
            monto_min: None,
            monto_max: None,
            search_term: None,
            sort: SortSpec::default(),
            page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl QuerySpec {
    /// Creates a spec with no active predicates
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_start(mut self, start: DateTime<Utc>) -> Self {
        self.date_start = Some(start);
        self
    }

    pub fn with_date_end(mut self, end: DateTime<Utc>) -> Self {
        self.date_end = Some(end);
        self
    }

    pub fn with_estado(mut self, estado: impl Into<String>) -> Self {
        self.estado = Some(estado.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_monto_min(mut self, min: f64) -> Self {
        self.monto_min = Some(min);
        self
    }

    pub fn with_monto_max(mut self, max: f64) -> Self {
        self.monto_max = Some(max);
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort = SortSpec { field, direction };
        self
    }

    /// Sets the 1-based page; values below 1 are clamped to 1
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size; values below 1 are clamped to 1
    pub fn with_items_per_page(mut self, items: usize) -> Self {
        self.items_per_page = items.max(1);
        self
    }

    /// 1-based page index, never 0
    pub fn page(&self) -> usize {
        self.page
    }

    /// Page size, never 0
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Estado filter, if set and non-empty
    pub fn active_estado(&self) -> Option<&str> {
        active(&self.estado)
    }

    /// Color filter, if set and non-empty
    pub fn active_color(&self) -> Option<&str> {
        active(&self.color)
    }

    /// Search term, if set and non-empty
    pub fn active_search_term(&self) -> Option<&str> {
        active(&self.search_term)
    }

    /// Returns true if no filter predicate is active
    pub fn is_unconstrained(&self) -> bool {
        self.date_start.is_none()
            && self.date_end.is_none()
            && self.active_estado().is_none()
            && self.active_color().is_none()
            && self.monto_min.is_none()
            && self.monto_max.is_none()
            && self.active_search_term().is_none()
    }
}

/// Empty strings do not constrain
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spec = QuerySpec::new();
        assert_eq!(spec.page(), 1);
        assert_eq!(spec.items_per_page(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(spec.sort.field, SortField::FechaIngreso);
        assert_eq!(spec.sort.direction, SortDirection::Desc);
        assert!(spec.is_unconstrained());
    }

    #[test]
    fn test_pagination_clamped() {
        let spec = QuerySpec::new().with_page(0).with_items_per_page(0);
        assert_eq!(spec.page(), 1);
        assert_eq!(spec.items_per_page(), 1);
    }

    #[test]
    fn test_empty_string_is_unconstrained() {
        let spec = QuerySpec::new().with_estado("").with_search_term("");
        assert!(spec.is_unconstrained());

        let spec = QuerySpec::new().with_color("softBlue");
        assert!(!spec.is_unconstrained());
    }

    #[test]
    fn test_sort_field_aliases() {
        assert_eq!(SortField::parse("fecha").unwrap(), SortField::FechaIngreso);
        assert_eq!(SortField::parse("fecha_ingreso").unwrap(), SortField::FechaIngreso);
        assert_eq!(SortField::parse("fechaIngreso").unwrap(), SortField::FechaIngreso);
        assert_eq!(SortField::parse("numero_expediente").unwrap(), SortField::Numero);
        assert_eq!(SortField::parse("MONTO").unwrap(), SortField::Monto);
    }

    #[test]
    fn test_unknown_sort_field_rejected() {
        let err = SortField::parse("observaciones").unwrap_err();
        assert_eq!(err.field(), Some("observaciones"));
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("ASC").unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc").unwrap(), SortDirection::Desc);
        assert!(SortDirection::parse("up").is_err());
    }
}
