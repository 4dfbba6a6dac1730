//! Result sorting for query execution
//!
//! Sort is stable: records with equal keys keep their collection order in
//! both directions, because `Desc` reverses the comparator and not the
//! sorted sequence.

use std::cmp::Ordering;

use crate::model::Expediente;
use crate::query::{SortDirection, SortField, SortSpec};

/// Sorts matched records
pub struct RecordSorter;

impl RecordSorter {
    /// Sorts records according to the sort specification
    pub fn sort(records: &mut [&Expediente], sort_spec: &SortSpec) {
        records.sort_by(|a, b| {
            let ordering = Self::compare_by(sort_spec.field, a, b);

            match sort_spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    /// Ascending comparison on one field.
    ///
    /// Dates compare by instant, amounts numerically (`total_cmp`, so NaN
    /// has a fixed place), labels and text by string order.
    pub fn compare_by(field: SortField, a: &Expediente, b: &Expediente) -> Ordering {
        match field {
            SortField::FechaIngreso => a.fecha_ingreso.cmp(&b.fecha_ingreso),
            SortField::Monto => a.monto.total_cmp(&b.monto),
            SortField::Estado => a.estado.as_str().cmp(b.estado.as_str()),
            SortField::Numero => a.numero_expediente.cmp(&b.numero_expediente),
            SortField::Color => a.color.cmp(&b.color),
            SortField::Descripcion => a.descripcion.cmp(&b.descripcion),
        }
    }
}
