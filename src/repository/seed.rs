//! Sample records for a fresh store

use chrono::{DateTime, TimeZone, Utc};

use super::errors::RepositoryResult;
use super::ExpedienteRepository;
use crate::model::{Estado, NewExpediente, PagoDetalle, TipoPago};

/// The two sample cases loaded on first run.
///
/// The first one is taken in at `now`.
pub fn sample_expedientes(now: DateTime<Utc>) -> Vec<NewExpediente> {
    let utc = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single();

    let mut oficina = NewExpediente::new("0001/2024", "softBlue", 75000.50)
        .with_fecha_ingreso(now)
        .with_estado(Estado::Abierto)
        .with_descripcion("Compra de materiales de oficina para la municipalidad")
        .with_pago(PagoDetalle::new(
            TipoPago::Cheque,
            "Librería Municipal",
            "00123456",
            75000.50,
        ));
    oficina.numero_resolucion = Some("RES-001/2024".to_string());
    oficina.fecha_inicio = utc(2024, 1, 15);
    oficina.fecha_resolucion = utc(2024, 2, 1);
    oficina.observaciones = Some("Compra de útiles de oficina según presupuesto 2024".to_string());
    oficina.color_bibliorato = Some("softBlue".to_string());

    let mut vehiculos = NewExpediente::new("0002/2024", "softPink", 150000.75)
        .with_estado(Estado::Pagado)
        .with_descripcion("Mantenimiento de vehículos municipales")
        .with_pago(PagoDetalle::new(
            TipoPago::Transferencia,
            "Taller Municipal",
            "TRF-789012",
            150000.75,
        ));
    vehiculos.fecha_ingreso = utc(2024, 1, 20);
    vehiculos.numero_resolucion = Some("RES-002/2024".to_string());
    vehiculos.fecha_inicio = utc(2024, 1, 20);
    vehiculos.fecha_resolucion = utc(2024, 2, 5);
    vehiculos.observaciones = Some("Reparación de vehículos de la flota municipal".to_string());
    vehiculos.color_bibliorato = Some("softPink".to_string());

    vec![oficina, vehiculos]
}

/// Inserts the sample records if the repository is empty.
///
/// Returns how many records were inserted.
pub fn seed_if_empty<R: ExpedienteRepository>(repo: &mut R) -> RepositoryResult<usize> {
    if !repo.list()?.is_empty() {
        return Ok(0);
    }

    let samples = sample_expedientes(Utc::now());
    let count = samples.len();
    for sample in samples {
        repo.create(sample)?;
    }
    Ok(count)
}
