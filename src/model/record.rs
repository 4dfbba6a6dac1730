//! Case record and payment detail types
//!
//! Field names follow the persisted JSON shape (`id_expediente`,
//! `numero_expediente`, `fecha_ingreso`, ...), so a stored collection
//! deserializes directly into `Vec<Expediente>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::estado::Estado;

/// Absolute tolerance when comparing the payment sum against `monto`
pub const PAYMENT_TOLERANCE: f64 = 0.01;

/// Payment instrument of a payment detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoPago {
    Cheque,
    Transferencia,
}

/// A single payment that settles part of a case amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagoDetalle {
    pub id: String,
    pub tipo_pago: TipoPago,
    pub nombre_pago: String,
    pub numero_pago: String,
    pub monto: f64,
}

impl PagoDetalle {
    /// Creates a payment with a freshly generated id
    pub fn new(
        tipo_pago: TipoPago,
        nombre_pago: impl Into<String>,
        numero_pago: impl Into<String>,
        monto: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tipo_pago,
            nombre_pago: nombre_pago.into(),
            numero_pago: numero_pago.into(),
            monto,
        }
    }
}

/// A municipal case record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expediente {
    /// Opaque identity, assigned once at creation
    pub id_expediente: String,
    /// Display number, not required to be unique
    pub numero_expediente: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_resolucion: Option<String>,
    /// Intake timestamp
    pub fecha_ingreso: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_resolucion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tipo: String,
    /// Category label used for grouping
    pub color: String,
    #[serde(default)]
    pub descripcion: String,
    pub monto: f64,
    pub estado: Estado,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub pagos: Vec<PagoDetalle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_bibliorato: Option<String>,
}

impl Expediente {
    /// Returns the record id
    pub fn id(&self) -> &str {
        &self.id_expediente
    }

    /// Sum of all payment amounts
    pub fn total_pagos(&self) -> f64 {
        self.pagos.iter().map(|p| p.monto).sum()
    }

    /// Returns true if the payments add up to `monto` within tolerance.
    ///
    /// Checked on write; the query engine does not care.
    pub fn pagos_balanced(&self) -> bool {
        pagos_balanced(self.monto, &self.pagos)
    }

    /// Rejects a non-positive amount or payments that do not add up to it
    pub fn check_amounts(&self) -> Result<(), String> {
        check_amounts(self.monto, &self.pagos)
    }
}

fn pagos_balanced(monto: f64, pagos: &[PagoDetalle]) -> bool {
    let total: f64 = pagos.iter().map(|p| p.monto).sum();
    (total - monto).abs() < PAYMENT_TOLERANCE
}

fn check_amounts(monto: f64, pagos: &[PagoDetalle]) -> Result<(), String> {
    if !(monto.is_finite() && monto > 0.0) {
        return Err(format!("monto must be greater than zero, got {}", monto));
    }
    if let Some(pago) = pagos.iter().find(|p| !(p.monto.is_finite() && p.monto > 0.0)) {
        return Err(format!(
            "payment {} must be greater than zero, got {}",
            pago.numero_pago, pago.monto
        ));
    }
    if !pagos_balanced(monto, pagos) {
        let total: f64 = pagos.iter().map(|p| p.monto).sum();
        return Err(format!(
            "payments add up to {:.2}, expected {:.2}",
            total, monto
        ));
    }
    Ok(())
}

/// Input for creating a record; the repository assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpediente {
    pub numero_expediente: String,
    #[serde(default)]
    pub numero_resolucion: Option<String>,
    /// Defaults to the creation instant when absent
    #[serde(default)]
    pub fecha_ingreso: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fecha_inicio: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fecha_resolucion: Option<DateTime<Utc>>,
    #[serde(default = "default_tipo")]
    pub tipo: String,
    pub color: String,
    #[serde(default)]
    pub descripcion: String,
    pub monto: f64,
    #[serde(default)]
    pub estado: Estado,
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub pagos: Vec<PagoDetalle>,
    #[serde(default)]
    pub color_bibliorato: Option<String>,
}

fn default_tipo() -> String {
    "Gasto".to_string()
}

impl NewExpediente {
    /// Minimal input with the required fields set
    pub fn new(numero: impl Into<String>, color: impl Into<String>, monto: f64) -> Self {
        Self {
            numero_expediente: numero.into(),
            numero_resolucion: None,
            fecha_ingreso: None,
            fecha_inicio: None,
            fecha_resolucion: None,
            tipo: default_tipo(),
            color: color.into(),
            descripcion: String::new(),
            monto,
            estado: Estado::default(),
            observaciones: None,
            pagos: Vec::new(),
            color_bibliorato: None,
        }
    }

    pub fn with_estado(mut self, estado: Estado) -> Self {
        self.estado = estado;
        self
    }

    pub fn with_descripcion(mut self, descripcion: impl Into<String>) -> Self {
        self.descripcion = descripcion.into();
        self
    }

    pub fn with_fecha_ingreso(mut self, fecha: DateTime<Utc>) -> Self {
        self.fecha_ingreso = Some(fecha);
        self
    }

    pub fn with_pago(mut self, pago: PagoDetalle) -> Self {
        self.pagos.push(pago);
        self
    }

    /// Same amount rules as [`Expediente::check_amounts`]
    pub fn check_amounts(&self) -> Result<(), String> {
        check_amounts(self.monto, &self.pagos)
    }

    /// Materializes the record with the given id and intake fallback
    pub fn into_expediente(self, id: String, now: DateTime<Utc>) -> Expediente {
        Expediente {
            id_expediente: id,
            numero_expediente: self.numero_expediente,
            numero_resolucion: self.numero_resolucion,
            fecha_ingreso: self.fecha_ingreso.unwrap_or(now),
            fecha_inicio: self.fecha_inicio,
            fecha_resolucion: self.fecha_resolucion,
            tipo: self.tipo,
            color: self.color,
            descripcion: self.descripcion,
            monto: self.monto,
            estado: self.estado,
            observaciones: self.observaciones,
            pagos: self.pagos,
            color_bibliorato: self.color_bibliorato,
        }
    }
}

/// Partial update merged field-by-field into an existing record.
///
/// Identity and intake timestamp are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpedientePatch {
    pub numero_expediente: Option<String>,
    pub numero_resolucion: Option<String>,
    pub fecha_inicio: Option<DateTime<Utc>>,
    pub fecha_resolucion: Option<DateTime<Utc>>,
    pub tipo: Option<String>,
    pub color: Option<String>,
    pub descripcion: Option<String>,
    pub monto: Option<f64>,
    pub estado: Option<Estado>,
    pub observaciones: Option<String>,
    pub pagos: Option<Vec<PagoDetalle>>,
    pub color_bibliorato: Option<String>,
}

impl ExpedientePatch {
    /// Merges every present field into `target`
    pub fn apply(self, target: &mut Expediente) {
        if let Some(v) = self.numero_expediente {
            target.numero_expediente = v;
        }
        if let Some(v) = self.numero_resolucion {
            target.numero_resolucion = Some(v);
        }
        if let Some(v) = self.fecha_inicio {
            target.fecha_inicio = Some(v);
        }
        if let Some(v) = self.fecha_resolucion {
            target.fecha_resolucion = Some(v);
        }
        if let Some(v) = self.tipo {
            target.tipo = v;
        }
        if let Some(v) = self.color {
            target.color = v;
        }
        if let Some(v) = self.descripcion {
            target.descripcion = v;
        }
        if let Some(v) = self.monto {
            target.monto = v;
        }
        if let Some(v) = self.estado {
            target.estado = v;
        }
        if let Some(v) = self.observaciones {
            target.observaciones = Some(v);
        }
        if let Some(v) = self.pagos {
            target.pagos = v;
        }
        if let Some(v) = self.color_bibliorato {
            target.color_bibliorato = Some(v);
        }
    }

    /// Returns true if no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> Expediente {
        NewExpediente::new("0001/2024", "softBlue", 100.0)
            .with_descripcion("Compra de materiales")
            .with_pago(PagoDetalle::new(TipoPago::Cheque, "Libreria", "0012", 60.0))
            .with_pago(PagoDetalle::new(TipoPago::Transferencia, "Libreria", "TRF-1", 40.0))
            .into_expediente("exp-1".to_string(), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_pagos_balanced_within_tolerance() {
        let mut exp = sample();
        assert!(exp.pagos_balanced());

        exp.monto = 100.005;
        assert!(exp.pagos_balanced());

        exp.monto = 100.5;
        assert!(!exp.pagos_balanced());
    }

    #[test]
    fn test_check_amounts() {
        let mut exp = sample();
        assert!(exp.check_amounts().is_ok());

        exp.monto = 0.0;
        assert!(exp.check_amounts().unwrap_err().contains("greater than zero"));

        exp.monto = 120.0;
        assert!(exp.check_amounts().unwrap_err().contains("add up to 100.00"));

        let unpaid = NewExpediente::new("0002/2024", "softPink", 50.0);
        assert!(unpaid.check_amounts().is_err());
    }

    #[test]
    fn test_deserialize_stored_shape() {
        let exp: Expediente = serde_json::from_value(json!({
            "id_expediente": "abc",
            "numero_expediente": "0002/2024",
            "fecha_ingreso": "2024-01-20T03:00:00.000Z",
            "tipo": "Gasto",
            "color": "softPink",
            "descripcion": "Mantenimiento de vehiculos",
            "monto": 150000.75,
            "estado": "Faltan Firmas",
            "pagos": []
        }))
        .unwrap();

        assert_eq!(exp.id(), "abc");
        assert_eq!(exp.estado, Estado::FaltanFirmas);
        assert_eq!(exp.fecha_ingreso, Utc.with_ymd_and_hms(2024, 1, 20, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_patch_merges_present_fields_only() {
        let mut exp = sample();
        let patch = ExpedientePatch {
            estado: Some(Estado::Pagado),
            monto: Some(250.0),
            ..Default::default()
        };
        patch.apply(&mut exp);

        assert_eq!(exp.estado, Estado::Pagado);
        assert_eq!(exp.monto, 250.0);
        assert_eq!(exp.numero_expediente, "0001/2024");
        assert_eq!(exp.id(), "exp-1");
    }

    #[test]
    fn test_new_expediente_defaults_intake_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 5, 12, 0, 0).unwrap();
        let exp = NewExpediente::new("X", "softGray", 1.0).into_expediente("id".into(), now);
        assert_eq!(exp.fecha_ingreso, now);
        assert_eq!(exp.tipo, "Gasto");
    }
}
