//! Case-record data model
//!
//! An `Expediente` is the unit of data the query engine reads. The engine
//! never mutates records; lifecycle changes go through the repository.

mod estado;
mod record;

pub use estado::Estado;
pub use record::{Expediente, ExpedientePatch, NewExpediente, PagoDetalle, TipoPago, PAYMENT_TOLERANCE};
