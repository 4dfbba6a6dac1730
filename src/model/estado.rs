//! Closed set of case states

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a case record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Estado {
    Abierto,
    Pagado,
    Cerrado,
    Pendiente,
    #[serde(rename = "Faltan Firmas")]
    FaltanFirmas,
}

impl Estado {
    /// All states in declaration order
    pub const ALL: [Estado; 5] = [
        Estado::Abierto,
        Estado::Pagado,
        Estado::Cerrado,
        Estado::Pendiente,
        Estado::FaltanFirmas,
    ];

    /// Returns the display label, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Estado::Abierto => "Abierto",
            Estado::Pagado => "Pagado",
            Estado::Cerrado => "Cerrado",
            Estado::Pendiente => "Pendiente",
            Estado::FaltanFirmas => "Faltan Firmas",
        }
    }

    /// Parses a label case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        let folded = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|estado| estado.as_str().to_lowercase() == folded)
    }

    /// Returns true if `label` names this state, ignoring case
    pub fn matches_label(&self, label: &str) -> bool {
        self.as_str().to_lowercase() == label.to_lowercase()
    }
}

impl Default for Estado {
    fn default() -> Self {
        Estado::Abierto
    }
}

impl fmt::Display for Estado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
