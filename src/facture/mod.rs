//! Invoice / quote documents and the totals the entry form computes for them.

mod model;
mod totals;

pub use model::{
    parse_iso_date, sanitize_filename, DocumentKind, Facture, FactureData, FactureItem,
    DEFAULT_FACTURE_NUMBER,
};
pub use totals::{FactureTotals, TVA_RATE};
