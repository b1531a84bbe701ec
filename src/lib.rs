//! Document core for the facturation desktop app.
//!
//! The UI layer owns forms, tables, the theme editor and PDF rasterization;
//! this crate owns the arithmetic and the printable text that ends up on an
//! invoice or quote.

pub mod error;
pub mod facture;
pub mod render;
pub mod settings;
pub mod words;

pub use error::{AmountError, FactureError, FieldError};
pub use facture::{DocumentKind, Facture, FactureData, FactureItem, FactureTotals};
pub use render::{format_amount, format_mad, DocumentSummary, TOTAL_IN_WORDS_LABEL};
pub use settings::CompanySettings;
pub use words::{
    amount_to_words, amount_to_words_or_sentinel, number_to_french_words, Amount, AmountInput,
    INVALID_NUMBER,
};
