use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Date;

use super::totals::FactureTotals;
use crate::error::{FactureError, FieldError};

/// Number given to a document saved without one.
pub const DEFAULT_FACTURE_NUMBER: &str = "FN-001";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    #[default]
    Facture,
    Devis,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Facture => "facture",
            DocumentKind::Devis => "devis",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Facture => "Facture",
            DocumentKind::Devis => "Devis",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactureItem {
    pub description: String,
    pub quantity: f64,
    pub prix_unitaire: f64,
    #[serde(default)]
    pub frais_service_unitaire: f64,
    #[serde(default)]
    pub total: f64,
}

fn default_true() -> bool {
    true
}

/// Create / update payload sent by the entry form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactureData {
    #[serde(default)]
    pub facture_number: Option<String>,
    pub client_name: String,
    #[serde(default)]
    pub client_address: Option<String>,
    #[serde(default)]
    pub client_ice: Option<String>,
    /// YYYY-MM-DD
    pub date: String,
    pub items: Vec<FactureItem>,
    #[serde(rename = "type", alias = "r#type", default)]
    pub kind: DocumentKind,
    #[serde(default = "default_true")]
    pub show_margin: bool,
    #[serde(default)]
    pub prix_total_hors_frais: f64,
    #[serde(default)]
    pub total_frais_service_ht: f64,
    #[serde(default)]
    pub tva: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facture {
    #[serde(default)]
    pub id: Option<i64>,
    pub facture_number: String,
    pub client_name: String,
    #[serde(default)]
    pub client_address: Option<String>,
    #[serde(default)]
    pub client_ice: Option<String>,
    pub date: String,
    pub items: Vec<FactureItem>,
    #[serde(rename = "type", alias = "r#type", default)]
    pub kind: DocumentKind,
    #[serde(default = "default_true")]
    pub show_margin: bool,
    #[serde(default)]
    pub prix_total_hors_frais: f64,
    #[serde(default)]
    pub total_frais_service_ht: f64,
    #[serde(default)]
    pub tva: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn parse_iso_date(s: &str) -> Result<Date, FactureError> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| FactureError::InvalidDate(s.to_string()))
}

impl FactureData {
    pub fn totals(&self) -> FactureTotals {
        FactureTotals::compute(&self.items, self.show_margin)
    }

    /// Refreshes every item total and the four aggregate fields.
    /// With the margin hidden, service fees are zeroed on every item.
    pub fn recompute_totals(&mut self) {
        for item in &mut self.items {
            if !self.show_margin {
                item.frais_service_unitaire = 0.0;
            }
            item.total = item.line_total(self.show_margin);
        }

        let totals = self.totals();
        self.prix_total_hors_frais = totals.prix_total_hors_frais;
        self.total_frais_service_ht = totals.total_frais_service_ht;
        self.tva = totals.tva;
        self.total = totals.total;
    }

    pub fn with_computed_totals(mut self) -> Self {
        self.recompute_totals();
        self
    }

    /// Checks the form and returns one error per faulty field.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.client_name.trim().is_empty() {
            errors.push(FieldError::new("client_name", "Le nom du client est obligatoire"));
        }

        if parse_iso_date(&self.date).is_err() {
            errors.push(FieldError::new("date", "La date doit être au format AAAA-MM-JJ"));
        }

        if self.items.is_empty() {
            errors.push(FieldError::new("items", "Le document doit contenir au moins une ligne"));
        }

        for (index, item) in self.items.iter().enumerate() {
            let field = |name: &str| format!("items[{index}].{name}");

            if item.description.trim().is_empty() {
                errors.push(FieldError::new(field("description"), "La désignation est obligatoire"));
            }
            if !(item.quantity.is_finite() && item.quantity > 0.0) {
                errors.push(FieldError::new(field("quantity"), "La quantité doit être supérieure à 0"));
            }
            if !(item.prix_unitaire.is_finite() && item.prix_unitaire >= 0.0) {
                errors.push(FieldError::new(
                    field("prix_unitaire"),
                    "Le prix unitaire ne peut pas être négatif",
                ));
            }
            if !(item.frais_service_unitaire.is_finite() && item.frais_service_unitaire >= 0.0) {
                errors.push(FieldError::new(
                    field("frais_service_unitaire"),
                    "Les frais de service ne peuvent pas être négatifs",
                ));
            }
        }

        errors
    }

    pub fn validated(self) -> Result<Self, FactureError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            tracing::warn!(count = errors.len(), "document rejected");
            Err(FactureError::Validation(errors))
        }
    }
}

impl Facture {
    /// Builds the stored document from a payload, falling back to
    /// [`DEFAULT_FACTURE_NUMBER`] when the form left the number empty.
    pub fn from_data(id: Option<i64>, data: FactureData) -> Self {
        let facture_number = data
            .facture_number
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FACTURE_NUMBER.to_string());

        Self {
            id,
            facture_number,
            client_name: data.client_name,
            client_address: data.client_address,
            client_ice: data.client_ice,
            date: data.date,
            items: data.items,
            kind: data.kind,
            show_margin: data.show_margin,
            prix_total_hors_frais: data.prix_total_hors_frais,
            total_frais_service_ht: data.total_frais_service_ht,
            tva: data.tva,
            total: data.total,
            notes: data.notes,
        }
    }

    /// "<type>_<number>.pdf", safe to use as a file name.
    pub fn export_file_name(&self) -> String {
        sanitize_filename(&format!("{}_{}.pdf", self.kind.as_str(), self.facture_number))
    }
}

pub fn sanitize_filename(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.' || ch == ' ';
        out.push(if ok { ch } else { '_' });
    }
    let trimmed = out.trim().to_string();
    if trimmed.is_empty() { "facture".to_string() } else { trimmed }
}
