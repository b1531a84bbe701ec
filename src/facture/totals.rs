use serde::Serialize;

use super::model::FactureItem;

/// TVA applied to service fees. Item prices are outside its scope.
pub const TVA_RATE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FactureTotals {
    /// Σ quantité × prix unitaire.
    pub prix_total_hors_frais: f64,
    /// Σ quantité × frais de service unitaire; the fees are entered TTC.
    pub total_frais_service_ttc: f64,
    pub total_frais_service_ht: f64,
    pub tva: f64,
    pub total: f64,
}

impl FactureTotals {
    pub fn compute(items: &[FactureItem], show_margin: bool) -> Self {
        let mut prix_total_hors_frais = 0.0;
        let mut total_frais_service_ttc = 0.0;

        for item in items {
            prix_total_hors_frais += item.price_subtotal();
            total_frais_service_ttc += item.fees_subtotal(show_margin);
        }

        let total_frais_service_ht = total_frais_service_ttc / (1.0 + TVA_RATE);
        let tva = total_frais_service_ht * TVA_RATE;

        Self {
            prix_total_hors_frais,
            total_frais_service_ttc,
            total_frais_service_ht,
            tva,
            total: prix_total_hors_frais + total_frais_service_ttc,
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

impl FactureItem {
    pub fn price_subtotal(&self) -> f64 {
        finite_or_zero(self.quantity) * finite_or_zero(self.prix_unitaire)
    }

    pub fn fees_subtotal(&self, show_margin: bool) -> f64 {
        if !show_margin {
            return 0.0;
        }
        finite_or_zero(self.quantity) * finite_or_zero(self.frais_service_unitaire)
    }

    /// Montant total of the row.
    pub fn line_total(&self, show_margin: bool) -> f64 {
        self.price_subtotal() + self.fees_subtotal(show_margin)
    }
}
