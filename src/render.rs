//! Printable text of a facture or devis: the strings the document template
//! embeds as-is before the page is rasterized to PDF.

use std::fmt;

use serde::Serialize;
use time::macros::format_description;

use crate::error::FactureError;
use crate::facture::{parse_iso_date, Facture};
use crate::settings::CompanySettings;
use crate::words::amount_to_words_or_sentinel;

pub const TOTAL_IN_WORDS_LABEL: &str = "Arrêté la présente facture à la somme de :";
pub const CURRENCY_CODE: &str = "MAD";

/// Two decimals, ',' between thousands, '.' before decimals (3,500.75).
pub fn format_amount(v: f64) -> String {
    let s = format!("{:.2}", v.abs());
    let (int_part, dec_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut out = String::new();
    let chars: Vec<char> = int_part.chars().collect();
    let mut cnt = 0;
    for i in (0..chars.len()).rev() {
        if cnt == 3 {
            out.push(',');
            cnt = 0;
        }
        out.push(chars[i]);
        cnt += 1;
    }
    let int_with_sep: String = out.chars().rev().collect();
    let sign = if v < 0.0 && s != "0.00" { "-" } else { "" };
    format!("{sign}{int_with_sep}.{dec_part}")
}

pub fn format_mad(v: f64) -> String {
    format!("{} {}", format_amount(v), CURRENCY_CODE)
}

/// "2024-03-05" -> "05/03/2024".
pub fn format_display_date(iso: &str) -> Result<String, FactureError> {
    let date = parse_iso_date(iso)?;
    date.format(format_description!("[day]/[month]/[year]"))
        .map_err(|_| FactureError::InvalidDate(iso.to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryHeader {
    pub agency_name: String,
    pub logo: Option<String>,
    pub kind: String,
    pub number_line: String,
    pub date_line: String,
    pub ice_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientBlock {
    pub name: String,
    pub address: Option<String>,
    pub ice_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub description: String,
    pub quantity: String,
    pub prix_unitaire: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frais_service_unitaire: Option<String>,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalLine {
    pub label: String,
    pub value: String,
}

/// Everything printed on one document, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub header: SummaryHeader,
    pub client: Option<ClientBlock>,
    pub columns: Vec<&'static str>,
    pub rows: Vec<SummaryRow>,
    pub totals: Vec<TotalLine>,
    pub total_in_words_label: &'static str,
    pub total_in_words: String,
    pub footer: Vec<String>,
}

fn non_blank(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl DocumentSummary {
    pub fn build(facture: &Facture, settings: &CompanySettings) -> Result<Self, FactureError> {
        let show_margin = facture.show_margin;

        let header = SummaryHeader {
            agency_name: settings.agency_name_or_default().to_string(),
            logo: non_blank(&settings.logo),
            kind: facture.kind.as_str().to_string(),
            number_line: format!("N°: {}", facture.facture_number),
            date_line: format!("Date: {}", format_display_date(&facture.date)?),
            ice_line: non_blank(&settings.ice).map(|ice| format!("ICE: {ice}")),
        };

        let client = (!facture.client_name.trim().is_empty()).then(|| ClientBlock {
            name: facture.client_name.clone(),
            address: non_blank(&facture.client_address),
            ice_line: non_blank(&facture.client_ice).map(|ice| format!("ICE: {ice}")),
        });

        let mut columns = vec!["DESIGNATION", "QU", "PRIX UNITAIRE"];
        if show_margin {
            columns.push("FRAIS. SCE UNITAIRE");
        }
        columns.push("MONTANT TOTAL");

        let rows = facture
            .items
            .iter()
            .map(|item| SummaryRow {
                description: item.description.clone(),
                quantity: item.quantity.to_string(),
                prix_unitaire: format_amount(item.prix_unitaire),
                frais_service_unitaire: show_margin
                    .then(|| format_amount(item.frais_service_unitaire)),
                total: format_amount(item.total),
            })
            .collect();

        let mut totals = Vec::new();
        if show_margin {
            totals.push(TotalLine {
                label: "Prix Total H. Frais de SCE".to_string(),
                value: format_mad(facture.prix_total_hors_frais),
            });
            totals.push(TotalLine {
                label: "Frais de Service Hors TVA".to_string(),
                value: format_mad(facture.total_frais_service_ht),
            });
            totals.push(TotalLine {
                label: "TVA 20%".to_string(),
                value: format_mad(facture.tva),
            });
        }
        totals.push(TotalLine {
            label: format!("Total {}", facture.kind.label()),
            value: format_mad(facture.total),
        });

        let total_in_words = amount_to_words_or_sentinel(facture.total);
        tracing::debug!(number = %facture.facture_number, "document summary built");

        Ok(Self {
            header,
            client,
            columns,
            rows,
            totals,
            total_in_words_label: TOTAL_IN_WORDS_LABEL,
            total_in_words,
            footer: settings.footer_lines(),
        })
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.header;
        writeln!(f, "{}", h.agency_name)?;
        writeln!(f, "{}", h.kind.to_uppercase())?;
        writeln!(f, "{}", h.number_line)?;
        writeln!(f, "{}", h.date_line)?;
        if let Some(ice) = &h.ice_line {
            writeln!(f, "{ice}")?;
        }

        if let Some(client) = &self.client {
            writeln!(f)?;
            writeln!(f, "{}", client.name)?;
            if let Some(address) = &client.address {
                writeln!(f, "{address}")?;
            }
            if let Some(ice) = &client.ice_line {
                writeln!(f, "{ice}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", self.columns.join(" | "))?;
        for row in &self.rows {
            let mut cells = vec![row.description.as_str(), row.quantity.as_str(), row.prix_unitaire.as_str()];
            if let Some(frais) = &row.frais_service_unitaire {
                cells.push(frais);
            }
            cells.push(&row.total);
            writeln!(f, "{}", cells.join(" | "))?;
        }

        writeln!(f)?;
        for line in &self.totals {
            writeln!(f, "{}: {}", line.label, line.value)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", self.total_in_words_label)?;
        writeln!(f, "{}", self.total_in_words)?;

        if !self.footer.is_empty() {
            writeln!(f)?;
            write!(f, "{}", self.footer.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facture::{DocumentKind, FactureData, FactureItem};

    fn facture(show_margin: bool) -> Facture {
        let data = FactureData {
            facture_number: Some("F-2024-001".to_string()),
            client_name: "Atlas Voyages".to_string(),
            client_address: Some("Casablanca".to_string()),
            client_ice: None,
            date: "2024-03-05".to_string(),
            items: vec![FactureItem {
                description: "Omra package".to_string(),
                quantity: 2.0,
                prix_unitaire: 1500.0,
                frais_service_unitaire: 250.375,
                total: 0.0,
            }],
            kind: DocumentKind::Facture,
            show_margin,
            prix_total_hors_frais: 0.0,
            total_frais_service_ht: 0.0,
            tva: 0.0,
            total: 0.0,
            notes: None,
        }
        .with_computed_totals();
        Facture::from_data(Some(1), data)
    }

    #[test]
    fn amounts_use_thousand_separators() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(123.0), "123.00");
        assert_eq!(format_amount(3500.75), "3,500.75");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
        assert_eq!(format_amount(-123.5), "-123.50");
        assert_eq!(format_amount(-0.001), "0.00");
        assert_eq!(format_mad(3500.75), "3,500.75 MAD");
    }

    #[test]
    fn display_date_is_day_first() {
        assert_eq!(format_display_date("2024-03-05").unwrap(), "05/03/2024");
        assert!(format_display_date("05/03/2024").is_err());
    }

    #[test]
    fn summary_with_margin() {
        let settings = CompanySettings {
            agency_name: Some("Sahara Travel".into()),
            ice: Some("0023".into()),
            ..Default::default()
        };
        let s = DocumentSummary::build(&facture(true), &settings).unwrap();

        assert_eq!(s.header.agency_name, "Sahara Travel");
        assert_eq!(s.header.kind, "facture");
        assert_eq!(s.header.number_line, "N°: F-2024-001");
        assert_eq!(s.header.date_line, "Date: 05/03/2024");
        assert_eq!(s.header.ice_line.as_deref(), Some("ICE: 0023"));
        assert_eq!(s.columns.len(), 5);
        assert_eq!(s.rows[0].frais_service_unitaire.as_deref(), Some("250.38"));
        assert_eq!(s.rows[0].total, "3,500.75");

        let labels: Vec<&str> = s.totals.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Prix Total H. Frais de SCE",
                "Frais de Service Hors TVA",
                "TVA 20%",
                "Total Facture"
            ]
        );
        assert_eq!(s.totals[3].value, "3,500.75 MAD");
        assert_eq!(s.total_in_words_label, TOTAL_IN_WORDS_LABEL);
        assert_eq!(
            s.total_in_words,
            "Trois mille cinq cents dirhams et soixante-quinze centimes"
        );
        assert_eq!(s.footer, vec!["Sté. Sahara Travel"]);
    }

    #[test]
    fn summary_without_margin_drops_fee_column_and_rows() {
        let mut f = facture(false);
        f.kind = DocumentKind::Devis;
        let s = DocumentSummary::build(&f, &CompanySettings::default()).unwrap();

        assert_eq!(s.header.agency_name, "Your Agency");
        assert_eq!(
            s.columns,
            vec!["DESIGNATION", "QU", "PRIX UNITAIRE", "MONTANT TOTAL"]
        );
        assert_eq!(s.rows[0].frais_service_unitaire, None);
        assert_eq!(s.totals.len(), 1);
        assert_eq!(s.totals[0].label, "Total Devis");
        assert_eq!(s.totals[0].value, "3,000.00 MAD");
        assert_eq!(s.total_in_words, "Trois mille dirhams");
    }

    #[test]
    fn summary_text_contains_the_total_in_words() {
        let s = DocumentSummary::build(&facture(true), &CompanySettings::default()).unwrap();
        let text = s.to_string();
        assert!(text.contains("FACTURE"));
        assert!(text.contains("Omra package | 2 | 1,500.00 | 250.38 | 3,500.75"));
        assert!(text.contains("Arrêté la présente facture à la somme de :\nTrois mille cinq cents dirhams et soixante-quinze centimes"));
    }

    #[test]
    fn invalid_total_prints_sentinel() {
        let mut f = facture(true);
        f.total = f64::NAN;
        let s = DocumentSummary::build(&f, &CompanySettings::default()).unwrap();
        assert_eq!(s.total_in_words, "Invalid number");
    }

    #[test]
    fn bad_date_is_an_error() {
        let mut f = facture(true);
        f.date = "yesterday".into();
        assert!(matches!(
            DocumentSummary::build(&f, &CompanySettings::default()),
            Err(FactureError::InvalidDate(_))
        ));
    }
}
