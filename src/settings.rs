//! Company settings printed in the document header and legal footer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FactureError;

/// Settings as the app stores them: a flat key/value table whose values
/// may be blank. Blank values are read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySettings {
    #[serde(default)]
    pub agency_name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub type_societe: Option<String>,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub ice: Option<String>,
    /// Identifiant fiscal.
    #[serde(default, rename = "if")]
    pub identifiant_fiscal: Option<String>,
    #[serde(default)]
    pub rc: Option<String>,
    #[serde(default)]
    pub patente: Option<String>,
    #[serde(default)]
    pub cnss: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub rib: Option<String>,
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl CompanySettings {
    /// Reads the key/value table; unknown keys are ignored.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).cloned();
        Self {
            agency_name: get("agency_name"),
            logo: get("logo"),
            type_societe: get("type_societe"),
            capital: get("capital"),
            address: get("address"),
            phone: get("phone"),
            email: get("email"),
            ice: get("ice"),
            identifiant_fiscal: get("if"),
            rc: get("rc"),
            patente: get("patente"),
            cnss: get("cnss"),
            bank_name: get("bank_name"),
            rib: get("rib"),
        }
        .normalized()
    }

    pub fn from_json_str(json: &str) -> Result<Self, FactureError> {
        let settings: CompanySettings = serde_json::from_str(json)?;
        Ok(settings.normalized())
    }

    /// Trims every value and drops the blank ones.
    pub fn normalized(self) -> Self {
        let clean = |v: Option<String>| present(&v).map(str::to_string);
        Self {
            agency_name: clean(self.agency_name),
            logo: clean(self.logo),
            type_societe: clean(self.type_societe),
            capital: clean(self.capital),
            address: clean(self.address),
            phone: clean(self.phone),
            email: clean(self.email),
            ice: clean(self.ice),
            identifiant_fiscal: clean(self.identifiant_fiscal),
            rc: clean(self.rc),
            patente: clean(self.patente),
            cnss: clean(self.cnss),
            bank_name: clean(self.bank_name),
            rib: clean(self.rib),
        }
    }

    pub fn agency_name_or_default(&self) -> &str {
        present(&self.agency_name).unwrap_or("Your Agency")
    }

    /// Legal mentions printed at the bottom of every page, in order.
    /// Every entry after the first is prefixed with "- ".
    pub fn footer_lines(&self) -> Vec<String> {
        let mut entries = vec![format!(
            "Sté. {} {}",
            present(&self.agency_name).unwrap_or_default(),
            present(&self.type_societe).unwrap_or_default()
        )
        .trim_end()
        .to_string()];

        let labelled = [
            (&self.capital, "Capital: ", " Dhs"),
            (&self.address, "Siège Social: ", ""),
            (&self.phone, "Fix: ", ""),
            (&self.email, "Email: ", ""),
            (&self.ice, "ICE: ", ""),
            (&self.identifiant_fiscal, "IF: ", ""),
            (&self.rc, "RC: ", ""),
            (&self.patente, "Patente: ", ""),
            (&self.cnss, "CNSS: ", ""),
        ];
        for (value, prefix, suffix) in labelled {
            if let Some(v) = present(value) {
                entries.push(format!("{prefix}{v}{suffix}"));
            }
        }

        if let (Some(bank), Some(rib)) = (present(&self.bank_name), present(&self.rib)) {
            entries.push(format!("Bank {bank}: {rib}"));
        }

        entries
            .into_iter()
            .enumerate()
            .map(|(idx, e)| if idx > 0 { format!("- {e}") } else { e })
            .collect()
    }
}
