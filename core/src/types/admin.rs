use serde::{Deserialize, Serialize};

use crate::validation::{ValidationErrors, Validator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationOrganization {
    pub id: String,
    pub name: String,
    pub description: String,
    pub iban: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationOrganizationInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl DonationOrganizationInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("name", &self.name);
        if let Some(iban) = &self.iban {
            let compact: String = iban.chars().filter(|c| !c.is_whitespace()).collect();
            let len = compact.chars().count();
            let well_formed = (15..=34).contains(&len)
                && compact.chars().take(2).all(|c| c.is_ascii_alphabetic())
                && compact.chars().skip(2).all(|c| c.is_ascii_alphanumeric());
            if !well_formed {
                v.reject("iban", "iban is not a valid account number");
            }
        }
        if let Some(phone) = &self.phone {
            v.phone("phone", phone);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryKind {
    Veterinarian,
    Petshop,
}

impl DirectoryKind {
    pub fn segment(self) -> &'static str {
        match self {
            DirectoryKind::Veterinarian => "veterinarians",
            DirectoryKind::Petshop => "petshops",
        }
    }
}

/// A veterinary clinic or pet shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: String,
    pub name: String,
    pub kind: DirectoryKind,
    pub city: String,
    pub address: String,
    pub phone: Option<String>,
    pub rating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(iban: Option<&str>) -> DonationOrganizationInput {
        DonationOrganizationInput {
            name: "Haytap".to_string(),
            description: String::new(),
            iban: iban.map(str::to_string),
            website: None,
            phone: None,
        }
    }

    #[test]
    fn iban_shape() {
        assert!(org(Some("TR33 0006 1005 1978 6457 8413 26")).validate().is_ok());
        assert!(org(Some("1234")).validate().is_err());
        assert!(org(None).validate().is_ok());
    }
}
