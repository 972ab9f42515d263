use serde::{Deserialize, Serialize};

/// A record whose completion is measured field by field.
///
/// Every scored field is a declared scalar (`Option<String>`), in a fixed
/// order per type. Nested values are deliberately not representable so the
/// fill rule stays unambiguous.
pub trait FieldRecord {
    fn field_values(&self) -> Vec<Option<&str>>;
}

/// Firm metadata held by the cabinet-information provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CabinetRecord {
    pub name: Option<String>,
    pub siret: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub ape_code: Option<String>,
    pub legal_form: Option<String>,
    pub website: Option<String>,
}

impl FieldRecord for CabinetRecord {
    fn field_values(&self) -> Vec<Option<&str>> {
        vec![
            self.name.as_deref(),
            self.siret.as_deref(),
            self.address.as_deref(),
            self.postal_code.as_deref(),
            self.city.as_deref(),
            self.phone.as_deref(),
            self.email.as_deref(),
            self.ape_code.as_deref(),
            self.legal_form.as_deref(),
            self.website.as_deref(),
        ]
    }
}

/// Terms-of-service (CGV) configuration used in generated mission letters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CgvRecord {
    pub payment_terms: Option<String>,
    pub late_penalty_rate: Option<String>,
    pub revision_clause: Option<String>,
    pub liability_clause: Option<String>,
    pub termination_clause: Option<String>,
    pub jurisdiction: Option<String>,
}

impl FieldRecord for CgvRecord {
    fn field_values(&self) -> Vec<Option<&str>> {
        vec![
            self.payment_terms.as_deref(),
            self.late_penalty_rate.as_deref(),
            self.revision_clause.as_deref(),
            self.liability_clause.as_deref(),
            self.termination_clause.as_deref(),
            self.jurisdiction.as_deref(),
        ]
    }
}

/// One client roster entry. Scoring uses only the count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    pub name: String,
    pub email: Option<String>,
}

/// Count of values that are present and non-empty after trimming.
pub(crate) fn filled_count(values: &[Option<&str>]) -> usize {
    values
        .iter()
        .filter(|v| matches!(v, Some(s) if !s.trim().is_empty()))
        .count()
}

/// Fraction of a record's declared fields holding a non-empty value.
/// A record with zero declared fields yields 0.0.
pub fn fill_ratio(record: &dyn FieldRecord) -> f64 {
    let values = record.field_values();
    if values.is_empty() {
        return 0.0;
    }
    filled_count(&values) as f64 / values.len() as f64
}
