//! Financial statement data models.

use serde::{Deserialize, Serialize};

/// Fields expected near the front of a statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFields {
    /// Fund name.
    pub fund_name: Option<String>,

    /// Administering entity.
    pub administrator: Option<String>,

    /// Raw CNPJ span as it appears after the label.
    pub tax_id: Option<String>,

    /// Reporting period text.
    pub period: Option<String>,
}

/// Fields expected in the signature block at the back of a statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsibilityFields {
    /// Responsible accountant.
    pub accountant: Option<String>,

    /// Responsible director.
    pub director: Option<String>,
}

/// One row of the batch report.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Source file name (basename).
    pub file: String,

    /// Fund name from the second page.
    pub fund_name: Option<String>,

    /// Administering entity.
    pub administrator: Option<String>,

    /// Responsible accountant from the signature block.
    pub accountant: Option<String>,

    /// Responsible director from the signature block.
    pub director: Option<String>,

    /// Raw CNPJ span following the label.
    pub tax_id: Option<String>,

    /// Reporting period text.
    pub period: Option<String>,
}

impl ExtractionResult {
    /// Merge front and back extraction into a report row.
    pub fn new(
        file: impl Into<String>,
        identity: IdentityFields,
        responsibility: ResponsibilityFields,
    ) -> Self {
        Self {
            file: file.into(),
            fund_name: identity.fund_name,
            administrator: identity.administrator,
            accountant: responsibility.accountant,
            director: responsibility.director,
            tax_id: identity.tax_id,
            period: identity.period,
        }
    }

    /// Number of populated optional fields.
    pub fn filled_fields(&self) -> usize {
        [
            &self.fund_name,
            &self.administrator,
            &self.accountant,
            &self.director,
            &self.tax_id,
            &self.period,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }
}

/// Successful results in enumeration order.
pub type ResultSet = Vec<ExtractionResult>;

/// A document that produced no report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    /// Source file name (basename).
    pub file: String,
    /// Why extraction failed.
    pub reason: String,
}

/// Outcome of processing one document.
pub type DocumentOutcome = std::result::Result<ExtractionResult, SkippedDocument>;

/// Report column names, in order.
pub const REPORT_COLUMNS: [&str; 7] = [
    "file",
    "fund_name",
    "administrator",
    "accountant",
    "director",
    "tax_id",
    "period",
];
