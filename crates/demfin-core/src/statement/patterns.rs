//! Regex patterns for Brazilian fund financial statements.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CNPJ label followed by a fixed-width span (mask plus trailing punctuation)
    pub static ref TAX_ID: Regex = Regex::new(
        r"(?is)CNPJ(.{21})"
    ).unwrap();

    // Statement heading that precedes the fund name on the second page
    pub static ref STATEMENT_HEADING: Regex = Regex::new(
        r"(?i)Demonstração (?:Financeira|Contábil)"
    ).unwrap();

    // Reporting period, preferred form
    pub static ref FISCAL_YEAR_END: Regex = Regex::new(
        r"(?i)Referentes ao Exercício Findo em[ \t]*([^\n]+)"
    ).unwrap();

    // Reporting period, bare "30 de <month> de <year>" form
    pub static ref DAY_30_DATE: Regex = Regex::new(
        r"(?i)\b(30 de [^\n]+)"
    ).unwrap();

    // Administering entity, prose form
    pub static ref ADMINISTERED_BY: Regex = Regex::new(
        r"(?i)Administrado pel[ao][ \t]+([^\n]+)"
    ).unwrap();
}

/// Role a signature-block label refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsibleRole {
    Accountant,
    Director,
}

/// A label pattern in the signature block and the field it fills.
#[derive(Debug)]
pub struct ResponsibilityRule {
    /// Short rule name for logging.
    pub name: &'static str,
    /// Label followed by a colon; group 1 is the value.
    pub pattern: Regex,
    /// Field the value is written to.
    pub role: ResponsibleRole,
}

impl ResponsibilityRule {
    fn new(name: &'static str, pattern: &str, role: ResponsibleRole) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            role,
        }
    }
}

lazy_static! {
    /// Signature-block rules, in precedence order.
    pub static ref RESPONSIBILITY_RULES: Vec<ResponsibilityRule> = vec![
        ResponsibilityRule::new(
            "contador",
            r"(?i)(?:Nome do )?Contador(?: Responsável)?:\s*([^\n]*)",
            ResponsibleRole::Accountant,
        ),
        ResponsibilityRule::new(
            "diretor",
            r"(?i)(?:Nome do )?Diretor(?: Responsável)?:\s*([^\n]*)",
            ResponsibleRole::Director,
        ),
        ResponsibilityRule::new(
            "responsavel",
            r"(?i)Responsável(?: Técnico)?:\s*([^\n]*)",
            ResponsibleRole::Accountant,
        ),
        ResponsibilityRule::new(
            "assinatura_contador",
            r"(?i)Assinatura do Contador:\s*([^\n]*)",
            ResponsibleRole::Accountant,
        ),
        ResponsibilityRule::new(
            "assinatura_diretor",
            r"(?i)Assinatura do Diretor:\s*([^\n]*)",
            ResponsibleRole::Director,
        ),
    ];
}
