//! Identity field extraction from the first pages of a statement.
//!
//! Each field is resolved by an ordered chain of rules; the first rule that
//! yields a value wins.

use regex::Regex;
use tracing::debug;

use super::patterns::{ADMINISTERED_BY, DAY_30_DATE, FISCAL_YEAR_END, STATEMENT_HEADING, TAX_ID};
use crate::models::statement::IdentityFields;

/// Literal marker a heading-derived fund name must contain.
const FUND_MARKER: &str = "Fundo de Investimento";

type FundNameRule = fn(&[&str]) -> Option<String>;

/// Fund name rules over the trimmed non-empty lines of the second page.
const FUND_NAME_CHAIN: &[(&str, FundNameRule)] = &[
    ("heading", fund_name_after_heading),
    ("keyword", fund_name_keyword_line),
    ("first_line", fund_name_first_line),
];

/// Identity field extractor.
pub struct IdentityExtractor {
    want_administrator: bool,
}

impl IdentityExtractor {
    /// Create a new extractor that looks for the administrator.
    pub fn new() -> Self {
        Self {
            want_administrator: true,
        }
    }

    /// Set whether to look for the administering entity.
    pub fn with_administrator(mut self, want: bool) -> Self {
        self.want_administrator = want;
        self
    }

    /// Extract identity fields from the first two (optionally three) pages.
    pub fn extract(
        &self,
        first_page: &str,
        second_page: &str,
        third_page: Option<&str>,
    ) -> IdentityFields {
        let fields = IdentityFields {
            fund_name: extract_fund_name(second_page),
            administrator: if self.want_administrator {
                extract_administrator(first_page, second_page)
            } else {
                None
            },
            tax_id: extract_tax_id(first_page),
            period: extract_period(second_page, third_page),
        };

        debug!(
            "Identity: fund_name={:?} administrator={:?} tax_id={:?} period={:?}",
            fields.fund_name, fields.administrator, fields.tax_id, fields.period
        );
        fields
    }
}

impl Default for IdentityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract identity fields from page texts.
pub fn extract_identity(
    first_page: &str,
    second_page: &str,
    third_page: Option<&str>,
    want_administrator: bool,
) -> IdentityFields {
    IdentityExtractor::new()
        .with_administrator(want_administrator)
        .extract(first_page, second_page, third_page)
}

/// The 21 characters after "CNPJ" on the first page, trimmed.
pub fn extract_tax_id(first_page: &str) -> Option<String> {
    TAX_ID
        .captures(first_page)
        .map(|caps| caps[1].trim().to_string())
}

/// Fund name from the second page; populated whenever the page has any text.
pub fn extract_fund_name(second_page: &str) -> Option<String> {
    let lines = non_empty_lines(second_page);

    FUND_NAME_CHAIN.iter().find_map(|(name, rule)| {
        let found = rule(&lines);
        if found.is_some() {
            debug!("Fund name resolved by {} rule", name);
        }
        found
    })
}

fn fund_name_after_heading(lines: &[&str]) -> Option<String> {
    let i = lines.iter().position(|l| STATEMENT_HEADING.is_match(l))?;

    let candidate = match (lines.get(i + 1), lines.get(i + 2)) {
        (Some(a), Some(b)) => format!("{} {}", a, b),
        (Some(a), None) => a.to_string(),
        _ => return None,
    };

    candidate.contains(FUND_MARKER).then_some(candidate)
}

fn fund_name_keyword_line(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find(|l| l.to_lowercase().contains("fundo de investimento"))
        .map(|l| l.to_string())
}

fn fund_name_first_line(lines: &[&str]) -> Option<String> {
    lines.first().map(|l| l.to_string())
}

/// Reporting period: preferred pattern on every page before the fallback.
pub fn extract_period(second_page: &str, third_page: Option<&str>) -> Option<String> {
    let patterns: [&Regex; 2] = [&*FISCAL_YEAR_END, &*DAY_30_DATE];
    let pages: Vec<&str> = std::iter::once(second_page).chain(third_page).collect();

    patterns.iter().find_map(|pattern| {
        pages.iter().find_map(|page| {
            pattern
                .captures(page)
                .map(|caps| caps[1].trim().to_string())
                .filter(|v| !v.is_empty())
        })
    })
}

/// Administering entity from the first two pages.
pub fn extract_administrator(first_page: &str, second_page: &str) -> Option<String> {
    [first_page, second_page]
        .iter()
        .find_map(|page| {
            ADMINISTERED_BY
                .captures(page)
                .map(|caps| caps[1].trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .or_else(|| administrator_label_line(first_page, second_page))
}

fn administrator_label_line(first_page: &str, second_page: &str) -> Option<String> {
    first_page
        .lines()
        .chain(second_page.lines())
        .filter(|line| line.contains(':') && line.to_lowercase().contains("administrador"))
        .find_map(|line| {
            let value = line.rsplit(':').next().unwrap_or_default().trim();
            (!value.is_empty()).then(|| value.to_string())
        })
}

fn non_empty_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}
