//! Accountant and director extraction from the signature block.

use tracing::{debug, trace};

use super::patterns::{RESPONSIBILITY_RULES, ResponsibleRole};
use crate::models::statement::ResponsibilityFields;

impl ResponsibilityFields {
    fn slot(&mut self, role: ResponsibleRole) -> &mut Option<String> {
        match role {
            ResponsibleRole::Accountant => &mut self.accountant,
            ResponsibleRole::Director => &mut self.director,
        }
    }
}

/// Extract accountant and director from the text of the last pages.
///
/// Rules run in precedence order and every match of a rule is visited; a
/// field keeps the first non-empty value assigned to it.
pub fn extract_responsibility(text: &str) -> ResponsibilityFields {
    let mut fields = ResponsibilityFields::default();

    for rule in RESPONSIBILITY_RULES.iter() {
        for caps in rule.pattern.captures_iter(text) {
            let value = caps[1].trim();
            let slot = fields.slot(rule.role);
            if slot.is_none() && !value.is_empty() {
                trace!("Rule {} set {:?} = {}", rule.name, rule.role, value);
                *slot = Some(value.to_string());
            }
        }
    }

    debug!(
        "Responsibility: accountant={:?} director={:?}",
        fields.accountant, fields.director
    );
    fields
}

/// Join the last two pages (or the only page) into the signature-block text.
pub fn tail_text(pages: &[String]) -> String {
    let start = pages.len().saturating_sub(2);
    pages[start..].join(" ")
}
