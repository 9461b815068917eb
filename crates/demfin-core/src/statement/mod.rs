//! Financial statement field extraction.

pub mod identity;
pub mod patterns;
pub mod responsibility;

pub use identity::{
    IdentityExtractor, extract_administrator, extract_fund_name, extract_identity, extract_period,
    extract_tax_id,
};
pub use responsibility::{extract_responsibility, tail_text};
