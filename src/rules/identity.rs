//! Company and product name rules
//!
//! Both are the same check over a different field, so they share one
//! data-driven type.

use super::trait_def::{Rule, Severity, display_or};
use crate::core::snapshot::BuildConfig;

/// Warns when a named identity field is blank
pub struct IdentityFieldPresent {
  id: &'static str,
  label: &'static str,
  remediation: &'static str,
  field: fn(&BuildConfig) -> &str,
}

pub const COMPANY_NAME_PRESENT: IdentityFieldPresent = IdentityFieldPresent {
  id: "company-name-present",
  label: "Company Name",
  remediation: "Where: Player Settings > Company Name",
  field: company_name,
};

pub const PRODUCT_NAME_PRESENT: IdentityFieldPresent = IdentityFieldPresent {
  id: "product-name-present",
  label: "Product Name",
  remediation: "Where: Player Settings > Product Name",
  field: product_name,
};

fn company_name(config: &BuildConfig) -> &str {
  &config.company_name
}

fn product_name(config: &BuildConfig) -> &str {
  &config.product_name
}

impl Rule for IdentityFieldPresent {
  fn id(&self) -> &'static str {
    self.id
  }

  fn label(&self) -> &'static str {
    self.label
  }

  fn severity(&self) -> Severity {
    Severity::Warning
  }

  fn applies_to(&self, _config: &BuildConfig) -> bool {
    true
  }

  fn check(&self, config: &BuildConfig) -> bool {
    !(self.field)(config).trim().is_empty()
  }

  fn failure_message(&self, _config: &BuildConfig) -> String {
    format!("{} is empty.", self.label)
  }

  fn pass_message(&self, _config: &BuildConfig) -> String {
    format!("{} is set.", self.label)
  }

  fn remediation(&self) -> &'static str {
    self.remediation
  }

  fn value(&self, config: &BuildConfig) -> String {
    display_or((self.field)(config), "(empty)")
  }

  fn scope(&self) -> &'static str {
    "any platform"
  }
}
