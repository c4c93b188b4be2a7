//! The closed PSC role taxonomy and the classifier over it.
//!
//! A record's `kind` arrives as a free-form string from upstream. It is
//! resolved against a lookup table built once from [`PscRole`]; anything that
//! does not match a label exactly (case-sensitive) is [`RoleCategory::Unknown`].

use std::{
  collections::{HashMap, HashSet},
  sync::LazyLock,
};

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator as _, IntoStaticStr};

// ─── Taxonomy ────────────────────────────────────────────────────────────────

/// One of the eight recognised PSC kinds. The label is the upstream `kind`
/// string and is also what gets written into stored documents.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PscRole {
  IndividualPersonWithSignificantControl,
  IndividualBeneficialOwner,
  CorporateEntityPersonWithSignificantControl,
  CorporateEntityBeneficialOwner,
  LegalPersonPersonWithSignificantControl,
  LegalPersonBeneficialOwner,
  SuperSecurePersonWithSignificantControl,
  SuperSecureBeneficialOwner,
}

/// The coarse grouping a role belongs to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RoleCategory {
  Individual,
  CorporateOrLegal,
  Secure,
  /// The `kind` did not match any taxonomy member.
  Unknown,
}

static BY_LABEL: LazyLock<HashMap<&'static str, PscRole>> =
  LazyLock::new(|| PscRole::iter().map(|r| (r.label(), r)).collect());

static INDIVIDUAL: LazyLock<HashSet<PscRole>> =
  LazyLock::new(|| members_of(RoleCategory::Individual));
static CORPORATE_OR_LEGAL: LazyLock<HashSet<PscRole>> =
  LazyLock::new(|| members_of(RoleCategory::CorporateOrLegal));
static SECURE: LazyLock<HashSet<PscRole>> =
  LazyLock::new(|| members_of(RoleCategory::Secure));

fn members_of(category: RoleCategory) -> HashSet<PscRole> {
  PscRole::iter().filter(|r| r.category() == category).collect()
}

impl PscRole {
  /// Exact reverse lookup of an upstream `kind` string.
  pub fn from_kind(kind: &str) -> Option<Self> { BY_LABEL.get(kind).copied() }

  pub fn label(self) -> &'static str { self.into() }

  pub fn category(self) -> RoleCategory {
    match self {
      Self::IndividualPersonWithSignificantControl
      | Self::IndividualBeneficialOwner => RoleCategory::Individual,
      Self::CorporateEntityPersonWithSignificantControl
      | Self::CorporateEntityBeneficialOwner
      | Self::LegalPersonPersonWithSignificantControl
      | Self::LegalPersonBeneficialOwner => RoleCategory::CorporateOrLegal,
      Self::SuperSecurePersonWithSignificantControl
      | Self::SuperSecureBeneficialOwner => RoleCategory::Secure,
    }
  }

  pub fn is_beneficial_owner(self) -> bool {
    matches!(
      self,
      Self::IndividualBeneficialOwner
        | Self::CorporateEntityBeneficialOwner
        | Self::LegalPersonBeneficialOwner
        | Self::SuperSecureBeneficialOwner
    )
  }
}

impl RoleCategory {
  pub fn label(self) -> &'static str { self.into() }
}

// ─── Classifier ──────────────────────────────────────────────────────────────

/// Category of `kind`; never fails.
pub fn category_of(kind: &str) -> RoleCategory {
  PscRole::from_kind(kind).map_or(RoleCategory::Unknown, PscRole::category)
}

pub fn is_individual(kind: &str) -> bool { member(&INDIVIDUAL, kind) }

pub fn is_corporate_or_legal(kind: &str) -> bool {
  member(&CORPORATE_OR_LEGAL, kind)
}

pub fn is_secure(kind: &str) -> bool { member(&SECURE, kind) }

fn member(set: &HashSet<PscRole>, kind: &str) -> bool {
  PscRole::from_kind(kind).is_some_and(|r| set.contains(&r))
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  const TABLE: [(&str, RoleCategory); 8] = [
    (
      "individual-person-with-significant-control",
      RoleCategory::Individual,
    ),
    ("individual-beneficial-owner", RoleCategory::Individual),
    (
      "corporate-entity-person-with-significant-control",
      RoleCategory::CorporateOrLegal,
    ),
    (
      "corporate-entity-beneficial-owner",
      RoleCategory::CorporateOrLegal,
    ),
    (
      "legal-person-person-with-significant-control",
      RoleCategory::CorporateOrLegal,
    ),
    ("legal-person-beneficial-owner", RoleCategory::CorporateOrLegal),
    (
      "super-secure-person-with-significant-control",
      RoleCategory::Secure,
    ),
    ("super-secure-beneficial-owner", RoleCategory::Secure),
  ];

  #[test]
  fn table_matches_taxonomy() {
    for (kind, category) in TABLE {
      assert_eq!(category_of(kind), category, "kind: {kind}");
      assert_eq!(PscRole::from_kind(kind).map(PscRole::label), Some(kind));
    }
    assert_eq!(PscRole::iter().count(), TABLE.len());
  }

  #[test]
  fn predicates_are_exclusive_and_exhaustive() {
    for role in PscRole::iter() {
      let kind = role.label();
      let hits = [
        is_individual(kind),
        is_corporate_or_legal(kind),
        is_secure(kind),
      ];
      assert_eq!(
        hits.iter().filter(|h| **h).count(),
        1,
        "{kind} must be in exactly one sub-taxonomy"
      );
    }
  }

  #[test]
  fn unknown_kinds_match_nothing() {
    for kind in [
      "",
      "not-a-real-kind",
      "Individual-Person-With-Significant-Control",
      "individual-person-with-significant-control ",
      "individual",
      "super-secure",
    ] {
      assert_eq!(category_of(kind), RoleCategory::Unknown, "kind: {kind:?}");
      assert!(!is_individual(kind));
      assert!(!is_corporate_or_legal(kind));
      assert!(!is_secure(kind));
    }
  }

  #[test]
  fn serde_label_matches_kind_string() {
    let json =
      serde_json::to_string(&PscRole::LegalPersonBeneficialOwner).unwrap();
    assert_eq!(json, "\"legal-person-beneficial-owner\"");
    let category = serde_json::to_string(&RoleCategory::CorporateOrLegal).unwrap();
    assert_eq!(category, "\"corporate-or-legal\"");
  }
}
