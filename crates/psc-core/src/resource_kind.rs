//! Mapping from a PSC `kind` to the change-event resource-kind vocabulary.

use crate::role::PscRole;

/// The downstream resource kind for a record.
///
/// An unrecognised `kind` maps to [`ResourceKind::Unmappable`] rather than an
/// empty string, so callers cannot mistake it for a real resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
  Mapped(&'static str),
  Unmappable,
}

impl ResourceKind {
  /// The wire value; empty for [`ResourceKind::Unmappable`].
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Mapped(kind) => kind,
      Self::Unmappable => "",
    }
  }

  pub fn is_mapped(self) -> bool { matches!(self, Self::Mapped(_)) }
}

/// PSC kinds collapse to four `company-psc-*` forms; beneficial-owner kinds
/// pass through unchanged.
pub fn map_resource_kind(kind: &str) -> ResourceKind {
  let Some(role) = PscRole::from_kind(kind) else {
    return ResourceKind::Unmappable;
  };
  ResourceKind::Mapped(match role {
    PscRole::IndividualPersonWithSignificantControl => "company-psc-individual",
    PscRole::CorporateEntityPersonWithSignificantControl => {
      "company-psc-corporate"
    }
    PscRole::LegalPersonPersonWithSignificantControl => "company-psc-legal",
    PscRole::SuperSecurePersonWithSignificantControl => {
      "company-psc-supersecure"
    }
    PscRole::IndividualBeneficialOwner
    | PscRole::CorporateEntityBeneficialOwner
    | PscRole::LegalPersonBeneficialOwner
    | PscRole::SuperSecureBeneficialOwner => role.label(),
  })
}
