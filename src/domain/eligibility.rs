//! Plan-tier gating for optional features and portfolio sections.
//!
//! Every function here is pure: it takes the current tier, the catalog and the
//! selections, and returns new selections. Callers run [`recompute`] on every
//! tier change before deriving anything else from the selections.

use crate::domain::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Service level. The derive order is the eligibility order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Essential,
    Enhanced,
    Premium,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Essential, Tier::Enhanced, Tier::Premium];

    /// Most restrictive tier, used when an option has no catalog entry.
    pub const HIGHEST: Tier = Tier::Premium;

    pub fn index(self) -> usize {
        match self {
            Tier::Essential => 0,
            Tier::Enhanced => 1,
            Tier::Premium => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Essential => "essential",
            Tier::Enhanced => "enhanced",
            Tier::Premium => "premium",
        }
    }

    pub fn parse(value: &str) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionClass {
    Feature,
    Section,
}

impl fmt::Display for OptionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionClass::Feature => f.write_str("feature"),
            OptionClass::Section => f.write_str("section"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections {
    pub features: BTreeSet<String>,
    pub sections: BTreeSet<String>,
}

impl Selections {
    pub fn set(&self, class: OptionClass) -> &BTreeSet<String> {
        match class {
            OptionClass::Feature => &self.features,
            OptionClass::Section => &self.sections,
        }
    }

    fn set_mut(&mut self, class: OptionClass) -> &mut BTreeSet<String> {
        match class {
            OptionClass::Feature => &mut self.features,
            OptionClass::Section => &mut self.sections,
        }
    }

    pub fn contains(&self, class: OptionClass, id: &str) -> bool {
        self.set(class).contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.sections.is_empty()
    }
}

/// No tier selected means nothing is selectable.
pub fn is_option_allowed(current: Option<Tier>, minimum: Tier) -> bool {
    match current {
        Some(tier) => tier.index() >= minimum.index(),
        None => false,
    }
}

/// Drops every selection the tier does not cover, including everything when
/// no tier is selected. Returns an equal value when nothing had to go.
pub fn recompute(tier: Option<Tier>, catalog: &Catalog, selections: &Selections) -> Selections {
    let keep = |class: OptionClass, set: &BTreeSet<String>| -> BTreeSet<String> {
        set.iter()
            .filter(|id| {
                let allowed = is_option_allowed(tier, catalog.minimum_tier(class, id));
                if !allowed {
                    tracing::debug!(%class, id = %id, ?tier, "pruning selection above current tier");
                }
                allowed
            })
            .cloned()
            .collect()
    };

    Selections {
        features: keep(OptionClass::Feature, &selections.features),
        sections: keep(OptionClass::Section, &selections.sections),
    }
}

/// Turns an option on or off. Disallowed or unknown options are ignored
/// silently; that is a UX rule, not a failure.
pub fn set_option(
    tier: Option<Tier>,
    catalog: &Catalog,
    selections: &Selections,
    class: OptionClass,
    id: &str,
    desired: bool,
) -> Selections {
    let Some(option) = catalog.find(class, id) else {
        if !desired && tier.is_some() && selections.contains(class, id) {
            let mut next = selections.clone();
            next.set_mut(class).remove(id);
            return next;
        }
        tracing::debug!(%class, id, "ignoring toggle of unknown option");
        return selections.clone();
    };

    if !is_option_allowed(tier, option.min_tier) {
        tracing::debug!(%class, id, ?tier, min_tier = %option.min_tier, "ignoring toggle above current tier");
        return selections.clone();
    }

    let mut next = selections.clone();
    if desired {
        next.set_mut(class).insert(option.id.to_string());
    } else {
        next.set_mut(class).remove(option.id);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(features: &[&str], sections: &[&str]) -> Selections {
        Selections {
            features: features.iter().map(|s| s.to_string()).collect(),
            sections: sections.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_tier_ordering_matches_index() {
        assert!(Tier::Essential < Tier::Enhanced);
        assert!(Tier::Enhanced < Tier::Premium);
        for pair in Tier::ALL.windows(2) {
            assert!(pair[0].index() < pair[1].index());
        }
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!(Tier::parse("Enhanced"), Some(Tier::Enhanced));
        assert_eq!(Tier::parse(" premium "), Some(Tier::Premium));
        assert_eq!(Tier::parse("gold"), None);
    }

    #[test]
    fn test_no_tier_allows_nothing() {
        for minimum in Tier::ALL {
            assert!(!is_option_allowed(None, minimum));
        }
    }

    #[test]
    fn test_unknown_ids_are_treated_as_premium() {
        let catalog = Catalog::standard();
        let selections = select(&["holographicCursor"], &["clientLogin"]);

        let under_enhanced = recompute(Some(Tier::Enhanced), catalog, &selections);
        assert!(under_enhanced.is_empty());

        let under_premium = recompute(Some(Tier::Premium), catalog, &selections);
        assert_eq!(under_premium, selections);
    }

    #[test]
    fn test_unknown_id_cannot_be_toggled_on() {
        let catalog = Catalog::standard();
        let selections = Selections::default();
        let next = set_option(
            Some(Tier::Premium),
            catalog,
            &selections,
            OptionClass::Feature,
            "holographicCursor",
            true,
        );
        assert_eq!(next, selections);
    }

    #[test]
    fn test_toggle_off_allowed_option() {
        let catalog = Catalog::standard();
        let selections = select(&["contactForm"], &[]);
        let next = set_option(
            Some(Tier::Essential),
            catalog,
            &selections,
            OptionClass::Feature,
            "contactForm",
            false,
        );
        assert!(next.features.is_empty());
    }
}
