use vantage_intake::domain::catalog::Catalog;
use vantage_intake::domain::eligibility::{
    is_option_allowed, recompute, set_option, OptionClass, Selections, Tier,
};
use vantage_intake::{FormAction, FormState};

fn everything_allowed_on(tier: Tier) -> Selections {
    let catalog = Catalog::standard();
    let mut selections = Selections::default();
    for class in [OptionClass::Feature, OptionClass::Section] {
        for option in catalog.options(class) {
            selections = set_option(Some(tier), catalog, &selections, class, option.id, true);
        }
    }
    selections
}

fn all_selected_options_allowed(tier: Option<Tier>, selections: &Selections) -> bool {
    let catalog = Catalog::standard();
    [OptionClass::Feature, OptionClass::Section]
        .into_iter()
        .all(|class| {
            selections
                .set(class)
                .iter()
                .all(|id| is_option_allowed(tier, catalog.minimum_tier(class, id)))
        })
}

#[test]
fn test_allowed_is_monotone_in_tier() {
    for minimum in Tier::ALL {
        for lower in Tier::ALL {
            for higher in Tier::ALL.into_iter().filter(|t| *t >= lower) {
                if is_option_allowed(Some(lower), minimum) {
                    assert!(is_option_allowed(Some(higher), minimum));
                }
            }
        }
        assert!(!is_option_allowed(None, minimum));
    }
}

#[test]
fn test_premium_allows_every_known_option() {
    let catalog = Catalog::standard();
    let selections = everything_allowed_on(Tier::Premium);
    assert_eq!(selections.features.len(), catalog.features().len());
    assert_eq!(selections.sections.len(), catalog.sections().count());
}

#[test]
fn test_recompute_is_idempotent_and_never_adds() {
    let catalog = Catalog::standard();
    let full = everything_allowed_on(Tier::Premium);

    for tier in Tier::ALL.into_iter().map(Some).chain([None]) {
        let once = recompute(tier, catalog, &full);
        let twice = recompute(tier, catalog, &once);
        assert_eq!(once, twice, "tier {:?}", tier);
        assert!(once.features.is_subset(&full.features));
        assert!(once.sections.is_subset(&full.sections));
        assert!(all_selected_options_allowed(tier, &once));
    }
}

#[test]
fn test_downgrade_then_upgrade_does_not_restore_pruned_options() {
    let form = FormState::default()
        .apply(FormAction::SelectTier(Some(Tier::Premium)))
        .apply(FormAction::SetOption {
            class: OptionClass::Feature,
            id: "siteSearch".to_string(),
            selected: true,
        })
        .apply(FormAction::SetOption {
            class: OptionClass::Section,
            id: "blog".to_string(),
            selected: true,
        })
        .apply(FormAction::SetOption {
            class: OptionClass::Section,
            id: "aboutMe".to_string(),
            selected: true,
        });

    let downgraded = form.apply(FormAction::SelectTier(Some(Tier::Essential)));
    assert!(!downgraded.selections.contains(OptionClass::Feature, "siteSearch"));
    assert!(!downgraded.selections.contains(OptionClass::Section, "blog"));
    assert!(downgraded.selections.contains(OptionClass::Section, "aboutMe"));

    let upgraded = downgraded.apply(FormAction::SelectTier(Some(Tier::Premium)));
    assert_eq!(
        upgraded.selections.sections.iter().collect::<Vec<_>>(),
        vec!["aboutMe"]
    );
    assert!(upgraded.selections.features.is_empty());
}

#[test]
fn test_clearing_tier_clears_all_selections() {
    let form = FormState::default()
        .apply(FormAction::SelectTier(Some(Tier::Enhanced)))
        .apply(FormAction::SetOption {
            class: OptionClass::Feature,
            id: "contactForm".to_string(),
            selected: true,
        })
        .apply(FormAction::SelectTier(None));

    assert_eq!(form.tier, None);
    assert!(form.selections.is_empty());
}

#[test]
fn test_disallowed_toggle_leaves_selections_unchanged() {
    let catalog = Catalog::standard();
    let before = set_option(
        Some(Tier::Essential),
        catalog,
        &Selections::default(),
        OptionClass::Feature,
        "contactForm",
        true,
    );

    let after = set_option(
        Some(Tier::Essential),
        catalog,
        &before,
        OptionClass::Feature,
        "advancedAnimations",
        true,
    );
    assert_eq!(before, after);

    let unknown = set_option(
        Some(Tier::Premium),
        catalog,
        &before,
        OptionClass::Section,
        "guestbook",
        true,
    );
    assert_eq!(before, unknown);
}

#[test]
fn test_unknown_ids_resolve_to_highest_tier() {
    let catalog = Catalog::standard();
    assert_eq!(catalog.minimum_tier(OptionClass::Feature, "telepathy"), Tier::HIGHEST);
    assert_eq!(catalog.minimum_tier(OptionClass::Section, "contactForm"), Tier::HIGHEST);
}

#[test]
fn test_premium_to_essential_keeps_only_essential_options() {
    let catalog = Catalog::standard();
    let full = everything_allowed_on(Tier::Premium);

    let pruned = recompute(Some(Tier::Essential), catalog, &full);
    for class in [OptionClass::Feature, OptionClass::Section] {
        let mut expected: Vec<&str> = catalog
            .options(class)
            .into_iter()
            .filter(|o| o.min_tier == Tier::Essential)
            .map(|o| o.id)
            .collect();
        let mut kept: Vec<&str> = pruned.set(class).iter().map(String::as_str).collect();
        kept.sort_unstable();
        expected.sort_unstable();
        assert_eq!(kept, expected, "{}", class);
    }
}

#[test]
fn test_enhanced_drops_premium_feature() {
    let catalog = Catalog::standard();
    let selected = everything_allowed_on(Tier::Premium);
    let start = Selections {
        features: selected
            .features
            .into_iter()
            .filter(|id| id == "contactForm" || id == "siteSearch")
            .collect(),
        sections: Default::default(),
    };
    assert_eq!(start.features.len(), 2);

    let pruned = recompute(Some(Tier::Enhanced), catalog, &start);
    assert_eq!(pruned.features.iter().collect::<Vec<_>>(), vec!["contactForm"]);
}

#[test]
fn test_toggle_without_tier_is_noop() {
    let form = FormState::default().apply(FormAction::SetOption {
        class: OptionClass::Section,
        id: "profilePhoto".to_string(),
        selected: true,
    });
    assert!(form.selections.is_empty());
}
