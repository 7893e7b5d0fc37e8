//! In-progress form state and its transitions.
//!
//! [`reduce`] is the only way the state changes. Tier changes prune the
//! selections before returning, so the state never holds an option the
//! current tier does not cover.

use crate::domain::catalog::Catalog;
use crate::domain::eligibility::{self, OptionClass, Selections, Tier};
use crate::domain::model::{Attachment, FileSlot, Order, Project, SocialLink};
use crate::domain::palette::{self, ColorPalette};
use crate::utils::validation::is_plausible_email;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub desired_portfolio_style: String,
    pub achievements: Vec<String>,
    pub projects: Vec<Project>,
    pub social_links: Vec<SocialLink>,
    pub tier: Option<Tier>,
    pub selections: Selections,
    pub preferred_colors: Vec<String>,
    pub other_requirements: String,
    pub consent_to_proceed: bool,
    pub attachments: BTreeMap<FileSlot, Attachment>,
}

#[derive(Debug, Clone)]
pub enum FormAction {
    SetName(String),
    SetEmail(String),
    SetPortfolioStyle(String),
    SetOtherRequirements(String),
    SelectTier(Option<Tier>),
    SetOption {
        class: OptionClass,
        id: String,
        selected: bool,
    },
    AddAchievement(String),
    RemoveAchievement(usize),
    AddProject(Project),
    RemoveProject(usize),
    AddSocialLink(SocialLink),
    RemoveSocialLink(usize),
    ToggleColor(String),
    AddCustomColor(String),
    TogglePalette(&'static ColorPalette),
    SetConsent(bool),
    Attach(FileSlot, Attachment),
    Detach(FileSlot),
    Reset,
}

pub fn reduce(catalog: &Catalog, state: FormState, action: FormAction) -> FormState {
    match action {
        FormAction::SetName(name) => FormState { name, ..state },
        FormAction::SetEmail(email) => FormState { email, ..state },
        FormAction::SetPortfolioStyle(desired_portfolio_style) => FormState {
            desired_portfolio_style,
            ..state
        },
        FormAction::SetOtherRequirements(other_requirements) => FormState {
            other_requirements,
            ..state
        },
        FormAction::SelectTier(tier) => {
            let selections = eligibility::recompute(tier, catalog, &state.selections);
            FormState {
                tier,
                selections,
                ..state
            }
        }
        FormAction::SetOption {
            class,
            id,
            selected,
        } => {
            let selections =
                eligibility::set_option(state.tier, catalog, &state.selections, class, &id, selected);
            FormState { selections, ..state }
        }
        FormAction::AddAchievement(text) => {
            let text = text.trim();
            if text.is_empty() {
                return state;
            }
            let mut achievements = state.achievements;
            achievements.push(text.to_string());
            FormState {
                achievements,
                ..state
            }
        }
        FormAction::RemoveAchievement(index) => FormState {
            achievements: without_index(state.achievements, index),
            ..state
        },
        FormAction::AddProject(project) => {
            if project.name.trim().is_empty() {
                return state;
            }
            let mut projects = state.projects;
            projects.push(project);
            FormState { projects, ..state }
        }
        FormAction::RemoveProject(index) => FormState {
            projects: without_index(state.projects, index),
            ..state
        },
        FormAction::AddSocialLink(link) => {
            if link.platform.trim().is_empty() || link.url.trim().is_empty() {
                return state;
            }
            let mut social_links = state.social_links;
            social_links.push(link);
            FormState {
                social_links,
                ..state
            }
        }
        FormAction::RemoveSocialLink(index) => FormState {
            social_links: without_index(state.social_links, index),
            ..state
        },
        FormAction::ToggleColor(color) => FormState {
            preferred_colors: palette::toggle_color(&state.preferred_colors, &color),
            ..state
        },
        FormAction::AddCustomColor(input) => {
            let Some(color) = palette::normalize_hex(&input) else {
                tracing::debug!(input = %input, "ignoring invalid hex color");
                return state;
            };
            if state.preferred_colors.contains(&color) {
                return state;
            }
            let mut preferred_colors = state.preferred_colors;
            preferred_colors.push(color);
            FormState {
                preferred_colors,
                ..state
            }
        }
        FormAction::TogglePalette(chosen) => FormState {
            preferred_colors: palette::toggle_palette(&state.preferred_colors, chosen),
            ..state
        },
        FormAction::SetConsent(consent_to_proceed) => FormState {
            consent_to_proceed,
            ..state
        },
        FormAction::Attach(slot, attachment) => {
            let mut attachments = state.attachments;
            attachments.insert(slot, attachment);
            FormState {
                attachments,
                ..state
            }
        }
        FormAction::Detach(slot) => {
            let mut attachments = state.attachments;
            attachments.remove(&slot);
            FormState {
                attachments,
                ..state
            }
        }
        FormAction::Reset => FormState::default(),
    }
}

fn without_index<T>(mut items: Vec<T>, index: usize) -> Vec<T> {
    if index < items.len() {
        items.remove(index);
    }
    items
}

impl FormState {
    /// Applies an action against the standard catalog.
    pub fn apply(self, action: FormAction) -> Self {
        reduce(Catalog::standard(), self, action)
    }

    pub fn attachment(&self, slot: FileSlot) -> Option<&Attachment> {
        self.attachments.get(&slot)
    }

    /// Builds the persisted record. `uploaded` maps each slot to its resolved URL.
    pub fn to_order(
        &self,
        catalog: &Catalog,
        uploaded: &BTreeMap<FileSlot, String>,
        submitted_at: DateTime<Utc>,
    ) -> Order {
        Order {
            name: self.name.clone(),
            email: self.email.clone(),
            desired_portfolio_style: self.desired_portfolio_style.clone(),
            achievements: self.achievements.clone(),
            projects: self.projects.clone(),
            social_links: self.social_links.clone(),
            price_range: self
                .tier
                .and_then(|tier| catalog.plan_for_tier(tier))
                .map(|plan| plan.value.to_string()),
            selected_features: self.selections.features.iter().cloned().collect(),
            preferred_colors: self.preferred_colors.clone(),
            selected_sections: self.selections.sections.iter().cloned().collect(),
            other_requirements: self.other_requirements.clone(),
            consent_to_proceed: self.consent_to_proceed,
            resume: uploaded.get(&FileSlot::Resume).cloned(),
            profile_photo: uploaded.get(&FileSlot::ProfilePhoto).cloned(),
            payment_screenshot: uploaded.get(&FileSlot::PaymentScreenshot).cloned(),
            submission_date: Some(submitted_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    PriceRange,
    PaymentScreenshot,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::PriceRange => "priceRange",
            FormField::PaymentScreenshot => "paymentScreenshot",
        }
    }
}

/// Per-field validation messages, reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field.as_str(), message))
            .collect();
        f.write_str(&lines.join("\n"))
    }
}

pub fn validate(state: &FormState) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if state.name.trim().is_empty() {
        errors.insert(FormField::Name, "Your Full Name is required.");
    }

    if state.email.trim().is_empty() {
        errors.insert(FormField::Email, "Your Email Address is required.");
    } else if !is_plausible_email(&state.email) {
        errors.insert(FormField::Email, "Please enter a valid email address.");
    }

    if state.tier.is_none() {
        errors.insert(FormField::PriceRange, "Please select a portfolio plan.");
    }

    if state.consent_to_proceed && state.attachment(FileSlot::PaymentScreenshot).is_none() {
        errors.insert(
            FormField::PaymentScreenshot,
            "Please upload a screenshot of your successful UPI payment.",
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
