//! Intake files: one client's answers written as TOML, replayed through the
//! form reducer so the same gating and list rules apply as for live input.

use crate::domain::catalog::Catalog;
use crate::domain::eligibility::OptionClass;
use crate::domain::form::{reduce, FormAction, FormState};
use crate::domain::model::{Attachment, FileSlot, Project, SocialLink};
use crate::domain::palette;
use crate::utils::error::{IntakeError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IntakeFile {
    pub name: String,
    pub email: String,
    pub desired_portfolio_style: String,
    pub achievements: Vec<String>,
    pub projects: Vec<Project>,
    pub social_links: Vec<SocialLink>,
    /// Plan amount, label or tier name.
    pub plan: Option<String>,
    pub features: Vec<String>,
    pub sections: Vec<String>,
    pub colors: Vec<String>,
    pub palettes: Vec<String>,
    pub other_requirements: String,
    pub consent_to_proceed: bool,
    pub files: IntakeFiles,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IntakeFiles {
    pub resume: Option<PathBuf>,
    pub profile_photo: Option<PathBuf>,
    pub payment_screenshot: Option<PathBuf>,
}

/// Result of replaying an intake file.
#[derive(Debug, Clone)]
pub struct IntakeReplay {
    pub form: FormState,
    /// Requested options the selected plan does not cover.
    pub skipped_options: Vec<(OptionClass, String)>,
}

impl IntakeFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| IntakeError::ConfigError {
            message: format!("intake file is not valid TOML: {}", e),
        })
    }

    /// Form actions in replay order. The plan comes before any option so the
    /// gating sees the intended tier.
    pub fn actions(&self, catalog: &Catalog) -> Vec<FormAction> {
        let mut actions = vec![
            FormAction::SetName(self.name.clone()),
            FormAction::SetEmail(self.email.clone()),
            FormAction::SetPortfolioStyle(self.desired_portfolio_style.clone()),
        ];

        if let Some(reference) = &self.plan {
            match catalog.resolve_plan(reference) {
                Some(plan) => actions.push(FormAction::SelectTier(Some(plan.tier))),
                None => tracing::warn!("Unknown plan {:?}, leaving plan unselected", reference),
            }
        }

        let options = self
            .features
            .iter()
            .map(|id| (OptionClass::Feature, id))
            .chain(self.sections.iter().map(|id| (OptionClass::Section, id)));
        actions.extend(options.map(|(class, id)| FormAction::SetOption {
            class,
            id: id.clone(),
            selected: true,
        }));

        actions.extend(self.achievements.iter().cloned().map(FormAction::AddAchievement));
        actions.extend(self.projects.iter().cloned().map(FormAction::AddProject));
        actions.extend(self.social_links.iter().cloned().map(FormAction::AddSocialLink));

        for name in &self.palettes {
            match palette::find_palette(name) {
                Some(found) => actions.push(FormAction::TogglePalette(found)),
                None => tracing::warn!("Unknown color palette {:?}, skipping", name),
            }
        }
        actions.extend(self.colors.iter().cloned().map(FormAction::AddCustomColor));

        actions.push(FormAction::SetOtherRequirements(self.other_requirements.clone()));
        actions.push(FormAction::SetConsent(self.consent_to_proceed));
        actions
    }

    /// Replays the answers and loads attachments; relative file paths resolve
    /// against `base_dir`.
    pub fn replay(&self, catalog: &Catalog, base_dir: &Path) -> Result<IntakeReplay> {
        let mut form = self
            .actions(catalog)
            .into_iter()
            .fold(FormState::default(), |state, action| reduce(catalog, state, action));

        let files = [
            (FileSlot::Resume, &self.files.resume),
            (FileSlot::ProfilePhoto, &self.files.profile_photo),
            (FileSlot::PaymentScreenshot, &self.files.payment_screenshot),
        ];
        for (slot, path) in files {
            let Some(path) = path else { continue };
            let full_path = base_dir.join(path);
            let attachment = Attachment::from_path(&full_path).map_err(|e| {
                IntakeError::InvalidConfigValueError {
                    field: format!("files.{}", slot),
                    value: full_path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            form = reduce(catalog, form, FormAction::Attach(slot, attachment));
        }

        let skipped_options: Vec<(OptionClass, String)> = self
            .features
            .iter()
            .map(|id| (OptionClass::Feature, id))
            .chain(self.sections.iter().map(|id| (OptionClass::Section, id)))
            .filter(|(class, id)| !form.selections.contains(*class, id))
            .map(|(class, id)| (class, id.clone()))
            .collect();

        for (class, id) in &skipped_options {
            tracing::warn!(
                "{} {:?} is not available on the selected plan (needs {}), skipped",
                class,
                id,
                catalog.minimum_tier(*class, id)
            );
        }

        Ok(IntakeReplay {
            form,
            skipped_options,
        })
    }
}
