//! The aggregate draft accumulated across wizard steps.
//!
//! 向导各步骤累积的草稿数据。

use serde::{Deserialize, Serialize};

use super::step::StepKind;
use super::validation::{FieldError, FieldValidator};

const MIN_NAME_LEN: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDraft {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
}

impl AccountDraft {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        FieldValidator::new()
            .required("full_name", &self.full_name)
            .min_len("full_name", &self.full_name, MIN_NAME_LEN)
            .required("email", &self.email)
            .email("email", &self.email)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationDraft {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl OrganizationDraft {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = FieldValidator::new();
        v.required("name", &self.name)
            .min_len("name", &self.name, MIN_NAME_LEN);
        if let Some(email) = &self.contact_email {
            v.email("contact_email", email);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDraft {
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub city: String,
}

impl LocationDraft {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        FieldValidator::new()
            .required("name", &self.name)
            .required("city", &self.city)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TeamDraft {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        FieldValidator::new()
            .required("name", &self.name)
            .min_len("name", &self.name, MIN_NAME_LEN)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Admin,
    Coach,
}

/// An admin or coach invited during onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInvite {
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub role: StaffRole,
    /// Name of a team from the Teams step.
    #[serde(default)]
    pub team: Option<String>,
}

impl StaffInvite {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        FieldValidator::new()
            .required("email", &self.email)
            .email("email", &self.email)
            .finish()
    }
}

/// In-memory aggregate of every step's data. Never persisted locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingDraft {
    pub account: Option<AccountDraft>,
    pub organization: Option<OrganizationDraft>,
    pub locations: Option<Vec<LocationDraft>>,
    pub teams: Option<Vec<TeamDraft>>,
    pub staff: Option<Vec<StaffInvite>>,
}

impl OnboardingDraft {
    /// Shallow merge: domains present in `patch` overwrite, the rest are kept.
    pub fn merge(&mut self, patch: DraftPatch) {
        if let Some(account) = patch.account {
            self.account = Some(account);
        }
        if let Some(organization) = patch.organization {
            self.organization = Some(organization);
        }
        if let Some(locations) = patch.locations {
            self.locations = Some(locations);
        }
        if let Some(teams) = patch.teams {
            self.teams = Some(teams);
        }
        if let Some(staff) = patch.staff {
            self.staff = Some(staff);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial payload reported by one step. `None` means "key not present".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPatch {
    #[serde(default)]
    pub account: Option<AccountDraft>,
    #[serde(default)]
    pub organization: Option<OrganizationDraft>,
    #[serde(default)]
    pub locations: Option<Vec<LocationDraft>>,
    #[serde(default)]
    pub teams: Option<Vec<TeamDraft>>,
    #[serde(default)]
    pub staff: Option<Vec<StaffInvite>>,
}

impl DraftPatch {
    pub fn account(account: AccountDraft) -> Self {
        Self {
            account: Some(account),
            ..Default::default()
        }
    }

    pub fn organization(organization: OrganizationDraft) -> Self {
        Self {
            organization: Some(organization),
            ..Default::default()
        }
    }

    pub fn locations(locations: Vec<LocationDraft>) -> Self {
        Self {
            locations: Some(locations),
            ..Default::default()
        }
    }

    pub fn teams(teams: Vec<TeamDraft>) -> Self {
        Self {
            teams: Some(teams),
            ..Default::default()
        }
    }

    pub fn staff(staff: Vec<StaffInvite>) -> Self {
        Self {
            staff: Some(staff),
            ..Default::default()
        }
    }

    /// Step domains this patch touches.
    pub fn kinds(&self) -> Vec<StepKind> {
        let mut kinds = Vec::new();
        if self.account.is_some() {
            kinds.push(StepKind::Account);
        }
        if self.organization.is_some() {
            kinds.push(StepKind::Organization);
        }
        if self.locations.is_some() {
            kinds.push(StepKind::Locations);
        }
        if self.teams.is_some() {
            kinds.push(StepKind::Teams);
        }
        if self.staff.is_some() {
            kinds.push(StepKind::Staff);
        }
        kinds
    }

    /// Validate every domain present in the patch.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = FieldValidator::new();
        for kind in self.kinds() {
            if let Some(Err(errors)) = self.validate_slice(kind) {
                for error in errors {
                    v.push(error);
                }
            }
        }
        v.finish()
    }

    /// Validate the slice owned by one step kind; `None` when the patch doesn't carry it.
    ///
    /// The completion step owns no data and is always satisfied.
    pub fn validate_slice(&self, kind: StepKind) -> Option<Result<(), Vec<FieldError>>> {
        match kind {
            StepKind::Account => self.account.as_ref().map(AccountDraft::validate),
            StepKind::Organization => self.organization.as_ref().map(OrganizationDraft::validate),
            StepKind::Locations => self
                .locations
                .as_deref()
                .map(|items| validate_items("locations", items, LocationDraft::validate)),
            StepKind::Teams => self
                .teams
                .as_deref()
                .map(|items| validate_items("teams", items, TeamDraft::validate)),
            StepKind::Staff => self
                .staff
                .as_deref()
                .map(|items| validate_items("staff", items, StaffInvite::validate)),
            StepKind::Completion => Some(Ok(())),
        }
    }
}

impl From<OnboardingDraft> for DraftPatch {
    fn from(draft: OnboardingDraft) -> Self {
        Self {
            account: draft.account,
            organization: draft.organization,
            locations: draft.locations,
            teams: draft.teams,
            staff: draft.staff,
        }
    }
}

fn validate_items<T>(
    prefix: &str,
    items: &[T],
    check: impl Fn(&T) -> Result<(), Vec<FieldError>>,
) -> Result<(), Vec<FieldError>> {
    let mut v = FieldValidator::new();
    for (index, item) in items.iter().enumerate() {
        if let Err(errors) = check(item) {
            v.nested(prefix, index, errors);
        }
    }
    v.finish()
}

/// Flat object written to the backend when the wizard finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingSubmission {
    pub owner_full_name: String,
    pub owner_email: String,
    pub owner_phone: Option<String>,
    pub owner_job_title: Option<String>,
    pub organization_name: Option<String>,
    pub organization_website: Option<String>,
    pub organization_email: Option<String>,
    pub organization_phone: Option<String>,
    pub locations: Vec<LocationDraft>,
    pub teams: Vec<TeamDraft>,
    pub staff: Vec<StaffInvite>,
}

impl OnboardingSubmission {
    /// Flatten a draft. Returns `None` when the required account slice is missing.
    pub fn from_draft(draft: &OnboardingDraft) -> Option<Self> {
        let account = draft.account.as_ref()?;
        let organization = draft.organization.as_ref();
        Some(Self {
            owner_full_name: account.full_name.trim().to_string(),
            owner_email: account.email.trim().to_string(),
            owner_phone: account.phone.clone(),
            owner_job_title: account.job_title.clone(),
            organization_name: organization.map(|o| o.name.trim().to_string()),
            organization_website: organization.and_then(|o| o.website.clone()),
            organization_email: organization.and_then(|o| o.contact_email.clone()),
            organization_phone: organization.and_then(|o| o.phone.clone()),
            locations: draft.locations.clone().unwrap_or_default(),
            teams: draft.teams.clone().unwrap_or_default(),
            staff: draft.staff.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> AccountDraft {
        AccountDraft {
            full_name: "Ana Reyes".into(),
            email: "ana@reyes-interiors.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn merge_overwrites_present_keys_and_keeps_absent_ones() {
        let mut draft = OnboardingDraft::default();
        draft.merge(DraftPatch::account(account()));
        draft.merge(DraftPatch::teams(vec![TeamDraft {
            name: "Residential".into(),
            description: None,
        }]));

        assert_eq!(draft.account, Some(account()));
        assert_eq!(draft.teams.as_ref().map(Vec::len), Some(1));

        draft.merge(DraftPatch::teams(Vec::new()));
        assert_eq!(draft.teams, Some(Vec::new()));
        assert_eq!(draft.account, Some(account()));
        assert!(draft.organization.is_none());
    }

    #[test]
    fn empty_patch_is_identity() {
        let mut draft = OnboardingDraft::default();
        draft.merge(DraftPatch::account(account()));
        let before = draft.clone();
        draft.merge(DraftPatch::default());
        assert_eq!(draft, before);
    }

    #[test]
    fn account_validation_requires_name_and_email_shape() {
        let errors = AccountDraft {
            full_name: "A".into(),
            email: "not-an-email".into(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["full_name", "email"]);
    }

    #[test]
    fn patch_validation_reports_nested_list_fields() {
        let patch = DraftPatch::locations(vec![
            LocationDraft {
                name: "Showroom".into(),
                address: String::new(),
                city: "Austin".into(),
            },
            LocationDraft::default(),
        ]);
        let errors = patch.validate().unwrap_err();
        assert_eq!(errors[0].field, "locations[1].name");
        assert_eq!(errors[1].field, "locations[1].city");
    }

    #[test]
    fn submission_requires_account_and_flattens_optional_slices() {
        let mut draft = OnboardingDraft::default();
        assert!(OnboardingSubmission::from_draft(&draft).is_none());

        draft.merge(DraftPatch::account(account()));
        let submission = OnboardingSubmission::from_draft(&draft).unwrap();
        assert_eq!(submission.owner_email, "ana@reyes-interiors.com");
        assert!(submission.organization_name.is_none());
        assert!(submission.locations.is_empty());

        let json = serde_json::to_value(&submission).unwrap();
        assert!(json.get("owner_full_name").is_some());
        assert!(json.get("account").is_none());
    }

    #[test]
    fn slice_validation_is_per_step_kind() {
        let patch = DraftPatch::teams(vec![TeamDraft::default()]);
        assert!(patch.validate_slice(StepKind::Account).is_none());
        let errors = patch.validate_slice(StepKind::Teams).unwrap().unwrap_err();
        assert_eq!(errors[0].field, "teams[0].name");
        assert_eq!(DraftPatch::default().validate_slice(StepKind::Completion), Some(Ok(())));
    }

    #[test]
    fn patch_kinds_lists_touched_domains() {
        let mut patch = DraftPatch::account(account());
        patch.staff = Some(Vec::new());
        assert_eq!(patch.kinds(), vec![StepKind::Account, StepKind::Staff]);
    }
}
