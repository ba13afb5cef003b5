//! Wizard step definitions.
//!
//! 引导步骤定义。

use serde::{Deserialize, Serialize};

/// Stable 1-based step identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(u8);

impl StepId {
    pub const FIRST: StepId = StepId(1);

    pub fn new(id: u8) -> Self {
        Self(id)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which slice of the draft a step owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Account,
    Organization,
    Locations,
    Teams,
    Staff,
    Completion,
}

impl StepKind {
    /// Key of the draft slice this step owns.
    pub fn slice_name(self) -> &'static str {
        match self {
            StepKind::Account => "account",
            StepKind::Organization => "organization",
            StepKind::Locations => "locations",
            StepKind::Teams => "teams",
            StepKind::Staff => "staff",
            StepKind::Completion => "completion",
        }
    }
}

/// One entry of the fixed wizard sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub kind: StepKind,
    pub title: String,
    pub required: bool,
}

/// Ordered, fixed list of steps with ids `1..=N`.
///
/// The constructor enforces contiguous ids, so `current` can always be clamped
/// to `[1, len]` without looking anything up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequence {
    steps: Vec<Step>,
}

impl StepSequence {
    /// Build a sequence from `(kind, title, required)` tuples, numbering from 1.
    ///
    /// Returns `None` for an empty list.
    pub fn from_specs<I, S>(specs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (StepKind, S, bool)>,
        S: Into<String>,
    {
        let steps: Vec<Step> = specs
            .into_iter()
            .enumerate()
            .map(|(index, (kind, title, required))| Step {
                id: StepId(index as u8 + 1),
                kind,
                title: title.into(),
                required,
            })
            .collect();

        if steps.is_empty() {
            None
        } else {
            Some(Self { steps })
        }
    }

    /// The studio onboarding wizard: only the account step is required.
    pub fn studio_default() -> Self {
        Self {
            steps: vec![
                step(1, StepKind::Account, "Account Setup", true),
                step(2, StepKind::Organization, "Organization Info", false),
                step(3, StepKind::Locations, "Locations", false),
                step(4, StepKind::Teams, "Teams", false),
                step(5, StepKind::Staff, "Admins & Coaches", false),
                step(6, StepKind::Completion, "Complete", false),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_id(&self) -> StepId {
        StepId(self.steps.len() as u8)
    }

    pub fn get(&self, id: StepId) -> Option<&Step> {
        (id.0 as usize)
            .checked_sub(1)
            .and_then(|index| self.steps.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// `min(id + 1, N)`
    pub fn next_of(&self, id: StepId) -> StepId {
        StepId(id.0.saturating_add(1).min(self.last_id().0))
    }

    /// `max(id - 1, 1)`
    pub fn previous_of(&self, id: StepId) -> StepId {
        StepId(id.0.saturating_sub(1).max(1))
    }

    /// Required-ness of a step; out-of-range ids count as not required.
    pub fn is_required(&self, id: StepId) -> bool {
        self.get(id).map(|s| s.required).unwrap_or(false)
    }
}

fn step(id: u8, kind: StepKind, title: &str, required: bool) -> Step {
    Step {
        id: StepId(id),
        kind,
        title: title.to_string(),
        required,
    }
}
