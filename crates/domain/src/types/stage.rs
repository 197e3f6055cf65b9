//! Procurement stage vocabulary
//!
//! The spreadsheet persists a single `stage` string per request, but two
//! audiences read it through different ordered vocabularies: the requester
//! tracking view and the procurement staff view. Both are modelled here as
//! views over one `Stage` enum with an explicit mapping, replacing string
//! comparisons scattered through presentation code.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A procurement stage as persisted in the spreadsheet.
///
/// Labels the application never wrote (hand-edited rows, older deployments)
/// round-trip untouched through [`Stage::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stage {
    // Requester vocabulary
    Intake,
    InternalApproval,
    Sourcing,
    Negotiations,
    LegalAndCompliance,
    Approval,
    PurchaseOrder,
    TrackTheDelivery,
    Completion,
    PaymentDone,
    /// Out-of-band terminal state; belongs to no ordered view.
    InternalRejected,
    // Staff vocabulary
    IntentReport,
    Review,
    PoCreation,
    /// Legacy label still present in stored rows and the dashboard filter.
    Finalisation,
    /// Unrecognized label, preserved verbatim.
    Other(String),
}

impl Stage {
    /// Parse a persisted stage label. Unknown labels become [`Stage::Other`].
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Intake" => Self::Intake,
            "Internal Approval" => Self::InternalApproval,
            "Sourcing" => Self::Sourcing,
            "Negotiations" => Self::Negotiations,
            "Legal and Compliance" => Self::LegalAndCompliance,
            "Approval" => Self::Approval,
            "Purchase Order" => Self::PurchaseOrder,
            "Track the Delivery" => Self::TrackTheDelivery,
            "Completion" => Self::Completion,
            "Payment Done" => Self::PaymentDone,
            "Internal Rejected" => Self::InternalRejected,
            "Intent Report" => Self::IntentReport,
            "Review" => Self::Review,
            "PO Creation" => Self::PoCreation,
            "Finalisation" => Self::Finalisation,
            other => Self::Other(other.to_string()),
        }
    }

    /// The exact label persisted in the spreadsheet.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Intake => "Intake",
            Self::InternalApproval => "Internal Approval",
            Self::Sourcing => "Sourcing",
            Self::Negotiations => "Negotiations",
            Self::LegalAndCompliance => "Legal and Compliance",
            Self::Approval => "Approval",
            Self::PurchaseOrder => "Purchase Order",
            Self::TrackTheDelivery => "Track the Delivery",
            Self::Completion => "Completion",
            Self::PaymentDone => "Payment Done",
            Self::InternalRejected => "Internal Rejected",
            Self::IntentReport => "Intent Report",
            Self::Review => "Review",
            Self::PoCreation => "PO Creation",
            Self::Finalisation => "Finalisation",
            Self::Other(label) => label,
        }
    }

    /// Whether the request is in the procurement team's working set
    /// (the dashboard filter).
    pub fn in_procurement_pipeline(&self) -> bool {
        matches!(
            self,
            Self::InternalApproval
                | Self::Sourcing
                | Self::Negotiations
                | Self::Finalisation
                | Self::Approval
                | Self::PoCreation
        )
    }

    /// Terminal rejection renders the requester view with no progress.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::InternalRejected)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Intake
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Stage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(&label))
    }
}

/// Requester-facing ordered stage list.
static REQUESTER_STAGES: [Stage; 10] = [
    Stage::Intake,
    Stage::InternalApproval,
    Stage::Sourcing,
    Stage::Negotiations,
    Stage::LegalAndCompliance,
    Stage::Approval,
    Stage::PurchaseOrder,
    Stage::TrackTheDelivery,
    Stage::Completion,
    Stage::PaymentDone,
];

/// Staff-facing ordered stage list.
static STAFF_STAGES: [Stage; 7] = [
    Stage::IntentReport,
    Stage::Sourcing,
    Stage::Review,
    Stage::Negotiations,
    Stage::LegalAndCompliance,
    Stage::Approval,
    Stage::PoCreation,
];

/// An audience's ordered reading of the shared `stage` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageView {
    Requester,
    Staff,
}

impl StageView {
    /// The ordered stage list for this audience.
    pub fn stages(self) -> &'static [Stage] {
        match self {
            Self::Requester => &REQUESTER_STAGES,
            Self::Staff => &STAFF_STAGES,
        }
    }

    /// Ordinal of a persisted stage within this view.
    ///
    /// In the staff view `Internal Approval` reads as `Intent Report`
    /// (ordinal 0); that is the one point where the two vocabularies meet.
    pub fn ordinal_of(self, stage: &Stage) -> Option<usize> {
        if self == Self::Staff && *stage == Stage::InternalApproval {
            return Some(0);
        }
        self.stages().iter().position(|s| s == stage)
    }
}

impl Default for StageView {
    fn default() -> Self {
        Self::Requester
    }
}

/// Derived render state for one stage in an ordered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageStatus {
    pub stage: Stage,
    pub complete: bool,
    pub current: bool,
}
