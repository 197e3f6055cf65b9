//! Stage completion inference
//!
//! One implementation of the completion rules, shared by the requester and
//! staff views. A stage is complete when it has been passed (the submission's
//! current-stage ordinal is strictly greater) or when its data predicate
//! holds against the normalized quotations. The current stage follows the
//! persisted stage string; presentation layers may highlight a different tab
//! without changing anything here.

use procura_domain::{Quotation, Stage, StageStatus, StageView};

/// Inputs to stage derivation for one request.
#[derive(Debug, Clone, Copy)]
pub struct StageInputs<'a> {
    pub current: &'a Stage,
    pub quotations: &'a [Quotation],
    /// Vendors a quote-request email went out to. Client-tracked half of the
    /// Sourcing predicate; live backend data is preferred over the cache by
    /// the caller.
    pub vendors_sent_quotes: &'a [String],
}

impl StageInputs<'_> {
    fn any_selected(&self) -> bool {
        self.quotations.iter().any(Quotation::is_selected)
    }

    fn selected(&self) -> impl Iterator<Item = &Quotation> + '_ {
        self.quotations.iter().filter(|q| q.is_selected())
    }
}

fn data_predicate(stage: &Stage, inputs: &StageInputs<'_>) -> bool {
    match stage {
        Stage::Sourcing => !inputs.vendors_sent_quotes.is_empty() || inputs.any_selected(),
        Stage::Review => inputs.any_selected(),
        Stage::Negotiations => inputs.selected().any(Quotation::has_negotiation_data),
        Stage::LegalAndCompliance => inputs.selected().any(Quotation::has_accepted_agreement),
        Stage::Approval => inputs.selected().any(Quotation::is_vendor_approved),
        Stage::PurchaseOrder | Stage::PoCreation => inputs.selected().any(Quotation::is_po_sent),
        _ => false,
    }
}

/// Derive the per-stage render state for one audience view.
///
/// `Internal Rejected` short-circuits: nothing is complete or current, the
/// caller renders the rejection banner instead.
pub fn stage_statuses(view: StageView, inputs: &StageInputs<'_>) -> Vec<StageStatus> {
    if inputs.current.is_rejected() {
        return view
            .stages()
            .iter()
            .map(|stage| StageStatus { stage: stage.clone(), complete: false, current: false })
            .collect();
    }

    let current_ordinal = view.ordinal_of(inputs.current);
    view.stages()
        .iter()
        .enumerate()
        .map(|(ordinal, stage)| {
            let passed = current_ordinal.is_some_and(|current| current > ordinal);
            StageStatus {
                stage: stage.clone(),
                complete: passed || data_predicate(stage, inputs),
                current: current_ordinal == Some(ordinal),
            }
        })
        .collect()
}
