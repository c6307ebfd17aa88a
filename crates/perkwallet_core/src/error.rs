use std::fmt;

use crate::model::{BenefitId, BenefitStatus, CardId, LedgerEntryId};

/// State-machine conflicts: the requested transition is not legal from the
/// benefit's current status. The benefit is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// `mark_used` on a benefit that is not available
    MarkUsedUnavailable {
        benefit_id: BenefitId,
        status: BenefitStatus,
    },
    /// `undo_mark_used` on a benefit that is not used
    UndoNotUsed {
        benefit_id: BenefitId,
        status: BenefitStatus,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::MarkUsedUnavailable { benefit_id, status } => write!(
                f,
                "benefit {benefit_id} cannot be marked used while {status:?}"
            ),
            StateError::UndoNotUsed { benefit_id, status } => write!(
                f,
                "benefit {benefit_id} has no redemption to undo (status {status:?})"
            ),
        }
    }
}

impl std::error::Error for StateError {}

/// Errors surfaced by the persistence contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    CardNotFound(CardId),
    BenefitNotFound(BenefitId),
    EntryNotFound(LedgerEntryId),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::CardNotFound(id) => write!(f, "card {id} not found"),
            StoreError::BenefitNotFound(id) => write!(f, "benefit {id} not found"),
            StoreError::EntryNotFound(id) => write!(f, "ledger entry {id} not found"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Everything the repository facade can fail with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    State(StateError),
    Store(StoreError),
    /// No catalog template with the requested id
    TemplateNotFound(String),
    /// A used benefit whose open ledger entry is missing; the store and the
    /// benefit's status disagree and the operation was not applied
    LedgerOutOfSync(BenefitId),
}

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoError::State(e) => write!(f, "{e}"),
            RepoError::Store(e) => write!(f, "{e}"),
            RepoError::TemplateNotFound(id) => write!(f, "catalog template '{id}' not found"),
            RepoError::LedgerOutOfSync(id) => {
                write!(f, "benefit {id} is marked used but has no open ledger entry")
            }
        }
    }
}

impl std::error::Error for RepoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepoError::State(e) => Some(e),
            RepoError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StateError> for RepoError {
    fn from(e: StateError) -> Self {
        RepoError::State(e)
    }
}

impl From<StoreError> for RepoError {
    fn from(e: StoreError) -> Self {
        RepoError::Store(e)
    }
}
