use std::sync::Arc;

use kita_core::model::{CONSENT_STORAGE_KEY, ConsentDecision, ConsentModeUpdate, PromptOutcome};
use storage::repository::LocalStorageRepository;
use tracing::{debug, info, warn};

use crate::hooks::AnalyticsHook;

/// Gates analytics behind the visitor's persisted cookie decision.
///
/// All persistence is best effort. Read failures count as "no decision yet"
/// and write failures are logged; nothing here returns an error or blocks the
/// banner from rendering.
#[derive(Clone)]
pub struct ConsentGate {
    repo: Arc<dyn LocalStorageRepository>,
    analytics: Option<Arc<dyn AnalyticsHook>>,
}

impl ConsentGate {
    #[must_use]
    pub fn new(
        repo: Arc<dyn LocalStorageRepository>,
        analytics: Option<Arc<dyn AnalyticsHook>>,
    ) -> Self {
        Self { repo, analytics }
    }

    /// The persisted decision, or `Unset` if none is stored or storage is unreadable.
    pub async fn decision(&self) -> ConsentDecision {
        match self.repo.get_item(CONSENT_STORAGE_KEY).await {
            Ok(value) => ConsentDecision::from_stored(value.as_deref()),
            Err(err) => {
                warn!(error = %err, "consent storage unreadable; treating as undecided");
                ConsentDecision::Unset
            }
        }
    }

    /// True iff a decision of either polarity is on record.
    pub async fn has_consent(&self) -> bool {
        self.decision().await.is_decided()
    }

    /// Persist the visitor's choice and activate analytics when accepted.
    ///
    /// A failed write is logged; the returned decision still reflects the
    /// choice so the current page can act on it.
    pub async fn record_decision(&self, accepted: bool) -> ConsentDecision {
        let decision = ConsentDecision::from_accepted(accepted);
        if let Some(value) = decision.as_stored() {
            if let Err(err) = self.repo.set_item(CONSENT_STORAGE_KEY, value).await {
                warn!(error = %err, ?decision, "failed to persist consent decision");
            }
        }
        info!(?decision, "consent decision recorded");

        if accepted {
            self.signal(ConsentModeUpdate::Grant);
        }
        decision
    }

    /// Decide what the page should do about consent on load.
    pub async fn prompt_if_needed(&self) -> PromptOutcome {
        match self.decision().await {
            ConsentDecision::Unset => PromptOutcome::ShowBanner,
            ConsentDecision::Accepted => {
                self.signal(ConsentModeUpdate::Grant);
                PromptOutcome::AnalyticsActivated
            }
            ConsentDecision::Rejected => PromptOutcome::Declined,
        }
    }

    /// Forget the stored decision, revoke analytics, and run the prompt flow again.
    pub async fn reset(&self) -> PromptOutcome {
        if let Err(err) = self.repo.remove_item(CONSENT_STORAGE_KEY).await {
            warn!(error = %err, "failed to clear consent decision");
        }
        info!("consent decision reset");
        self.signal(ConsentModeUpdate::Deny);
        self.prompt_if_needed().await
    }

    fn signal(&self, update: ConsentModeUpdate) {
        match &self.analytics {
            Some(hook) => hook.update_consent(update),
            None => debug!(?update, "no analytics hook installed"),
        }
    }
}
