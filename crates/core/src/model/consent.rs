/// Local-storage key under which the visitor's cookie decision lives.
pub const CONSENT_STORAGE_KEY: &str = "kita_cookie_consent";

//
// ─── CONSENT DECISION ─────────────────────────────────────────────────────────
//

/// The visitor's recorded choice about non-essential (analytics) cookies.
///
/// Only `Accepted` and `Rejected` are ever persisted. `Unset` is what an
/// absent (or unreadable) key means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsentDecision {
    #[default]
    Unset,
    Accepted,
    Rejected,
}

impl ConsentDecision {
    #[must_use]
    pub fn from_accepted(accepted: bool) -> Self {
        if accepted {
            Self::Accepted
        } else {
            Self::Rejected
        }
    }

    /// Maps a stored value back to a decision.
    ///
    /// Anything other than the two persisted forms is treated as undecided so a
    /// corrupted entry re-prompts instead of silently granting.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("accepted") => Self::Accepted,
            Some("rejected") => Self::Rejected,
            _ => Self::Unset,
        }
    }

    /// The value written to storage, or `None` for `Unset`.
    #[must_use]
    pub fn as_stored(self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Accepted => Some("accepted"),
            Self::Rejected => Some("rejected"),
        }
    }

    #[must_use]
    pub fn is_decided(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

//
// ─── CONSENT MODE ─────────────────────────────────────────────────────────────
//

/// Command sent to the analytics collaborator for its analytics-storage flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsentModeUpdate {
    Grant,
    Deny,
}

impl ConsentModeUpdate {
    /// Value of `analytics_storage` in a consent-mode update.
    #[must_use]
    pub fn analytics_storage(self) -> &'static str {
        match self {
            Self::Grant => "granted",
            Self::Deny => "denied",
        }
    }
}

/// What the consent prompt flow decided to do on page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// No decision on record; the banner must be rendered.
    ShowBanner,
    /// A prior acceptance was found and analytics were activated.
    AnalyticsActivated,
    /// A prior rejection was found; nothing else happens.
    Declined,
}

impl PromptOutcome {
    #[must_use]
    pub fn shows_banner(self) -> bool {
        matches!(self, Self::ShowBanner)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
