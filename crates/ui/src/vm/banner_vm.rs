use std::time::Duration;

use kita_core::model::PromptOutcome;

/// Delay between inserting the banner and sliding it in.
pub const BANNER_REVEAL_DELAY: Duration = Duration::from_millis(100);
/// Delay between starting the slide-out and removing the banner.
pub const BANNER_REMOVE_DELAY: Duration = Duration::from_millis(300);

/// Lifecycle of the cookie banner on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BannerPhase {
    /// Not in the page.
    #[default]
    Hidden,
    /// Inserted, transition not started yet.
    Entering,
    Visible,
    /// Sliding out; removed once the remove delay elapses.
    Leaving,
}

impl BannerPhase {
    #[must_use]
    pub fn is_rendered(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Hidden => "cookie-banner",
            Self::Entering => "cookie-banner is-entering",
            Self::Visible => "cookie-banner is-visible",
            Self::Leaving => "cookie-banner is-leaving",
        }
    }

    /// Phase after the prompt flow ran.
    #[must_use]
    pub fn on_prompt(self, outcome: PromptOutcome) -> Self {
        match (self, outcome) {
            (Self::Hidden | Self::Leaving, PromptOutcome::ShowBanner) => Self::Entering,
            (current, _) => current,
        }
    }

    #[must_use]
    pub fn after_reveal_delay(self) -> Self {
        match self {
            Self::Entering => Self::Visible,
            other => other,
        }
    }

    /// True while the banner's actions are live; a second click during the
    /// slide-out is ignored.
    #[must_use]
    pub fn accepts_dismiss(self) -> bool {
        matches!(self, Self::Entering | Self::Visible)
    }

    /// Phase after the visitor picked an action.
    #[must_use]
    pub fn on_dismiss(self) -> Self {
        match self {
            Self::Entering | Self::Visible => Self::Leaving,
            other => other,
        }
    }

    #[must_use]
    pub fn after_remove_delay(self) -> Self {
        match self {
            Self::Leaving => Self::Hidden,
            other => other,
        }
    }
}
