mod consent_banner;
mod loading_overlay;
mod roi_calculator;
mod toast_host;

pub use consent_banner::{ConsentBanner, dismiss_banner, reopen_cookie_settings, reveal_banner};
pub use loading_overlay::LoadingOverlay;
pub use roi_calculator::{RoiAnimator, RoiCalculator, RoiFigures, use_roi_animator};
pub use toast_host::ToastHost;
