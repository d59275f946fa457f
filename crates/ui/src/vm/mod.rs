mod banner_vm;
mod roi_vm;

pub use banner_vm::{BANNER_REMOVE_DELAY, BANNER_REVEAL_DELAY, BannerPhase};
pub use roi_vm::{RoiCalculatorVm, RoiDisplay, RoiTween, format_whole};
