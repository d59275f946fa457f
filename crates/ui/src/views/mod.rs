mod demo;
mod home;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use demo::DemoView;
pub use home::HomeView;
