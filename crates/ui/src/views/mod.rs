mod practice;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use practice::PracticeView;
#[cfg(test)]
pub(crate) use practice::PracticeTestHandles;
pub use state::{ViewError, ViewState, view_state_from_resource};
