mod admin;
mod assessment;
mod diet;
mod follow_up;
mod login;
mod profile;
mod results;
mod schedule;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::AdminView;
pub use assessment::AssessmentView;
pub use diet::DietView;
pub use follow_up::FollowUpView;
pub use login::LoginView;
pub use profile::ProfileView;
pub use results::ResultsView;
pub use schedule::ScheduleView;
pub use state::{view_state_from_resource, ViewError, ViewState};
