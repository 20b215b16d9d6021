mod admin;
mod assessment;
mod dosha;
mod follow_up;
mod ids;
mod question;
mod settings;
mod user;

pub use admin::AdminAccount;
pub use assessment::{score, AnswerSheet, AssessmentError, DoshaResult};
pub use dosha::{Dosha, ParseDoshaError};
pub use follow_up::{FollowUp, FollowUpDraft, FollowUpError, Rating};
pub use ids::{AdminId, FollowUpId, ParseIdError, QuestionId, UserId};
pub use question::{Choice, Question, QuestionBank};
pub use settings::{BackupFrequency, SettingsError, SystemSettings};
pub use user::{Gender, Registration, User, UserError, UserUpdate};
