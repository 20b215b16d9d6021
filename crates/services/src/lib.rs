#![forbid(unsafe_code)]

pub mod account_service;
pub mod admin_service;
pub mod app_services;
pub mod assessment_flow;
pub mod assessment_service;
pub mod error;
pub mod export_service;
pub mod follow_up_service;
pub mod session;
pub mod settings_service;

pub use prakriti_core::Clock;

pub use account_service::AccountService;
pub use admin_service::{AdminService, AverageRatings, Statistics, UserGrowth, UserWithStatus};
pub use app_services::{AppServices, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_NAME};
pub use assessment_flow::AssessmentFlow;
pub use assessment_service::AssessmentService;
pub use error::{
    AccountError, AdminServiceError, AppServicesError, AssessmentServiceError, ExportError,
    FollowUpServiceError, SettingsServiceError,
};
pub use export_service::{ExportService, ExportSnapshot, ImportReport};
pub use follow_up_service::FollowUpService;
pub use session::Session;
pub use settings_service::SettingsService;
