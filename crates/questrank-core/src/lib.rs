pub mod app_config;
pub mod config;
pub mod eligibility;
pub mod filters;
pub mod participant;
pub mod ranking;
pub mod report;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use eligibility::EligibilityWindow;
pub use filters::{load_filters, FilterError, FiltersFile, LocationBucket};
pub use participant::{Participant, ParticipantError, Quest};
pub use ranking::rank;
pub use report::{mask_email, BucketRanking, HeaderStats, RankingSet, Report};
