pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::LambdaConfig;

pub use config::toml_config::SkillFileConfig;
pub use core::{
    conversation::ConversationController,
    handler::{HttpSkillHandler, SkillHandler},
    query::NearestStationsQuery,
    resolver::AddressResolver,
    response::ResponseBuilder,
};
pub use domain::envelope::{SkillRequest, SkillResponse};
pub use utils::error::{Result, SkillError};
