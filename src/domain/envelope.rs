//! Request and response envelopes of the voice assistant platform.
//!
//! The raw request is deserialized once and validated into an [`Invocation`],
//! which is what the rest of the crate works with.

use crate::domain::model::ConversationState;
use crate::utils::error::{Result, SkillError};
use serde::{Deserialize, Serialize};

pub const RESPONSE_VERSION: &str = "1.0";

/// Permission scope requested by the consent card.
pub const ADDRESS_PERMISSION: &str = "read::alexa:device:all:address";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkillRequest {
    #[serde(default)]
    pub version: Option<String>,
    pub session: Session,
    pub context: Context,
    pub request: RequestBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    pub application: Application,
    #[serde(default)]
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Context {
    #[serde(rename = "System")]
    pub system: SystemContext,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemContext {
    #[serde(default)]
    pub api_access_token: Option<String>,
    #[serde(default)]
    pub api_endpoint: Option<String>,
    #[serde(default)]
    pub device: Option<Device>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
}

/// The `request` object. Kept flat so the request id survives for request
/// types the skill does not handle.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub intent: Option<IntentBody>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntentBody {
    pub name: String,
}

/// Intents the skill understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Cancel,
    Stop,
    No,
    Yes,
    Help,
    IsBikesAvailable,
    Unrecognized(String),
}

impl Intent {
    pub fn from_name(name: &str) -> Self {
        match name {
            "AMAZON.CancelIntent" => Intent::Cancel,
            "AMAZON.StopIntent" => Intent::Stop,
            "AMAZON.NoIntent" => Intent::No,
            "AMAZON.YesIntent" => Intent::Yes,
            "AMAZON.HelpIntent" => Intent::Help,
            "isBikesAvailable" => Intent::IsBikesAvailable,
            other => Intent::Unrecognized(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationKind {
    Launch,
    Intent(Intent),
    SessionEnded,
}

/// Credentials for the device address API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceContext {
    pub access_token: String,
    pub api_endpoint: String,
    pub device_id: String,
}

/// A validated request.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub request_id: Option<String>,
    pub kind: InvocationKind,
    /// Missing when the platform sent no device context; only the address
    /// lookup needs it.
    pub device: Option<DeviceContext>,
    pub state: ConversationState,
}

impl SkillRequest {
    /// Checks the application id and turns the raw payload into an [`Invocation`].
    pub fn into_invocation(self, expected_application_id: &str) -> Result<Invocation> {
        if self.session.application.application_id != expected_application_id {
            return Err(SkillError::InvalidApplicationId {
                received: self.session.application.application_id,
            });
        }

        let RequestBody {
            request_type,
            request_id,
            intent,
            reason,
        } = self.request;

        let kind = match (request_type.as_str(), intent) {
            ("LaunchRequest", _) => InvocationKind::Launch,
            ("IntentRequest", Some(intent)) => {
                InvocationKind::Intent(Intent::from_name(&intent.name))
            }
            ("IntentRequest", None) => {
                return Err(SkillError::InvalidRequest {
                    message: "IntentRequest without an intent".to_string(),
                })
            }
            ("SessionEndedRequest", _) => {
                tracing::debug!("Session ended by platform: {:?}", reason);
                InvocationKind::SessionEnded
            }
            (other, _) => InvocationKind::Intent(Intent::Unrecognized(other.to_string())),
        };

        let system = self.context.system;
        let device = match (system.api_access_token, system.api_endpoint, system.device) {
            (Some(access_token), Some(api_endpoint), Some(device)) => Some(DeviceContext {
                access_token,
                api_endpoint,
                device_id: device.device_id,
            }),
            _ => None,
        };

        // 每次請求都重新建立狀態
        let state = self
            .session
            .attributes
            .as_ref()
            .map(ConversationState::from_attributes)
            .unwrap_or_default();

        Ok(Invocation {
            request_id,
            kind,
            device,
            state,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    pub version: String,
    pub response: Speechlet,
    pub session_attributes: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speechlet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
}

impl OutputSpeech {
    pub fn text(&self) -> &str {
        match self {
            OutputSpeech::PlainText { text } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    Simple { title: String, content: String },
    AskForPermissionsConsent { permissions: Vec<String> },
}

impl SkillResponse {
    pub fn speech_text(&self) -> Option<&str> {
        self.response.output_speech.as_ref().map(OutputSpeech::text)
    }

    pub fn should_end_session(&self) -> bool {
        self.response.should_end_session
    }

    pub fn state(&self) -> ConversationState {
        ConversationState::from_attributes(&self.session_attributes)
    }
}
