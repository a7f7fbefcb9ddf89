//! Spoken texts and response envelopes.

use crate::domain::envelope::{
    Card, OutputSpeech, SkillResponse, Speechlet, ADDRESS_PERMISSION, RESPONSE_VERSION,
};
use crate::domain::model::{ConversationState, RankedStation, RankedStations};

pub const CARD_TITLE: &str = "City bikes";
const HELP_CARD_TITLE: &str = "City bikes skill";

const GOODBYE: &str = "Okay, goodbye and happy cycling!";
const CLOSING: &str = "Goodbye and happy cycling!";
const FALLBACK: &str = "Sorry, I don't know that.";
const NOT_UNDERSTOOD_YES: &str = "Sorry, something went wrong.";
const ERROR_OCCURRED: &str = "Sorry, an error occurred while looking for nearby bikes. Please try again later.";
const NO_BIKES_NEARBY: &str =
    "Sorry, there are no bikes available at stations near you right now.";
const MORE_STATIONS_PROMPT: &str = "Do you want to hear more nearby stations?";
const PERMISSION_PROMPT: &str = "Please check permissions and allow city bikes skill access to \
    address. I sent a card for you to update skill settings.";
const HELP_TEXT: &str = "With this skill you can find closest city bike stations for you. \
    Use phrases open city bikes or ask city bikes is there bikes nearby.";
const HELP_QUESTION: &str = "Do you want to find closest station for you?";

/// Follow-up turns never read out more than this many stations.
pub const MAX_FOLLOW_UP_STATIONS: usize = 2;

pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Plain speech with a matching simple card. Attributes are built fresh
    /// from `state` on every call.
    pub fn speech(
        title: &str,
        text: &str,
        should_end_session: bool,
        state: Option<&ConversationState>,
    ) -> SkillResponse {
        SkillResponse {
            version: RESPONSE_VERSION.to_string(),
            response: Speechlet {
                output_speech: Some(OutputSpeech::PlainText {
                    text: text.to_string(),
                }),
                card: Some(Card::Simple {
                    title: title.to_string(),
                    content: text.to_string(),
                }),
                should_end_session,
            },
            session_attributes: state
                .map(ConversationState::to_attributes)
                .unwrap_or_default(),
        }
    }

    /// First answer: the nearest station, and an offer to hear the next ones
    /// when there are any.
    pub fn nearest_stations(stations: &RankedStations) -> SkillResponse {
        let Some(nearest) = stations.first() else {
            return Self::speech(CARD_TITLE, NO_BIKES_NEARBY, true, None);
        };

        let answer = format!("{}.", describe(nearest));
        match follow_up_text(&stations.as_slice()[1..]) {
            Some(next_stations) => {
                let text = format!("{} {}", answer, MORE_STATIONS_PROMPT);
                let state = ConversationState::awaiting_more(next_stations);
                Self::speech(CARD_TITLE, &text, false, Some(&state))
            }
            None => {
                let text = format!("{} {}", answer, CLOSING);
                Self::speech(CARD_TITLE, &text, true, None)
            }
        }
    }

    /// Replays follow-up text cached by the previous turn.
    pub fn replay(cached: &str) -> SkillResponse {
        Self::speech(CARD_TITLE, cached, true, None)
    }

    pub fn help() -> SkillResponse {
        let mut response = Self::speech(
            HELP_CARD_TITLE,
            &format!("{} {}", HELP_TEXT, HELP_QUESTION),
            false,
            Some(&ConversationState::help_offered()),
        );
        // 卡片不帶問句
        response.response.card = Some(Card::Simple {
            title: HELP_CARD_TITLE.to_string(),
            content: HELP_TEXT.to_string(),
        });
        response
    }

    pub fn goodbye() -> SkillResponse {
        Self::speech(CARD_TITLE, GOODBYE, true, None)
    }

    pub fn fallback() -> SkillResponse {
        Self::speech(CARD_TITLE, FALLBACK, true, None)
    }

    pub fn nothing_to_confirm() -> SkillResponse {
        Self::speech(CARD_TITLE, NOT_UNDERSTOOD_YES, true, None)
    }

    pub fn error_occurred() -> SkillResponse {
        Self::speech(CARD_TITLE, ERROR_OCCURRED, true, None)
    }

    /// Consent card for the address permission. The session stays open so
    /// the platform can run its consent flow.
    pub fn ask_permissions() -> SkillResponse {
        SkillResponse {
            version: RESPONSE_VERSION.to_string(),
            response: Speechlet {
                output_speech: Some(OutputSpeech::PlainText {
                    text: PERMISSION_PROMPT.to_string(),
                }),
                card: Some(Card::AskForPermissionsConsent {
                    permissions: vec![ADDRESS_PERMISSION.to_string()],
                }),
                should_end_session: false,
            },
            session_attributes: serde_json::Map::new(),
        }
    }

    /// Acknowledges a session the platform already closed.
    pub fn session_ended() -> SkillResponse {
        SkillResponse {
            version: RESPONSE_VERSION.to_string(),
            response: Speechlet {
                output_speech: None,
                card: None,
                should_end_session: true,
            },
            session_attributes: serde_json::Map::new(),
        }
    }
}

/// "5 bikes available", "1 bike available".
pub fn bikes_available(count: u32) -> String {
    if count == 1 {
        "1 bike available".to_string()
    } else {
        format!("{} bikes available", count)
    }
}

fn describe(ranked: &RankedStation) -> String {
    format!(
        "Station {} has {}",
        ranked.station.name,
        bikes_available(ranked.station.bikes_available)
    )
}

/// Text for the "tell me more" turn, built once while answering the first
/// question. `None` when there is nothing more to tell.
pub fn follow_up_text(next: &[RankedStation]) -> Option<String> {
    let described: Vec<String> = next
        .iter()
        .take(MAX_FOLLOW_UP_STATIONS)
        .map(describe)
        .collect();

    match described.as_slice() {
        [] => None,
        [only] => Some(format!("{}. {}", only, CLOSING)),
        [first, second, ..] => Some(format!(
            "{} and {}. {}",
            first,
            lowercase_station(second),
            CLOSING
        )),
    }
}

fn lowercase_station(description: &str) -> String {
    match description.strip_prefix("Station ") {
        Some(rest) => format!("station {}", rest),
        None => description.to_string(),
    }
}
