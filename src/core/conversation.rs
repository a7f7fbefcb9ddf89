use crate::core::query::NearestStationsQuery;
use crate::core::response::ResponseBuilder;
use crate::domain::envelope::{DeviceContext, Intent, Invocation, InvocationKind, SkillResponse};
use crate::domain::model::{ConversationState, DomainOutcome, PreviousIntent};
use crate::domain::ports::{AddressProvider, Geocoder, StationProvider};
use crate::utils::error::{Result, SkillError};

/// Stations looked up for a fresh question: one to answer, two for later.
pub const STATIONS_PER_QUERY: usize = 3;

/// Where the conversation stands, as read from the session attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationPhase {
    Start,
    AwaitingMore,
    HelpOffered,
}

impl From<&ConversationState> for ConversationPhase {
    fn from(state: &ConversationState) -> Self {
        match state.previous_intent {
            None => ConversationPhase::Start,
            Some(PreviousIntent::MainQuery) => ConversationPhase::AwaitingMore,
            Some(PreviousIntent::Help) => ConversationPhase::HelpOffered,
        }
    }
}

pub struct ConversationController<A: AddressProvider, G: Geocoder, S: StationProvider> {
    query: NearestStationsQuery<A, G, S>,
}

impl<A: AddressProvider, G: Geocoder, S: StationProvider> ConversationController<A, G, S> {
    pub fn new(query: NearestStationsQuery<A, G, S>) -> Self {
        Self { query }
    }

    #[cfg(test)]
    pub(crate) fn query(&self) -> &NearestStationsQuery<A, G, S> {
        &self.query
    }

    /// Picks the response for one turn. Returns `Err` only for failures
    /// nobody anticipated; the caller turns those into an apology.
    pub async fn respond(&self, invocation: &Invocation) -> Result<SkillResponse> {
        let phase = ConversationPhase::from(&invocation.state);
        tracing::debug!("Conversation phase {:?}, request {:?}", phase, invocation.kind);

        let intent = match &invocation.kind {
            InvocationKind::Launch => return self.answer(invocation).await,
            InvocationKind::SessionEnded => return Ok(ResponseBuilder::session_ended()),
            InvocationKind::Intent(intent) => intent,
        };

        match intent {
            Intent::Cancel | Intent::Stop | Intent::No => Ok(ResponseBuilder::goodbye()),
            Intent::Help => Ok(ResponseBuilder::help()),
            Intent::IsBikesAvailable => self.answer(invocation).await,
            Intent::Yes => match phase {
                ConversationPhase::HelpOffered => self.answer(invocation).await,
                ConversationPhase::AwaitingMore => match &invocation.state.next_stations {
                    Some(cached) => Ok(ResponseBuilder::replay(cached)),
                    None => {
                        tracing::warn!("Asked for more stations but none were cached");
                        Ok(ResponseBuilder::error_occurred())
                    }
                },
                ConversationPhase::Start => Ok(ResponseBuilder::nothing_to_confirm()),
            },
            Intent::Unrecognized(name) => {
                tracing::info!("Unrecognized intent: {}", name);
                Ok(ResponseBuilder::fallback())
            }
        }
    }

    async fn answer(&self, invocation: &Invocation) -> Result<SkillResponse> {
        let device = device_of(invocation)?;

        match self.query.query(STATIONS_PER_QUERY, device).await? {
            DomainOutcome::Success(stations) => {
                tracing::info!("Found {} nearby stations with bikes", stations.len());
                Ok(ResponseBuilder::nearest_stations(&stations))
            }
            DomainOutcome::PermissionDenied => Ok(ResponseBuilder::ask_permissions()),
            DomainOutcome::TransientError => Ok(ResponseBuilder::error_occurred()),
        }
    }
}

fn device_of(invocation: &Invocation) -> Result<&DeviceContext> {
    invocation
        .device
        .as_ref()
        .ok_or_else(|| SkillError::InvalidRequest {
            message: "request has no device context".to_string(),
        })
}
