use crate::adapters::{DigitransitStationProvider, HttpAddressProvider, NominatimGeocoder};
use crate::core::conversation::ConversationController;
use crate::core::query::NearestStationsQuery;
use crate::core::resolver::AddressResolver;
use crate::core::response::ResponseBuilder;
use crate::domain::envelope::{SkillRequest, SkillResponse};
use crate::domain::ports::{AddressProvider, ConfigProvider, Geocoder, StationProvider};
use crate::utils::error::Result;

/// Handler wired to the real HTTP providers.
pub type HttpSkillHandler =
    SkillHandler<HttpAddressProvider, NominatimGeocoder, DigitransitStationProvider>;

/// Entry point for one skill invocation.
pub struct SkillHandler<A: AddressProvider, G: Geocoder, S: StationProvider> {
    application_id: String,
    controller: ConversationController<A, G, S>,
}

impl<A: AddressProvider, G: Geocoder, S: StationProvider> SkillHandler<A, G, S> {
    pub fn new(application_id: impl Into<String>, controller: ConversationController<A, G, S>) -> Self {
        Self {
            application_id: application_id.into(),
            controller,
        }
    }

    /// Rejects requests for another application. Everything else gets a
    /// well-formed response, including unexpected failures.
    pub async fn handle(&self, request: SkillRequest) -> Result<SkillResponse> {
        let invocation = request.into_invocation(&self.application_id)?;
        tracing::info!(
            "📨 Handling request {} ({:?})",
            invocation.request_id.as_deref().unwrap_or("-"),
            invocation.kind
        );

        match self.controller.respond(&invocation).await {
            Ok(response) => Ok(response),
            Err(e) => {
                tracing::error!(
                    "❌ Unexpected failure (transient: {}): {}",
                    e.is_transient(),
                    e
                );
                Ok(ResponseBuilder::error_occurred())
            }
        }
    }

    /// Same as [`handle`](Self::handle), starting from raw JSON.
    pub async fn handle_json(&self, event: serde_json::Value) -> Result<SkillResponse> {
        tracing::debug!("Got event: {}", event);
        let request: SkillRequest = serde_json::from_value(event)?;
        self.handle(request).await
    }
}

impl HttpSkillHandler {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let address_provider = HttpAddressProvider::new(config)?;
        let geocoder = NominatimGeocoder::new(config)?;
        let station_provider = DigitransitStationProvider::new(config)?;

        let resolver = AddressResolver::new(address_provider, geocoder);
        let query = NearestStationsQuery::new(resolver, station_provider);
        Ok(Self::new(
            config.application_id(),
            ConversationController::new(query),
        ))
    }
}
