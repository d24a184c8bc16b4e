use std::fmt;
use std::sync::Arc;

use crate::error::ItineraryError;
use crate::models::request::{ItineraryRequest, RequestLimits};
use crate::models::stored::StoredItinerary;
use crate::services::gemini_service::TextModel;
use crate::services::image_service::ImageLookup;
use crate::services::itinerary_store::ItineraryStore;
use crate::services::prompt_builder::build_prompt;
use crate::services::response_parser::parse_itinerary;
use crate::services::retry_policy::RetryPolicy;

/// Stages a generation request moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Validating,
    Prompting,
    AwaitingModel,
    Parsing,
    EnrichingImages,
    Persisting,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Validating => "validating",
            PipelineStage::Prompting => "prompting",
            PipelineStage::AwaitingModel => "awaiting model",
            PipelineStage::Parsing => "parsing",
            PipelineStage::EnrichingImages => "enriching images",
            PipelineStage::Persisting => "persisting",
            PipelineStage::Done => "done",
        };
        f.write_str(name)
    }
}

impl ItineraryError {
    /// The stage a failure of this kind comes from.
    pub fn stage(&self) -> PipelineStage {
        match self {
            ItineraryError::Validation(_) => PipelineStage::Validating,
            ItineraryError::TransientService(_) | ItineraryError::FatalModel(_) => {
                PipelineStage::AwaitingModel
            }
            ItineraryError::Parse { .. } => PipelineStage::Parsing,
            ItineraryError::Store(_) => PipelineStage::Persisting,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ItineraryGenerationConfig {
    pub retry: RetryPolicy,
    pub limits: RequestLimits,
}

/// Runs one request from validation to a stored record. Holds no per-request state,
/// so a single instance serves concurrent requests.
pub struct ItineraryGenerator {
    model: Arc<dyn TextModel>,
    images: Arc<dyn ImageLookup>,
    store: Arc<dyn ItineraryStore>,
    config: ItineraryGenerationConfig,
}

fn enter(stage: PipelineStage) {
    log::debug!("itinerary pipeline: {}", stage);
}

impl ItineraryGenerator {
    pub fn new(
        model: Arc<dyn TextModel>,
        images: Arc<dyn ImageLookup>,
        store: Arc<dyn ItineraryStore>,
    ) -> Self {
        Self::with_config(model, images, store, ItineraryGenerationConfig::default())
    }

    pub fn with_config(
        model: Arc<dyn TextModel>,
        images: Arc<dyn ImageLookup>,
        store: Arc<dyn ItineraryStore>,
        config: ItineraryGenerationConfig,
    ) -> Self {
        Self {
            model,
            images,
            store,
            config,
        }
    }

    pub async fn generate(
        &self,
        request: &ItineraryRequest,
    ) -> Result<StoredItinerary, ItineraryError> {
        let result = self.run(request).await;
        if let Err(e) = &result {
            log::error!("itinerary pipeline failed while {}: {}", e.stage(), e);
        }
        result
    }

    async fn run(&self, request: &ItineraryRequest) -> Result<StoredItinerary, ItineraryError> {
        enter(PipelineStage::Validating);
        let request = request
            .validate(&self.config.limits)
            .map_err(ItineraryError::Validation)?;

        enter(PipelineStage::Prompting);
        let prompt = build_prompt(&request);

        enter(PipelineStage::AwaitingModel);
        let text = self
            .config
            .retry
            .run(|| self.model.generate_text(&prompt))
            .await?;
        log::debug!("Gemini response text: {}", text);

        enter(PipelineStage::Parsing);
        let mut itinerary = parse_itinerary(&text)?;
        if itinerary.duration != request.number_of_days {
            log::warn!(
                "Model returned a {}-day itinerary for a {}-day request",
                itinerary.duration,
                request.number_of_days
            );
        }

        enter(PipelineStage::EnrichingImages);
        itinerary.images = self.images.lookup_images(&request.country).await;

        enter(PipelineStage::Persisting);
        let stored = self.store.save(&itinerary, &request.user_id).await?;

        enter(PipelineStage::Done);
        log::info!(
            "Generated itinerary {} for user {} ({})",
            stored.id,
            stored.user_id,
            stored.country
        );
        Ok(stored)
    }
}
