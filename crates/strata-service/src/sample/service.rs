//! Sample service: proxy, database, cache, publish and SOAP demos.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use strata_cache::CacheManager;
use strata_cache::keys::DUMMY_CACHE_KEY;
use strata_core::bridge::{dispatch, fan_out};
use strata_core::result::AppResult;
use strata_core::validation::validate;
use strata_database::repositories::SampleStore;
use strata_entity::message::DUMMY_ATTRIBUTE;
use strata_messaging::SamplePublisher;
use strata_proxy::{SampleProxy, SampleProxyRequest, SampleXmlProxy, SampleXmlRequest};

use super::model::{
    GetSampleModel, GetSampleResponse, PostSampleXmlModel, PostSampleXmlResponse, PublishModel,
    PublishResponse, UpdateSampleModel, UpdateSampleResponse,
};

/// Attribute value every published sample message carries.
pub const OVERRIDDEN_ATTRIBUTE_VALUE: &str = "overriding dummy attribute value here";

const CACHED_SAMPLE_TTL: Duration = Duration::from_secs(30);

/// Orchestrates the sample collaborators.
#[derive(Clone)]
pub struct SampleService {
    proxy: Arc<dyn SampleProxy>,
    xml_proxy: Arc<dyn SampleXmlProxy>,
    store: Arc<dyn SampleStore>,
    publisher: Arc<dyn SamplePublisher>,
    cache: CacheManager,
}

impl SampleService {
    /// Creates a new sample service.
    pub fn new(
        proxy: Arc<dyn SampleProxy>,
        xml_proxy: Arc<dyn SampleXmlProxy>,
        store: Arc<dyn SampleStore>,
        publisher: Arc<dyn SamplePublisher>,
        cache: CacheManager,
    ) -> Self {
        Self {
            proxy,
            xml_proxy,
            store,
            publisher,
            cache,
        }
    }

    /// Fetches a sample through the outbound HTTP proxy.
    pub async fn get_proxy(&self, model: GetSampleModel) -> AppResult<GetSampleResponse> {
        validate(&model)?;

        let proxy = self.proxy.clone();
        let request = SampleProxyRequest {
            id: model.id,
            sample_name: model.sample_name,
        };
        let response = dispatch(async move { proxy.get_sample(&request).await }).await?;

        Ok(GetSampleResponse {
            id: response.id,
            sample_name: response.sample_name,
        })
    }

    /// Fetches the sample record from the database.
    pub async fn get_database(&self, model: GetSampleModel) -> AppResult<GetSampleResponse> {
        validate(&model)?;

        let store = self.store.clone();
        let record = dispatch(async move { store.get_sample().await }).await?;

        Ok(GetSampleResponse {
            id: record.id,
            sample_name: record.sample_name,
        })
    }

    /// Returns the cached sample, seeding the cache on a miss.
    pub async fn get_cache(&self, model: GetSampleModel) -> AppResult<GetSampleResponse> {
        validate(&model)?;

        let cache = self.cache.clone();
        dispatch(async move {
            if let Some(cached) = cache.get_json::<GetSampleResponse>(DUMMY_CACHE_KEY).await? {
                debug!(key = DUMMY_CACHE_KEY, "Cache hit");
                return Ok(cached);
            }

            let fresh = GetSampleResponse {
                id: 1,
                sample_name: "Cached new response here!".to_string(),
            };
            cache
                .set_json(DUMMY_CACHE_KEY, &fresh, CACHED_SAMPLE_TTL)
                .await?;
            Ok(fresh)
        })
        .await
    }

    /// Publishes `count` copies of the message concurrently.
    ///
    /// The first failed publish fails the call and cancels the rest.
    pub async fn publish_message(&self, model: PublishModel) -> AppResult<PublishResponse> {
        validate(&model)?;

        let overrides = Arc::new(HashMap::from([(
            DUMMY_ATTRIBUTE.to_string(),
            OVERRIDDEN_ATTRIBUTE_VALUE.to_string(),
        )]));
        let message = Arc::new(model.message);

        let message_ids = fan_out(model.count, |_| {
            let publisher = self.publisher.clone();
            let message = message.clone();
            let overrides = overrides.clone();
            async move { publisher.publish(&message, &overrides).await }
        })
        .await?;

        info!(count = message_ids.len(), "Published sample messages");
        Ok(PublishResponse {
            is_successful: true,
            message_ids,
        })
    }

    /// Applies a sample status update.
    pub async fn update_sample(
        &self,
        model: UpdateSampleModel,
    ) -> AppResult<UpdateSampleResponse> {
        validate(&model)?;

        debug!(
            sample_id = model.sample_id,
            sample_status = model.sample_status,
            modified_by = %model.modified_by,
            "Sample updated"
        );
        Ok(UpdateSampleResponse {
            is_successful: true,
        })
    }

    /// Posts the sample to the SOAP service.
    pub async fn post_sample_xml(
        &self,
        model: PostSampleXmlModel,
    ) -> AppResult<PostSampleXmlResponse> {
        validate(&model)?;

        let xml_proxy = self.xml_proxy.clone();
        let request = SampleXmlRequest {
            sample_name: model.sample_name,
            sample_type: model.sample_type,
            sample_code: model.sample_code,
        };
        let response =
            dispatch(async move { xml_proxy.post_sample_xml(&request).await }).await?;

        Ok(PostSampleXmlResponse {
            is_success: response.is_success,
            message: response.message,
        })
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use strata_cache::memory::MemoryCacheProvider;
    use strata_core::config::cache::MemoryCacheConfig;
    use strata_core::error::AppError;
    use strata_entity::message::SampleMessage;
    use strata_entity::sample::SampleRecord;
    use strata_proxy::{SampleProxyResponse, SampleXmlResponse};

    use super::*;

    pub struct EchoProxy;

    #[async_trait]
    impl SampleProxy for EchoProxy {
        async fn get_sample(
            &self,
            request: &SampleProxyRequest,
        ) -> AppResult<SampleProxyResponse> {
            Ok(SampleProxyResponse {
                id: request.id,
                sample_name: format!("{}<", request.sample_name),
            })
        }
    }

    pub struct FixedXmlProxy;

    #[async_trait]
    impl SampleXmlProxy for FixedXmlProxy {
        async fn post_sample_xml(
            &self,
            request: &SampleXmlRequest,
        ) -> AppResult<SampleXmlResponse> {
            Ok(SampleXmlResponse {
                is_success: true,
                message: format!("stored {}", request.sample_name),
            })
        }
    }

    pub struct FixedStore;

    #[async_trait]
    impl SampleStore for FixedStore {
        async fn get_sample(&self) -> AppResult<SampleRecord> {
            Ok(SampleRecord {
                id: 1,
                sample_name: "sample name here!!".into(),
            })
        }
    }

    /// Counts publishes; fails on the publish numbered `fail_at` when set.
    #[derive(Default)]
    pub struct CountingPublisher {
        pub calls: AtomicUsize,
        pub fail_at: Option<usize>,
        pub seen_overrides: Mutex<Vec<HashMap<String, String>>>,
    }

    #[async_trait]
    impl SamplePublisher for CountingPublisher {
        async fn publish(
            &self,
            _message: &SampleMessage,
            attribute_overrides: &HashMap<String, String>,
        ) -> AppResult<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_overrides
                .lock()
                .unwrap()
                .push(attribute_overrides.clone());
            if self.fail_at == Some(n) {
                return Err(AppError::external_service("broker rejected message"));
            }
            Ok(format!("msg-{n}"))
        }
    }

    pub fn cache() -> CacheManager {
        CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(&MemoryCacheConfig {
            max_capacity: 100,
        })))
    }

    pub fn service(publisher: Arc<CountingPublisher>, cache: CacheManager) -> SampleService {
        SampleService::new(
            Arc::new(EchoProxy),
            Arc::new(FixedXmlProxy),
            Arc::new(FixedStore),
            publisher,
            cache,
        )
    }
}
