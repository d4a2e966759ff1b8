//! Registry of served animals.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use floppa_core::ImageSource;
use floppa_file::DirectorySource;
use floppa_pocketbase::{ClientConfig, PocketBaseSource, StoreClient};

use crate::config::{ConfigError, GatewayConfig, SourceConfig};

/// Public description of an animal, as listed to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimalInfo {
    pub endpoint: String,
    pub title: String,
    pub description: String,
}

/// The image source behind an animal.
#[derive(Debug, Clone)]
pub enum AnimalSource {
    Local(DirectorySource),
    PocketBase(PocketBaseSource),
}

impl AnimalSource {
    /// Returns the source as a generic [`ImageSource`].
    pub fn as_image_source(&self) -> &dyn ImageSource {
        match self {
            AnimalSource::Local(source) => source,
            AnimalSource::PocketBase(source) => source,
        }
    }

    /// Returns the PocketBase source, if this animal has one.
    pub fn as_pocketbase(&self) -> Option<&PocketBaseSource> {
        match self {
            AnimalSource::PocketBase(source) => Some(source),
            AnimalSource::Local(_) => None,
        }
    }
}

/// One served animal.
#[derive(Debug, Clone)]
pub struct Animal {
    pub info: AnimalInfo,
    pub source: AnimalSource,
    pub external_id_lookup: bool,
}

/// All served animals, indexed by endpoint. Immutable after startup.
#[derive(Debug, Default)]
pub struct AnimalRegistry {
    animals: Vec<Animal>,
    by_endpoint: HashMap<String, usize>,
}

impl AnimalRegistry {
    /// Build a registry from animals in listing order.
    ///
    /// Later duplicates of an endpoint are ignored.
    pub fn new(animals: Vec<Animal>) -> Self {
        let mut registry = Self::default();
        for animal in animals {
            if registry.by_endpoint.contains_key(&animal.info.endpoint) {
                continue;
            }
            registry
                .by_endpoint
                .insert(animal.info.endpoint.clone(), registry.animals.len());
            registry.animals.push(animal);
        }
        registry
    }

    /// Build the registry described by `config`.
    ///
    /// All PocketBase animals share one [`StoreClient`] and its connection pool.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = match &config.pocketbase_url {
            Some(url) => Some(StoreClient::with_config(
                url.clone(),
                ClientConfig {
                    request_timeout: config.request_timeout(),
                    view_update_timeout: config.view_update_timeout(),
                },
            )?),
            None => None,
        };

        let mut animals = Vec::with_capacity(config.animals.len());
        for animal in &config.animals {
            let source = match (&animal.source, &client) {
                (SourceConfig::Local { directory }, _) => {
                    AnimalSource::Local(DirectorySource::new(&animal.endpoint, directory))
                }
                (SourceConfig::PocketBase { collection }, Some(client)) => {
                    AnimalSource::PocketBase(PocketBaseSource::new(
                        &animal.endpoint,
                        collection.clone(),
                        client.clone(),
                    ))
                }
                // validate() rejects PocketBase animals without a URL.
                (SourceConfig::PocketBase { .. }, None) => {
                    return Err(ConfigError::Validation(vec![format!(
                        "endpoint '{}' uses PocketBase but pocketbase_url is not set",
                        animal.endpoint
                    )]));
                }
            };

            debug!(endpoint = %animal.endpoint, "Registered animal");
            animals.push(Animal {
                info: AnimalInfo {
                    endpoint: animal.endpoint.clone(),
                    title: animal.title.clone(),
                    description: animal.description.clone(),
                },
                source,
                external_id_lookup: animal.external_id_lookup,
            });
        }

        Ok(Self::new(animals))
    }

    /// Look up an animal by endpoint.
    pub fn get(&self, endpoint: &str) -> Option<&Animal> {
        self.by_endpoint.get(endpoint).map(|&i| &self.animals[i])
    }

    /// Iterate over animals in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Animal> {
        self.animals.iter()
    }

    /// Public descriptions of all animals, in listing order.
    pub fn infos(&self) -> Vec<AnimalInfo> {
        self.animals.iter().map(|a| a.info.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }
}
