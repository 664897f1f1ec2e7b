use bevy::prelude::*;
use bevy::utils::{HashMap, HashSet};
use rancher_core::prelude::*;

use crate::config::ApiConfig;
use crate::model::Collection;
use crate::transport::Transport;
use crate::FetchError;

/// Raw icon files keyed by URL. Icons that failed to download are absent.
#[derive(Resource, Clone, Debug, Default, Deref, DerefMut)]
pub struct IconBytes(pub HashMap<String, Vec<u8>>);

pub fn fetch_category(
    transport: &impl Transport,
    config: &ApiConfig,
    category: Category,
) -> Result<Vec<CatalogItem>, FetchError> {
    let body = transport.get(&config.endpoint(category))?;
    let collection: Collection = serde_json::from_slice(&body)
        .map_err(|source| FetchError::Decode { category, source })?;

    Ok(collection
        .data
        .into_iter()
        .map(|entry| entry.into_item(category, config))
        .collect())
}

/// Fetches the four categories one after another. The first failure aborts
/// the whole fetch.
pub fn fetch_catalog(
    transport: &impl Transport,
    config: &ApiConfig,
) -> Result<CatalogBundle, FetchError> {
    let slimes = fetch_category(transport, config, Category::Slimes)?;
    let food = fetch_category(transport, config, Category::Food)?;
    let buildings = fetch_category(transport, config, Category::Buildings)?;
    let gadgets = fetch_category(transport, config, Category::Gadgets)?;

    Ok(CatalogBundle::new(slimes, food, buildings, gadgets))
}

/// Downloads every distinct icon in `bundle` once. Failures are logged and
/// skipped so the item falls back to a placeholder.
pub fn fetch_icons(transport: &impl Transport, bundle: &CatalogBundle) -> IconBytes {
    let mut icons = IconBytes::default();
    let mut attempted = HashSet::default();
    for url in bundle.iter().filter_map(|item| item.icon_url.as_deref()) {
        if !attempted.insert(url) {
            continue;
        }
        match transport.get_asset(url) {
            Ok(bytes) => {
                icons.insert(url.to_string(), bytes);
            }
            Err(err) => warn!("Icon unavailable: {err}"),
        }
    }
    icons
}
