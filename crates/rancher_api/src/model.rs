use rancher_core::prelude::*;
use serde::Deserialize;

use crate::config::ApiConfig;

/// `{ data: [...] }` envelope around every collection.
#[derive(Clone, Debug, Deserialize)]
pub struct Collection {
    pub data: Vec<Entry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub attributes: Attributes,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryId::Number(id) => write!(f, "{id}"),
            EntryId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attributes {
    pub name: String,
    #[serde(default)]
    pub icon: Option<Relation>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Relation {
    #[serde(default)]
    pub data: Option<Media>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Media {
    pub attributes: MediaAttributes,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MediaAttributes {
    pub url: String,
}

impl Entry {
    pub fn icon_path(&self) -> Option<&str> {
        self.attributes
            .icon
            .as_ref()
            .and_then(|icon| icon.data.as_ref())
            .map(|media| media.attributes.url.as_str())
    }

    pub fn into_item(self, category: Category, config: &ApiConfig) -> CatalogItem {
        let icon_url = self.icon_path().map(|path| config.asset_url(path));
        CatalogItem {
            category,
            id: ItemId(self.id.to_string()),
            name: self.attributes.name,
            icon_url,
        }
    }
}
