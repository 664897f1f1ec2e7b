use std::sync::Arc;

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Slimes,
    Food,
    Buildings,
    Gadgets,
}

impl Category {
    /// Sidebar order.
    pub const ALL: [Category; 4] = [
        Category::Slimes,
        Category::Food,
        Category::Buildings,
        Category::Gadgets,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Slimes => "Slimes",
            Category::Food => "Food",
            Category::Buildings => "Buildings",
            Category::Gadgets => "Gadgets",
        }
    }

    /// Name of the content API collection holding this category.
    pub fn collection(self) -> &'static str {
        match self {
            Category::Slimes => "slimes",
            Category::Food => "foods",
            Category::Buildings => "buildings",
            Category::Gadgets => "gadgets",
        }
    }
}

/// Unique within a category only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemId(pub String);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogItem {
    pub category: Category,
    pub id: ItemId,
    pub name: String,
    /// `None` when the entry has no icon attached; rendered as a placeholder.
    pub icon_url: Option<String>,
}

/// Everything that can be dragged onto the map. Fetched once and never
/// modified afterwards.
#[derive(Resource, Clone, Debug, Default)]
pub struct CatalogBundle {
    slimes: Vec<Arc<CatalogItem>>,
    food: Vec<Arc<CatalogItem>>,
    buildings: Vec<Arc<CatalogItem>>,
    gadgets: Vec<Arc<CatalogItem>>,
}

impl CatalogBundle {
    pub fn new(
        slimes: Vec<CatalogItem>,
        food: Vec<CatalogItem>,
        buildings: Vec<CatalogItem>,
        gadgets: Vec<CatalogItem>,
    ) -> Self {
        let shared = |items: Vec<CatalogItem>| items.into_iter().map(Arc::new).collect();
        Self {
            slimes: shared(slimes),
            food: shared(food),
            buildings: shared(buildings),
            gadgets: shared(gadgets),
        }
    }

    pub fn get(&self, category: Category) -> &[Arc<CatalogItem>] {
        match category {
            Category::Slimes => &self.slimes,
            Category::Food => &self.food,
            Category::Buildings => &self.buildings,
            Category::Gadgets => &self.gadgets,
        }
    }

    /// Every category with its items, in sidebar order. Empty categories are
    /// included.
    pub fn sections(&self) -> impl Iterator<Item = (Category, &[Arc<CatalogItem>])> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CatalogItem>> {
        self.sections().flat_map(|(_, items)| items.iter())
    }

    pub fn len(&self) -> usize {
        self.sections().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: Category, id: &str) -> CatalogItem {
        CatalogItem {
            category,
            id: ItemId(id.to_string()),
            name: id.to_string(),
            icon_url: None,
        }
    }

    #[test]
    fn sections_follow_sidebar_order() {
        let bundle = CatalogBundle::new(
            vec![item(Category::Slimes, "pink")],
            vec![item(Category::Food, "carrot"), item(Category::Food, "hen")],
            vec![],
            vec![item(Category::Gadgets, "teleporter")],
        );

        let sections: Vec<_> = bundle
            .sections()
            .map(|(category, items)| (category, items.len()))
            .collect();
        assert_eq!(
            sections,
            vec![
                (Category::Slimes, 1),
                (Category::Food, 2),
                (Category::Buildings, 0),
                (Category::Gadgets, 1),
            ]
        );
        assert_eq!(bundle.len(), 4);
        assert_eq!(bundle.iter().next().unwrap().id, ItemId("pink".into()));
    }

    #[test]
    fn empty_bundle_still_has_four_sections() {
        let bundle = CatalogBundle::default();
        assert!(bundle.is_empty());
        assert_eq!(bundle.sections().count(), 4);
        assert!(bundle.sections().all(|(_, items)| items.is_empty()));
    }

    #[test]
    fn collections() {
        let collections: Vec<_> = Category::ALL.iter().map(|c| c.collection()).collect();
        assert_eq!(collections, ["slimes", "foods", "buildings", "gadgets"]);
    }
}
