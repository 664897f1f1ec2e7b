use anyhow::Context as _;
use bevy::color::palettes;
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::texture::{CompressedImageFormats, ImageSampler, ImageType};
use bevy::utils::HashMap;

use rancher_api::prelude::IconBytes;
use rancher_core::prelude::*;

/// Decoded icons keyed by URL.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct IconImages(HashMap<String, Handle<Image>>);

impl IconImages {
    pub fn for_item(&self, item: &CatalogItem) -> Option<Handle<Image>> {
        item.icon_url
            .as_ref()
            .and_then(|url| self.get(url))
            .cloned()
    }
}

/// Stand-in for items without a usable icon.
pub fn placeholder_color(category: Category) -> Color {
    match category {
        Category::Slimes => palettes::tailwind::PINK_400.into(),
        Category::Food => palettes::tailwind::ORANGE_400.into(),
        Category::Buildings => palettes::tailwind::SKY_500.into(),
        Category::Gadgets => palettes::tailwind::VIOLET_500.into(),
    }
}

fn extension(url: &str) -> &str {
    url.split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.contains('/'))
        .unwrap_or("png")
}

fn decode(url: &str, bytes: &[u8]) -> anyhow::Result<Image> {
    Image::from_buffer(
        bytes,
        ImageType::Extension(extension(url)),
        CompressedImageFormats::NONE,
        true,
        ImageSampler::Default,
        RenderAssetUsages::default(),
    )
    .with_context(|| format!("could not decode {url}"))
}

pub(crate) fn load_icons(
    mut commands: Commands,
    icon_bytes: Option<Res<IconBytes>>,
    mut images: ResMut<Assets<Image>>,
) {
    let mut icons = IconImages::default();
    for (url, bytes) in icon_bytes.iter().flat_map(|bytes| bytes.iter()) {
        match decode(url, bytes) {
            Ok(image) => {
                icons.insert(url.clone(), images.add(image));
            }
            Err(err) => warn!("{err:#}"),
        }
    }
    info!("Loaded {} icons", icons.len());

    commands.insert_resource(icons);
    commands.remove_resource::<IconBytes>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions() {
        assert_eq!(extension("https://cms.example/uploads/pink.png"), "png");
        assert_eq!(extension("https://cms.example/uploads/hen.webp?v=2"), "webp");
        assert_eq!(extension("https://cms.example/uploads/noext"), "png");
        assert_eq!(extension("https://cms.example.com/uploads/noext"), "png");
    }

    #[test]
    fn undecodable_icon_is_dropped() {
        let mut app = App::new();
        app.init_resource::<Assets<Image>>();
        app.insert_resource(IconBytes(
            [("https://cms.example/broken.png".to_string(), vec![1, 2, 3])]
                .into_iter()
                .collect(),
        ));
        app.add_systems(Update, load_icons);
        app.update();

        assert!(app.world().resource::<IconImages>().is_empty());
        assert!(app.world().get_resource::<IconBytes>().is_none());
    }
}
