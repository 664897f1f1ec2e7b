use bevy::prelude::*;

/// Nothing is shown until the catalog is fetched. A failed fetch exits the
/// app from `FetchingCatalog`, so `Running` always has a complete catalog.
#[derive(States, Hash, PartialEq, Eq, Debug, Clone, Default)]
pub enum AppState {
    #[default]
    FetchingCatalog,
    Running,
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>();
    }
}
