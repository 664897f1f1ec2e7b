mod config;
mod fetch;
mod model;
mod transport;

use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, IoTaskPool, Task};
use rancher_core::prelude::*;
use thiserror::Error;

pub mod prelude {
    pub use crate::config::ApiConfig;
    pub use crate::fetch::{fetch_catalog, fetch_category, fetch_icons, IconBytes};
    pub use crate::transport::{HttpTransport, Transport};
    pub use crate::FetchError;
}

use config::ApiConfig;
use fetch::IconBytes;
use transport::{HttpTransport, Transport};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no content API configured, set {}", rancher_core::settings::API_URL_VAR)]
    MissingBaseUrl,
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode {} list: {source}", .category.label())]
    Decode {
        category: Category,
        #[source]
        source: serde_json::Error,
    },
}

/// Catalog fetch running on the IO pool.
#[derive(Resource)]
struct PendingFetch(Task<Result<(CatalogBundle, IconBytes), FetchError>>);

fn load(
    transport: &impl Transport,
    config: &ApiConfig,
) -> Result<(CatalogBundle, IconBytes), FetchError> {
    let bundle = fetch::fetch_catalog(transport, config)?;
    for (category, items) in bundle.sections() {
        info!("{}: {} items", category.label(), items.len());
    }

    let icons = fetch::fetch_icons(transport, &bundle);
    Ok((bundle, icons))
}

fn fail(exit: &mut EventWriter<AppExit>, err: FetchError) {
    error!("Could not fetch catalog: {err}");
    exit.send(AppExit::error());
}

fn start_fetch(
    mut commands: Commands,
    settings: Res<Settings>,
    mut exit: EventWriter<AppExit>,
) {
    let started = ApiConfig::from_settings(&settings)
        .and_then(|config| Ok((HttpTransport::new(&config)?, config)));

    match started {
        Ok((transport, config)) => {
            info!("Fetching catalog from {}", config.base_url);
            let task = IoTaskPool::get().spawn(async move { load(&transport, &config) });
            commands.insert_resource(PendingFetch(task));
        }
        Err(err) => fail(&mut exit, err),
    }
}

fn poll_fetch(
    mut commands: Commands,
    mut pending: ResMut<PendingFetch>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(result) = block_on(future::poll_once(&mut pending.0)) else {
        return;
    };
    commands.remove_resource::<PendingFetch>();

    match result {
        Ok((bundle, icons)) => {
            commands.insert_resource(bundle);
            commands.insert_resource(icons);
            next_state.set(AppState::Running);
        }
        Err(err) => fail(&mut exit, err),
    }
}

pub struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::FetchingCatalog), start_fetch);
        app.add_systems(
            Update,
            poll_fetch
                .run_if(resource_exists::<PendingFetch>)
                .run_if(in_state(AppState::FetchingCatalog)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn unconfigured_api_exits_before_running() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_state::<AppState>();
        app.insert_resource(Settings::default());
        app.add_plugins(Plugin);

        app.update();

        assert!(app.world().get_resource::<CatalogBundle>().is_none());
        assert!(app.world().get_resource::<IconBytes>().is_none());
        assert_eq!(
            app.world().resource::<State<AppState>>().get(),
            &AppState::FetchingCatalog
        );
        let exits = app.world().resource::<Events<AppExit>>();
        assert!(exits.get_reader().read(exits).any(|exit| exit.is_error()));
    }

    fn app_with_task(
        result: Result<(CatalogBundle, IconBytes), FetchError>,
    ) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_state::<AppState>();
        app.add_systems(Update, poll_fetch.run_if(resource_exists::<PendingFetch>));

        let task = IoTaskPool::get().spawn(async move { result });
        app.insert_resource(PendingFetch(task));
        app
    }

    fn update_until(app: &mut App, done: impl Fn(&World) -> bool) {
        for _ in 0..500 {
            app.update();
            if done(app.world()) {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        panic!("fetch never finished");
    }

    #[test]
    fn finished_fetch_enters_running() {
        let bundle = CatalogBundle::new(
            vec![CatalogItem {
                category: Category::Slimes,
                id: ItemId("pink".into()),
                name: "Pink Slime".into(),
                icon_url: None,
            }],
            vec![],
            vec![],
            vec![],
        );
        let mut app = app_with_task(Ok((bundle, IconBytes::default())));

        update_until(&mut app, |world| {
            world.resource::<State<AppState>>().get() == &AppState::Running
        });

        assert_eq!(app.world().resource::<CatalogBundle>().len(), 1);
        assert!(app.world().get_resource::<IconBytes>().is_some());
        assert!(app.world().get_resource::<PendingFetch>().is_none());
    }

    #[test]
    fn failed_fetch_exits_with_error() {
        let mut app = app_with_task(Err(FetchError::Status {
            url: "https://cms.example/api/foods?populate=Icon".into(),
            status: 500,
        }));

        update_until(&mut app, |world| world.get_resource::<PendingFetch>().is_none());

        assert!(app.world().get_resource::<CatalogBundle>().is_none());
        assert_eq!(
            app.world().resource::<State<AppState>>().get(),
            &AppState::FetchingCatalog
        );
        let exits = app.world().resource::<Events<AppExit>>();
        assert!(exits.get_reader().read(exits).any(|exit| exit.is_error()));
    }
}
