use std::sync::Arc;

use bevy::prelude::*;

use crate::catalog::CatalogItem;
use crate::events::{CatalogDragEnded, MarkerDragEnded};
use crate::projection::{GeoCoord, MapViewport, Projection};
use crate::state::AppState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u32);

#[derive(Clone, Debug)]
pub struct Marker {
    pub id: MarkerId,
    pub coord: GeoCoord,
    /// Window position of the drop that created this marker.
    pub pixel: Vec2,
    pub item: Arc<CatalogItem>,
}

/// Every placed marker in insertion order.
///
/// The list is never edited in place: each change builds a new snapshot and
/// swaps it in, so anything holding a previous [`Markers::snapshot`] keeps a
/// consistent view.
#[derive(Resource, Clone, Debug)]
pub struct Markers {
    snapshot: Arc<[Marker]>,
    next_id: u32,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            snapshot: Arc::from(Vec::new()),
            next_id: 1,
        }
    }
}

impl Markers {
    pub fn snapshot(&self) -> Arc<[Marker]> {
        self.snapshot.clone()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Marker> {
        self.snapshot.iter()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.snapshot.iter().find(|marker| marker.id == id)
    }

    pub fn contains(&self, id: MarkerId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Appends a marker for `item` at whatever `projection` puts under
    /// `cursor`. Ids are never reused.
    pub fn place(
        &mut self,
        item: Arc<CatalogItem>,
        cursor: Vec2,
        projection: &impl Projection,
    ) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;

        let marker = Marker {
            id,
            coord: projection.unproject(cursor),
            pixel: cursor,
            item,
        };

        let mut next = Vec::with_capacity(self.snapshot.len() + 1);
        next.extend(self.snapshot.iter().cloned());
        next.push(marker);
        self.snapshot = next.into();
        id
    }

    /// Moves marker `id` to `coord`, leaving every other field alone. Returns
    /// false and keeps the current snapshot if there is no such marker.
    pub fn reposition(&mut self, id: MarkerId, coord: GeoCoord) -> bool {
        if !self.contains(id) {
            return false;
        }

        self.snapshot = self
            .snapshot
            .iter()
            .map(|marker| {
                if marker.id == id {
                    Marker {
                        coord,
                        ..marker.clone()
                    }
                } else {
                    marker.clone()
                }
            })
            .collect();
        true
    }
}

fn place_system(
    mut events: EventReader<CatalogDragEnded>,
    viewport: Option<Res<MapViewport>>,
    mut markers: ResMut<Markers>,
) {
    for event in events.read() {
        let Some(viewport) = viewport.as_deref() else {
            warn!("Map not ready, ignoring drop of {}", event.item.name);
            continue;
        };

        if !viewport.contains(event.cursor) {
            debug!("{} dropped outside of the map", event.item.name);
            continue;
        }

        let id = markers.place(event.item.clone(), event.cursor, viewport);
        info!("Placed {} as marker {}", event.item.name, id.0);
    }
}

fn reposition_system(mut events: EventReader<MarkerDragEnded>, mut markers: ResMut<Markers>) {
    for event in events.read() {
        // Checked through a plain borrow so a miss doesn't flag the resource as changed.
        if !markers.contains(event.id) {
            warn!("Marker {} no longer exists.", event.id.0);
            continue;
        }
        markers.reposition(event.id, event.coord);
        debug!("Moved marker {} to {:?}", event.id.0, event.coord);
    }
}

pub(crate) struct Plugin;
impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Markers>();

        app.add_systems(
            Update,
            (
                place_system.run_if(on_event::<CatalogDragEnded>()),
                reposition_system.run_if(on_event::<MarkerDragEnded>()),
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, ItemId};

    /// Maps every pixel to the same coordinate.
    struct FixedProjection(GeoCoord);

    impl Projection for FixedProjection {
        fn unproject(&self, _pixel: Vec2) -> GeoCoord {
            self.0
        }

        fn project(&self, _coord: GeoCoord) -> Vec2 {
            Vec2::ZERO
        }
    }

    /// One degree per pixel.
    struct LinearProjection;

    impl Projection for LinearProjection {
        fn unproject(&self, pixel: Vec2) -> GeoCoord {
            GeoCoord::new(-pixel.y as f64, pixel.x as f64)
        }

        fn project(&self, coord: GeoCoord) -> Vec2 {
            Vec2::new(coord.lng as f32, -coord.lat as f32)
        }
    }

    fn item(id: &str) -> Arc<CatalogItem> {
        Arc::new(CatalogItem {
            category: Category::Slimes,
            id: ItemId(id.to_string()),
            name: format!("{id} slime"),
            icon_url: None,
        })
    }

    #[test]
    fn place_uses_projection_at_cursor() {
        let mut markers = Markers::default();
        let projection = FixedProjection(GeoCoord::new(-10.5, 140.2));
        let slime = item("slime-1");

        let id = markers.place(slime.clone(), Vec2::new(100.0, 200.0), &projection);

        assert_eq!(id, MarkerId(1));
        let marker = markers.get(id).unwrap();
        assert_eq!(marker.coord, GeoCoord::new(-10.5, 140.2));
        assert_eq!(marker.pixel, Vec2::new(100.0, 200.0));
        assert_eq!(marker.item.id, ItemId("slime-1".into()));
        assert!(Arc::ptr_eq(&marker.item, &slime));
    }

    #[test]
    fn place_assigns_unique_sequential_ids() {
        let mut markers = Markers::default();
        for n in 0..25 {
            markers.place(
                item(&format!("slime-{n}")),
                Vec2::new(n as f32, 0.0),
                &LinearProjection,
            );
        }

        assert_eq!(markers.len(), 25);
        let ids: Vec<u32> = markers.iter().map(|marker| marker.id.0).collect();
        assert_eq!(ids, (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn place_keeps_old_snapshot_intact() {
        let mut markers = Markers::default();
        markers.place(item("a"), Vec2::ZERO, &LinearProjection);
        let before = markers.snapshot();
        markers.place(item("b"), Vec2::ONE, &LinearProjection);

        assert_eq!(before.len(), 1);
        assert_eq!(markers.len(), 2);
    }

    #[test]
    fn reposition_only_touches_target_coord() {
        let mut markers = Markers::default();
        for (n, name) in ["a", "b", "c"].into_iter().enumerate() {
            markers.place(item(name), Vec2::splat(n as f32 * 10.0), &LinearProjection);
        }
        let before = markers.snapshot();

        assert!(markers.reposition(MarkerId(2), GeoCoord::new(1.5, -2.5)));

        let after = markers.snapshot();
        assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(after.iter()) {
            assert_eq!(old.id, new.id);
            assert_eq!(old.pixel, new.pixel);
            assert!(Arc::ptr_eq(&old.item, &new.item));
            if old.id == MarkerId(2) {
                assert_eq!(new.coord, GeoCoord::new(1.5, -2.5));
            } else {
                assert_eq!(old.coord, new.coord);
            }
        }
    }

    #[test]
    fn reposition_unknown_id_is_noop() {
        let mut markers = Markers::default();
        markers.place(item("a"), Vec2::ONE, &LinearProjection);
        let before = markers.snapshot();

        assert!(!markers.reposition(MarkerId(7), GeoCoord::new(3.0, 3.0)));
        assert!(Arc::ptr_eq(&before, &markers.snapshot()));
    }

    #[test]
    fn ids_survive_reposition_then_place() {
        let mut markers = Markers::default();
        markers.place(item("a"), Vec2::ONE, &LinearProjection);
        markers.reposition(MarkerId(1), GeoCoord::new(5.0, 5.0));
        let id = markers.place(item("b"), Vec2::ONE, &LinearProjection);
        assert_eq!(id, MarkerId(2));
    }

    fn app() -> App {
        let mut app = App::new();
        app.add_event::<CatalogDragEnded>();
        app.add_event::<MarkerDragEnded>();
        app.init_resource::<Markers>();
        app.add_systems(Update, (place_system, reposition_system).chain());
        app
    }

    fn viewport() -> MapViewport {
        MapViewport {
            origin: Vec2::new(256.0, 0.0),
            size: Vec2::new(1024.0, 768.0),
            center: GeoCoord::default(),
            zoom: 2.0,
        }
    }

    #[test]
    fn drop_is_ignored_until_map_ready() {
        let mut app = app();
        app.world_mut().send_event(CatalogDragEnded {
            item: item("a"),
            cursor: Vec2::new(500.0, 300.0),
        });
        app.update();
        assert!(app.world().resource::<Markers>().is_empty());
    }

    #[test]
    fn drop_on_map_places_marker() {
        let mut app = app();
        app.insert_resource(viewport());
        app.world_mut().send_event(CatalogDragEnded {
            item: item("a"),
            cursor: Vec2::new(768.0, 384.0),
        });
        app.update();

        let markers = app.world().resource::<Markers>();
        assert_eq!(markers.len(), 1);
        let marker = markers.get(MarkerId(1)).unwrap();
        assert!(marker.coord.lat.abs() < 1e-6);
        assert!(marker.coord.lng.abs() < 1e-6);
    }

    #[test]
    fn drop_over_sidebar_is_ignored() {
        let mut app = app();
        app.insert_resource(viewport());
        app.world_mut().send_event(CatalogDragEnded {
            item: item("a"),
            cursor: Vec2::new(40.0, 300.0),
        });
        app.update();
        assert!(app.world().resource::<Markers>().is_empty());
    }

    #[test]
    fn marker_drag_moves_marker() {
        let mut app = app();
        app.insert_resource(viewport());
        app.world_mut().send_event(CatalogDragEnded {
            item: item("a"),
            cursor: Vec2::new(600.0, 300.0),
        });
        app.update();

        app.world_mut().send_event(MarkerDragEnded {
            id: MarkerId(1),
            coord: GeoCoord::new(12.0, 34.0),
        });
        app.update();

        let markers = app.world().resource::<Markers>();
        assert_eq!(markers.get(MarkerId(1)).unwrap().coord, GeoCoord::new(12.0, 34.0));
        assert_eq!(markers.get(MarkerId(1)).unwrap().pixel, Vec2::new(600.0, 300.0));
    }
}
