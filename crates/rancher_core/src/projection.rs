use std::f64::consts::PI;

use bevy::math::DVec2;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Width of one web-mercator tile in pixels at zoom 0.
pub const TILE_SIZE: f64 = 512.0;
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lng: f64,
}

impl GeoCoord {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Conversion between window pixels and map coordinates for the current view.
pub trait Projection {
    fn unproject(&self, pixel: Vec2) -> GeoCoord;
    fn project(&self, coord: GeoCoord) -> Vec2;
}

/// The visible part of the map. Only exists once the window has a size, so
/// anything converting coordinates should treat a missing resource as "map
/// not ready".
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct MapViewport {
    /// Top left of the map surface in window coordinates.
    pub origin: Vec2,
    pub size: Vec2,
    pub center: GeoCoord,
    pub zoom: f64,
}

impl MapViewport {
    pub fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    pub fn contains(&self, pixel: Vec2) -> bool {
        Rect::from_corners(self.origin, self.origin + self.size).contains(pixel)
    }

    /// Drags the map content by `delta` window pixels.
    pub fn pan(&mut self, delta: Vec2) {
        let center = self.center_pixel() - delta.as_dvec2();
        self.center = self.unproject(center.as_vec2());
    }

    /// Changes zoom while keeping the coordinate under `pixel` in place.
    pub fn zoom_at(&mut self, pixel: Vec2, zoom: f64) {
        let anchor = self.unproject(pixel);
        self.zoom = zoom;
        let offset = pixel.as_dvec2() - self.center_pixel();
        self.center = self.world_to_geo(self.geo_to_world(anchor) - offset);
    }

    /// Window rect covered by the whole world at the current zoom.
    pub fn world_rect(&self) -> Rect {
        let min = self.project(GeoCoord::new(MAX_LATITUDE, -180.0));
        let size = self.world_size() as f32;
        Rect::from_corners(min, min + Vec2::splat(size))
    }

    fn center_pixel(&self) -> DVec2 {
        (self.origin + self.size * 0.5).as_dvec2()
    }

    fn geo_to_world(&self, coord: GeoCoord) -> DVec2 {
        let world = self.world_size();
        let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let sin = lat.to_radians().sin();
        DVec2 {
            x: (coord.lng + 180.0) / 360.0 * world,
            y: (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * world,
        }
    }

    fn world_to_geo(&self, point: DVec2) -> GeoCoord {
        let world = self.world_size();
        let n = PI - 2.0 * PI * point.y / world;
        GeoCoord {
            lat: n.sinh().atan().to_degrees(),
            lng: point.x / world * 360.0 - 180.0,
        }
    }
}

impl Projection for MapViewport {
    fn unproject(&self, pixel: Vec2) -> GeoCoord {
        let offset = pixel.as_dvec2() - self.center_pixel();
        self.world_to_geo(self.geo_to_world(self.center) + offset)
    }

    fn project(&self, coord: GeoCoord) -> Vec2 {
        let offset = self.geo_to_world(coord) - self.geo_to_world(self.center);
        (self.center_pixel() + offset).as_vec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> MapViewport {
        MapViewport {
            origin: Vec2::new(256.0, 0.0),
            size: Vec2::new(1344.0, 900.0),
            center: GeoCoord::new(-12.0, 135.5),
            zoom: 3.25,
        }
    }

    fn assert_near(a: Vec2, b: Vec2) {
        assert!(a.distance(b) < 1e-3, "{a} != {b}");
    }

    #[test]
    fn center_is_middle_of_surface() {
        let viewport = viewport();
        assert_near(viewport.project(viewport.center), Vec2::new(928.0, 450.0));
        let center = viewport.unproject(Vec2::new(928.0, 450.0));
        assert!((center.lat - viewport.center.lat).abs() < 1e-9);
        assert!((center.lng - viewport.center.lng).abs() < 1e-9);
    }

    #[test]
    fn unproject_then_project_round_trips() {
        let viewport = viewport();
        for pixel in [
            Vec2::new(256.0, 0.0),
            Vec2::new(100.0, 200.0),
            Vec2::new(1600.0, 900.0),
            Vec2::new(731.5, 12.25),
        ] {
            assert_near(viewport.project(viewport.unproject(pixel)), pixel);
        }
    }

    #[test]
    fn north_is_up() {
        let viewport = viewport();
        let upper = viewport.unproject(Vec2::new(900.0, 100.0));
        let lower = viewport.unproject(Vec2::new(900.0, 800.0));
        assert!(upper.lat > lower.lat);
        let left = viewport.unproject(Vec2::new(300.0, 450.0));
        let right = viewport.unproject(Vec2::new(1500.0, 450.0));
        assert!(left.lng < right.lng);
    }

    #[test]
    fn zoom_keeps_anchor_under_cursor() {
        let mut viewport = viewport();
        let cursor = Vec2::new(400.0, 640.0);
        let before = viewport.unproject(cursor);
        viewport.zoom_at(cursor, 4.5);
        assert_eq!(viewport.zoom, 4.5);
        assert_near(viewport.project(before), cursor);
    }

    #[test]
    fn pan_moves_content_with_cursor() {
        let mut viewport = viewport();
        let grabbed = viewport.unproject(Vec2::new(700.0, 300.0));
        viewport.pan(Vec2::new(-50.0, 20.0));
        assert_near(viewport.project(grabbed), Vec2::new(650.0, 320.0));
    }

    #[test]
    fn contains_excludes_sidebar() {
        let viewport = viewport();
        assert!(!viewport.contains(Vec2::new(100.0, 100.0)));
        assert!(viewport.contains(Vec2::new(300.0, 100.0)));
    }

    #[test]
    fn world_rect_spans_world_size() {
        let viewport = viewport();
        let rect = viewport.world_rect();
        assert!((rect.width() as f64 - viewport.world_size()).abs() < 1e-2);
        assert!(rect.contains(viewport.project(viewport.center)));
    }
}
