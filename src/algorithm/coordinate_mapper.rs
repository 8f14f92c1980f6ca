use crate::models::geometry::{Point, Point3};
use crate::models::landmarks::Landmark;
use crate::models::settings::{ViewportSettings, WorldSettings};

/// Maps normalized landmarks into viewport pixels and, optionally, into the
/// 3D display space. The camera image is mirrored, so `x` is flipped.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    viewport: ViewportSettings,
    world: Option<WorldSettings>,
}

impl CoordinateMapper {
    pub fn new(viewport: ViewportSettings, world: Option<WorldSettings>) -> Self {
        Self { viewport, world }
    }

    pub fn viewport(&self) -> ViewportSettings {
        self.viewport
    }

    pub fn to_pixels(&self, landmark: &Landmark) -> Point {
        Point {
            x: (1.0 - landmark.x) * self.viewport.width,
            y: landmark.y * self.viewport.height,
        }
    }

    /// Origin at the frame centre, `y` up, closer to the camera = larger `z`.
    pub fn to_world(&self, landmark: &Landmark) -> Option<Point3> {
        let world = self.world?;
        Some(Point3 {
            x: (0.5 - landmark.x) * world.width,
            y: (0.5 - landmark.y) * world.height,
            z: -landmark.z * world.depth_scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(world: Option<WorldSettings>) -> CoordinateMapper {
        CoordinateMapper::new(
            ViewportSettings {
                width: 1000.0,
                height: 500.0,
            },
            world,
        )
    }

    #[test]
    fn pixels_are_mirrored_horizontally() {
        let mapper = mapper(None);
        let left_of_camera = mapper.to_pixels(&Landmark::new(0.0, 0.0, 0.0));
        assert_eq!(left_of_camera, Point::new(1000.0, 0.0));
        let point = mapper.to_pixels(&Landmark::new(0.25, 0.5, -0.3));
        assert_eq!(point, Point::new(750.0, 250.0));
    }

    #[test]
    fn world_mapping_is_optional() {
        assert!(mapper(None).to_world(&Landmark::new(0.5, 0.5, 0.0)).is_none());

        let mapper = mapper(Some(WorldSettings {
            width: 16.0,
            height: 9.0,
            depth_scale: 10.0,
        }));
        let center = mapper.to_world(&Landmark::new(0.5, 0.5, 0.0)).expect("world");
        assert_eq!(center, Point3::default());
        let corner = mapper.to_world(&Landmark::new(0.0, 0.0, -0.1)).expect("world");
        assert!((corner.x - 8.0).abs() < 1e-9);
        assert!((corner.y - 4.5).abs() < 1e-9);
        assert!((corner.z - 1.0).abs() < 1e-9);
    }
}
