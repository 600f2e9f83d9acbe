//! Pick resolution for the interactive model
//!
//! Rays come from two places: the mouse cursor projected through the main
//! camera, or a tracked XR controller's pose. Both are cast against every
//! mesh in the world with Bevy's mesh ray cast; the nearest hit is then
//! walked up the hierarchy until the entity tagged [`InteractiveModel`] is
//! found. A hit that never reaches it (floor, wall) resolves to nothing.

use bevy::ecs::system::SystemParam;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;

use crate::interaction::DragRotation;

/// Display name given to the interactive model's root entity
pub const INTERACTIVE_MODEL_NAME: &str = "interactiveModel";

/// Tag for the single entity that can be grabbed and rotated.
///
/// The glTF scene is spawned beneath it, so mesh hits land on descendants.
#[derive(Component, Debug, Default, Clone, Copy)]
#[require(DragRotation)]
pub struct InteractiveModel;

/// One ray intersection: the mesh entity and its distance along the ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub entity: Entity,
    pub distance: f32,
}

/// Read access to parent links and interaction tags.
pub trait SceneHierarchy {
    /// Parent of `entity`, or `None` at a hierarchy root
    fn parent(&self, entity: Entity) -> Option<Entity>;

    /// Whether `entity` is the grabbable root
    fn is_interactive_root(&self, entity: Entity) -> bool;
}

impl SceneHierarchy for World {
    fn parent(&self, entity: Entity) -> Option<Entity> {
        self.get::<ChildOf>(entity).map(ChildOf::parent)
    }

    fn is_interactive_root(&self, entity: Entity) -> bool {
        self.get::<InteractiveModel>(entity).is_some()
    }
}

/// Query used by systems to walk the hierarchy
pub type HierarchyQuery<'w, 's> =
    Query<'w, 's, (Option<&'static ChildOf>, Has<InteractiveModel>)>;

impl SceneHierarchy for HierarchyQuery<'_, '_> {
    fn parent(&self, entity: Entity) -> Option<Entity> {
        self.get(entity)
            .ok()
            .and_then(|(child_of, _)| child_of.map(ChildOf::parent))
    }

    fn is_interactive_root(&self, entity: Entity) -> bool {
        self.get(entity).is_ok_and(|(_, interactive)| interactive)
    }
}

/// Resolve the nearest hit to the interactive model it belongs to.
///
/// Returns `None` when nothing was hit or when the nearest hit is outside
/// the interactive model's subtree.
pub fn resolve_target(hits: &[PickHit], hierarchy: &impl SceneHierarchy) -> Option<Entity> {
    let nearest = hits
        .iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))?;

    std::iter::successors(Some(nearest.entity), |&entity| hierarchy.parent(entity))
        .find(|&entity| hierarchy.is_interactive_root(entity))
}

/// Convert a pointer position to normalized device coordinates.
///
/// `viewport` is the logical rectangle the camera renders into. Returns
/// `None` for a zero-sized viewport.
pub fn pointer_to_ndc(pointer: Vec2, viewport: Rect) -> Option<Vec2> {
    let size = viewport.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }

    Some(Vec2::new(
        ((pointer.x - viewport.min.x) / size.x) * 2.0 - 1.0,
        -((pointer.y - viewport.min.y) / size.y) * 2.0 + 1.0,
    ))
}

/// Unproject an NDC point through the camera into a world-space ray.
///
/// Bevy uses reverse-Z, so the near plane sits at depth 1.
pub fn ndc_to_ray(camera: &Camera, camera_transform: &GlobalTransform, ndc: Vec2) -> Option<Ray3d> {
    let near = camera.ndc_to_world(camera_transform, ndc.extend(1.0))?;
    let far = camera.ndc_to_world(camera_transform, ndc.extend(f32::EPSILON))?;
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Build a pick ray from a cursor position in window coordinates
pub fn screen_ray(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    window: &Window,
    cursor: Vec2,
) -> Option<Ray3d> {
    let viewport = camera
        .logical_viewport_rect()
        .unwrap_or_else(|| Rect::new(0.0, 0.0, window.width(), window.height()));
    let ndc = pointer_to_ndc(cursor, viewport)?;
    ndc_to_ray(camera, camera_transform, ndc)
}

/// Build a pick ray from a controller pose: its position, looking down local -Z
pub fn controller_ray(controller: &GlobalTransform) -> Ray3d {
    Ray3d::new(controller.translation(), controller.forward())
}

/// System parameter bundling the mesh ray cast with the hierarchy walk
#[derive(SystemParam)]
pub struct ModelPicker<'w, 's> {
    ray_cast: MeshRayCast<'w, 's>,
    hierarchy: HierarchyQuery<'w, 's>,
}

impl ModelPicker<'_, '_> {
    /// Cast `ray` against all meshes and return every hit, nearest first
    pub fn cast(&mut self, ray: Ray3d) -> Vec<PickHit> {
        let settings = MeshRayCastSettings::default().never_early_exit();
        self.ray_cast
            .cast_ray(ray, &settings)
            .iter()
            .map(|(entity, hit)| PickHit {
                entity: *entity,
                distance: hit.distance,
            })
            .collect()
    }

    /// Cast `ray` and resolve the hit to the interactive model, if any
    pub fn pick(&mut self, ray: Ray3d) -> Option<Entity> {
        let hits = self.cast(ray);
        resolve_target(&hits, &self.hierarchy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    /// interactiveModel -> body -> leaf, plus an unrelated floor
    struct Showroom {
        world: World,
        model: Entity,
        body: Entity,
        leaf: Entity,
        floor: Entity,
    }

    fn showroom() -> Showroom {
        let mut world = World::new();
        let model = world
            .spawn((InteractiveModel, Name::new(INTERACTIVE_MODEL_NAME)))
            .id();
        let body = world.spawn((Name::new("body"), ChildOf(model))).id();
        let leaf = world.spawn((Name::new("leaf"), ChildOf(body))).id();
        let floor = world.spawn(Name::new("floor")).id();
        Showroom {
            world,
            model,
            body,
            leaf,
            floor,
        }
    }

    fn hit(entity: Entity, distance: f32) -> PickHit {
        PickHit { entity, distance }
    }

    #[test]
    fn test_empty_hits_resolve_to_none() {
        let scene = showroom();
        assert_eq!(resolve_target(&[], &scene.world), None);
    }

    #[test]
    fn test_leaf_hit_resolves_to_model() {
        let scene = showroom();
        let hits = [hit(scene.leaf, 5.0), hit(scene.floor, 20.0)];
        assert_eq!(resolve_target(&hits, &scene.world), Some(scene.model));
    }

    #[test]
    fn test_nearest_hit_wins_regardless_of_order() {
        let scene = showroom();
        let hits = [hit(scene.floor, 20.0), hit(scene.body, 5.0)];
        assert_eq!(resolve_target(&hits, &scene.world), Some(scene.model));
    }

    #[test]
    fn test_floor_in_front_of_model_resolves_to_none() {
        let scene = showroom();
        let hits = [hit(scene.floor, 2.0), hit(scene.leaf, 5.0)];
        assert_eq!(resolve_target(&hits, &scene.world), None);
    }

    #[test]
    fn test_direct_hit_on_model_root() {
        let scene = showroom();
        assert_eq!(
            resolve_target(&[hit(scene.model, 1.0)], &scene.world),
            Some(scene.model)
        );
    }

    #[test]
    fn test_subtree_without_tag_resolves_to_none() {
        let mut scene = showroom();
        let prop = scene.world.spawn(Name::new("prop")).id();
        let prop_leaf = scene.world.spawn(ChildOf(prop)).id();
        assert_eq!(resolve_target(&[hit(prop_leaf, 3.0)], &scene.world), None);
    }

    #[test]
    fn test_resolve_is_repeatable() {
        let scene = showroom();
        let hits = [hit(scene.leaf, 5.0)];
        let first = resolve_target(&hits, &scene.world);
        let second = resolve_target(&hits, &scene.world);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pointer_to_ndc_corners() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        let top_left = pointer_to_ndc(Vec2::ZERO, viewport).unwrap();
        let bottom_right = pointer_to_ndc(Vec2::new(800.0, 600.0), viewport).unwrap();
        let center = pointer_to_ndc(Vec2::new(400.0, 300.0), viewport).unwrap();

        assert!((top_left - Vec2::new(-1.0, 1.0)).length() < EPSILON);
        assert!((bottom_right - Vec2::new(1.0, -1.0)).length() < EPSILON);
        assert!(center.length() < EPSILON);
    }

    #[test]
    fn test_pointer_to_ndc_offset_viewport() {
        let viewport = Rect::new(100.0, 50.0, 300.0, 150.0);
        let ndc = pointer_to_ndc(Vec2::new(150.0, 125.0), viewport).unwrap();
        assert!((ndc.x - -0.5).abs() < EPSILON);
        assert!((ndc.y - -0.5).abs() < EPSILON);
    }

    #[test]
    fn test_pointer_to_ndc_degenerate_viewport() {
        let viewport = Rect::new(0.0, 0.0, 0.0, 600.0);
        assert!(pointer_to_ndc(Vec2::new(10.0, 10.0), viewport).is_none());
    }

    #[test]
    fn test_controller_ray_points_down_local_negative_z() {
        let pose = Transform::from_xyz(0.0, 1.5, 0.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let ray = controller_ray(&GlobalTransform::from(pose));

        assert!((ray.origin - Vec3::new(0.0, 1.5, 0.0)).length() < EPSILON);
        // -Z rotated 90 degrees about Y points down -X
        assert!((*ray.direction - Vec3::NEG_X).length() < EPSILON);
    }
}
