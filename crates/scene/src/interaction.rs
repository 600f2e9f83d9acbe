//! Grab-and-rotate interaction
//!
//! A single [`InteractionSession`] tracks whether the interactive model is
//! grabbed. Mouse-down or a controller select-start that picks the model
//! starts a grab; mouse-up or select-end from the same source ends it.
//! While a mouse grab is active, cursor movement rotates the model by one
//! degree per pixel (configurable): vertical travel about X, horizontal
//! travel about -Y.
//!
//! Picking and session transitions are separate steps: the pick systems turn
//! input into [`GrabStart`] / [`GrabEnd`] messages, and the session systems
//! apply those. Orbit camera control is disabled for the duration of a grab
//! and is re-enabled unconditionally when the grab ends. Mouse grabs only
//! lock the camera when `lock_camera_on_mouse_grab` is set.

use bevy::input::mouse::MouseButton;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use vitrine_config::VitrineConfig;
use vitrine_ipc::{GrabSourceInfo, SceneToHost};

use crate::OutboundHostMessages;
use crate::camera::{MainCamera, OrbitCamera};
use crate::picking::{ModelPicker, controller_ray, screen_ray};
use crate::xr::TrackedController;

/// System set containing every system that starts, drives, or ends a grab
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct InteractionSystems;

/// What is holding the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabSource {
    Mouse,
    Controller {
        entity: Entity,
        /// Host-side input source index
        index: u32,
    },
}

impl From<GrabSource> for GrabSourceInfo {
    fn from(source: GrabSource) -> Self {
        match source {
            GrabSource::Mouse => GrabSourceInfo::Mouse,
            GrabSource::Controller { index, .. } => GrabSourceInfo::Controller { index },
        }
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionPhase {
    #[default]
    Idle,
    Grabbing {
        target: Entity,
        source: GrabSource,
        /// Last cursor position seen (mouse grabs only)
        last_pointer: Option<Vec2>,
    },
}

/// The one interaction session. At most one grab exists at a time.
#[derive(Resource, Debug, Default)]
pub struct InteractionSession {
    phase: InteractionPhase,
}

impl InteractionSession {
    pub fn phase(&self) -> InteractionPhase {
        self.phase
    }

    /// Whether a grab is in progress
    pub fn is_active(&self) -> bool {
        matches!(self.phase, InteractionPhase::Grabbing { .. })
    }

    /// Entity currently grabbed
    pub fn target(&self) -> Option<Entity> {
        match self.phase {
            InteractionPhase::Grabbing { target, .. } => Some(target),
            InteractionPhase::Idle => None,
        }
    }

    pub fn source(&self) -> Option<GrabSource> {
        match self.phase {
            InteractionPhase::Grabbing { source, .. } => Some(source),
            InteractionPhase::Idle => None,
        }
    }

    pub fn last_pointer(&self) -> Option<Vec2> {
        match self.phase {
            InteractionPhase::Grabbing { last_pointer, .. } => last_pointer,
            InteractionPhase::Idle => None,
        }
    }

    /// Start a grab. Returns false (and changes nothing) if one is already active.
    pub fn begin(&mut self, target: Entity, source: GrabSource, pointer: Option<Vec2>) -> bool {
        if self.is_active() {
            return false;
        }
        self.phase = InteractionPhase::Grabbing {
            target,
            source,
            last_pointer: pointer,
        };
        true
    }

    /// Feed a cursor position into a mouse grab.
    ///
    /// Returns the grabbed entity and the movement since the last position,
    /// or `None` when no mouse grab is active.
    pub fn drag_to(&mut self, pointer: Vec2) -> Option<(Entity, Vec2)> {
        let InteractionPhase::Grabbing {
            target,
            source: GrabSource::Mouse,
            last_pointer,
        } = &mut self.phase
        else {
            return None;
        };

        let delta = last_pointer.map_or(Vec2::ZERO, |last| pointer - last);
        *last_pointer = Some(pointer);
        Some((*target, delta))
    }

    /// End the grab held by `source`. Returns the released entity, or `None`
    /// if nothing was grabbed by that source.
    pub fn end(&mut self, source: GrabSource) -> Option<Entity> {
        match self.phase {
            InteractionPhase::Grabbing {
                target,
                source: held_by,
                ..
            } if held_by == source => {
                self.phase = InteractionPhase::Idle;
                Some(target)
            }
            _ => None,
        }
    }
}

/// Accumulated drag angles of the interactive model, in radians.
///
/// The model's rotation is rebuilt from these every drag, so the angles grow
/// without bound instead of wrapping through an Euler decomposition.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct DragRotation {
    pub x: f32,
    pub y: f32,
}

impl DragRotation {
    /// Vertical travel turns about X, horizontal travel about -Y
    pub fn rotate_by(&mut self, delta: Vec2, radians_per_pixel: f32) {
        self.x += delta.y * radians_per_pixel;
        self.y -= delta.x * radians_per_pixel;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.x, self.y, 0.0)
    }
}

/// Rotate by a pointer delta and write the result to `transform`
pub fn apply_drag_rotation(
    transform: &mut Transform,
    angles: &mut DragRotation,
    delta: Vec2,
    radians_per_pixel: f32,
) {
    angles.rotate_by(delta, radians_per_pixel);
    transform.rotation = angles.rotation();
}

/// Message: a controller's primary action was pressed
#[derive(Message, Debug, Clone, Copy)]
pub struct ControllerSelectStart {
    pub controller: Entity,
    /// Host-side input source index
    pub index: u32,
}

/// Message: a controller's primary action was released
#[derive(Message, Debug, Clone, Copy)]
pub struct ControllerSelectEnd {
    pub controller: Entity,
    pub index: u32,
}

/// Message: a grab-start resolved to the interactive model
#[derive(Message, Debug, Clone, Copy)]
pub struct GrabStart {
    pub source: GrabSource,
    pub target: Entity,
    /// Cursor position for mouse grabs
    pub pointer: Option<Vec2>,
}

/// Message: a grab-end signal from `source`
#[derive(Message, Debug, Clone, Copy)]
pub struct GrabEnd {
    pub source: GrabSource,
}

/// Plugin for grab interaction
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractionSession>()
            .add_message::<ControllerSelectStart>()
            .add_message::<ControllerSelectEnd>()
            .add_message::<GrabStart>()
            .add_message::<GrabEnd>()
            .add_systems(
                Update,
                (
                    (pick_mouse_grab, pick_controller_grab),
                    begin_grab,
                    drag_grabbed_model,
                    (release_mouse_grab, release_controller_grab),
                    end_grab,
                )
                    .chain()
                    .in_set(InteractionSystems),
            );
    }
}

fn set_orbit_enabled(cameras: &mut Query<&mut OrbitCamera>, enabled: bool) {
    for mut orbit in cameras.iter_mut() {
        orbit.enabled = enabled;
    }
}

/// Pick the model under the cursor when the left button goes down
fn pick_mouse_grab(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    session: Res<InteractionSession>,
    mut picker: ModelPicker,
    mut grab_start: MessageWriter<GrabStart>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) || session.is_active() {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Some(ray) = screen_ray(camera, camera_transform, window, cursor_pos) else {
        return;
    };

    match picker.pick(ray) {
        Some(target) => {
            grab_start.write(GrabStart {
                source: GrabSource::Mouse,
                target,
                pointer: Some(cursor_pos),
            });
        }
        None => debug!("Mouse down at {:?} hit no interactive model", cursor_pos),
    }
}

/// Pick the model along each controller ray that pressed select
fn pick_controller_grab(
    mut events: MessageReader<ControllerSelectStart>,
    controllers: Query<&Transform, With<TrackedController>>,
    mut picker: ModelPicker,
    mut grab_start: MessageWriter<GrabStart>,
) {
    for event in events.read() {
        let Ok(pose) = controllers.get(event.controller) else {
            warn!("Select-start from unknown controller {:?}", event.controller);
            continue;
        };

        // Controllers are hierarchy roots, so the local pose is the world pose
        let ray = controller_ray(&GlobalTransform::from(*pose));
        match picker.pick(ray) {
            Some(target) => {
                grab_start.write(GrabStart {
                    source: GrabSource::Controller {
                        entity: event.controller,
                        index: event.index,
                    },
                    target,
                    pointer: None,
                });
            }
            None => debug!("Select-start from {:?} hit no interactive model", event.controller),
        }
    }
}

/// Start the session for the first resolved grab; later ones are ignored
fn begin_grab(
    mut grab_start: MessageReader<GrabStart>,
    config: Res<VitrineConfig>,
    mut session: ResMut<InteractionSession>,
    mut cameras: Query<&mut OrbitCamera>,
    mut outbound: ResMut<OutboundHostMessages>,
) {
    for event in grab_start.read() {
        if !session.begin(event.target, event.source, event.pointer) {
            debug!("Ignoring grab from {:?}: a grab is already active", event.source);
            continue;
        }

        let locks_camera = match event.source {
            GrabSource::Mouse => config.interaction.lock_camera_on_mouse_grab,
            GrabSource::Controller { .. } => true,
        };
        if locks_camera {
            set_orbit_enabled(&mut cameras, false);
        }

        outbound.send(SceneToHost::GrabStarted {
            source: event.source.into(),
        });
        info!("Grab started by {:?} on {:?}", event.source, event.target);
    }
}

/// Rotate the grabbed model as the cursor moves
fn drag_grabbed_model(
    mut cursor_events: MessageReader<CursorMoved>,
    config: Res<VitrineConfig>,
    mut session: ResMut<InteractionSession>,
    mut models: Query<(&mut Transform, &mut DragRotation)>,
) {
    if session.source() != Some(GrabSource::Mouse) {
        cursor_events.clear();
        return;
    }

    let radians_per_pixel = config.interaction.radians_per_pixel();
    for event in cursor_events.read() {
        let Some((target, delta)) = session.drag_to(event.position) else {
            continue;
        };
        if let Ok((mut transform, mut angles)) = models.get_mut(target) {
            apply_drag_rotation(&mut transform, &mut angles, delta, radians_per_pixel);
        }
    }
}

fn release_mouse_grab(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut grab_end: MessageWriter<GrabEnd>,
) {
    if mouse_button.just_released(MouseButton::Left) {
        grab_end.write(GrabEnd {
            source: GrabSource::Mouse,
        });
    }
}

fn release_controller_grab(
    mut events: MessageReader<ControllerSelectEnd>,
    mut grab_end: MessageWriter<GrabEnd>,
) {
    for event in events.read() {
        grab_end.write(GrabEnd {
            source: GrabSource::Controller {
                entity: event.controller,
                index: event.index,
            },
        });
    }
}

/// End the session when its holder releases; camera control comes back
fn end_grab(
    mut grab_end: MessageReader<GrabEnd>,
    mut session: ResMut<InteractionSession>,
    mut cameras: Query<&mut OrbitCamera>,
    mut outbound: ResMut<OutboundHostMessages>,
) {
    for event in grab_end.read() {
        if let Some(target) = session.end(event.source) {
            set_orbit_enabled(&mut cameras, true);
            outbound.send(SceneToHost::GrabEnded {
                source: event.source.into(),
            });
            info!("Grab by {:?} released {:?}", event.source, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picking::{InteractiveModel, PickHit, resolve_target};
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-5;

    fn entities(count: usize) -> (World, Vec<Entity>) {
        let mut world = World::new();
        let ids = (0..count).map(|_| world.spawn_empty().id()).collect();
        (world, ids)
    }

    fn controller(entity: Entity, index: u32) -> GrabSource {
        GrabSource::Controller { entity, index }
    }

    #[test]
    fn test_begin_and_end_mouse_grab() {
        let (_world, ids) = entities(1);
        let mut session = InteractionSession::default();

        assert!(session.begin(ids[0], GrabSource::Mouse, Some(Vec2::new(100.0, 100.0))));
        assert!(session.is_active());
        assert_eq!(session.target(), Some(ids[0]));
        assert_eq!(session.last_pointer(), Some(Vec2::new(100.0, 100.0)));

        assert_eq!(session.end(GrabSource::Mouse), Some(ids[0]));
        assert!(!session.is_active());
        assert_eq!(session.target(), None);
    }

    #[test]
    fn test_end_while_idle_is_noop() {
        let mut session = InteractionSession::default();
        assert_eq!(session.end(GrabSource::Mouse), None);
        assert_eq!(session.phase(), InteractionPhase::Idle);
    }

    #[test]
    fn test_second_grab_is_rejected() {
        let (_world, ids) = entities(3);
        let mut session = InteractionSession::default();
        assert!(session.begin(ids[0], GrabSource::Mouse, Some(Vec2::ZERO)));
        assert!(!session.begin(ids[1], controller(ids[2], 0), None));
        assert_eq!(session.target(), Some(ids[0]));
        assert_eq!(session.source(), Some(GrabSource::Mouse));
    }

    #[test]
    fn test_end_from_other_source_keeps_grab() {
        let (_world, ids) = entities(3);
        let mut session = InteractionSession::default();
        session.begin(ids[0], controller(ids[1], 0), None);

        assert_eq!(session.end(GrabSource::Mouse), None);
        assert_eq!(session.end(controller(ids[2], 1)), None);
        assert!(session.is_active());

        assert_eq!(session.end(controller(ids[1], 0)), Some(ids[0]));
    }

    #[test]
    fn test_drag_without_grab_is_noop() {
        let mut session = InteractionSession::default();
        assert_eq!(session.drag_to(Vec2::new(5.0, 5.0)), None);
        assert!(!session.is_active());
    }

    #[test]
    fn test_drag_ignored_for_controller_grab() {
        let (_world, ids) = entities(2);
        let mut session = InteractionSession::default();
        session.begin(ids[0], controller(ids[1], 0), None);
        assert_eq!(session.drag_to(Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_drag_reports_delta_and_tracks_pointer() {
        let (_world, ids) = entities(1);
        let mut session = InteractionSession::default();
        session.begin(ids[0], GrabSource::Mouse, Some(Vec2::new(100.0, 100.0)));

        let (target, delta) = session.drag_to(Vec2::new(110.0, 115.0)).unwrap();
        assert_eq!(target, ids[0]);
        assert_eq!(delta, Vec2::new(10.0, 15.0));

        let (_, delta) = session.drag_to(Vec2::new(108.0, 115.0)).unwrap();
        assert_eq!(delta, Vec2::new(-2.0, 0.0));
        assert_eq!(session.last_pointer(), Some(Vec2::new(108.0, 115.0)));
    }

    #[test]
    fn test_drag_rotation_degree_rule() {
        let mut transform = Transform::IDENTITY;
        let mut angles = DragRotation::default();
        apply_drag_rotation(&mut transform, &mut angles, Vec2::new(10.0, 15.0), PI / 180.0);

        assert!((angles.x - 15.0_f32.to_radians()).abs() < EPSILON);
        assert!((angles.y - (-10.0_f32).to_radians()).abs() < EPSILON);
        let (x, y, z) = transform.rotation.to_euler(EulerRot::XYZ);
        assert!((x - 15.0_f32.to_radians()).abs() < EPSILON);
        assert!((y - (-10.0_f32).to_radians()).abs() < EPSILON);
        assert!(z.abs() < EPSILON);
    }

    #[test]
    fn test_drag_rotation_accumulates() {
        let mut transform = Transform::IDENTITY;
        let mut angles = DragRotation::default();
        apply_drag_rotation(&mut transform, &mut angles, Vec2::new(0.0, 10.0), PI / 180.0);
        apply_drag_rotation(&mut transform, &mut angles, Vec2::new(0.0, 20.0), PI / 180.0);

        let (x, _, _) = transform.rotation.to_euler(EulerRot::XYZ);
        assert!((x - 30.0_f32.to_radians()).abs() < EPSILON);
    }

    #[test]
    fn test_horizontal_drag_turns_past_quarter_turn() {
        let mut transform = Transform::IDENTITY;
        let mut angles = DragRotation::default();
        for _ in 0..180 {
            apply_drag_rotation(&mut transform, &mut angles, Vec2::new(1.0, 0.0), PI / 180.0);
        }

        assert!((angles.y + PI).abs() < 1e-3);
        let half_turn = Quat::from_rotation_y(-PI);
        assert!(transform.rotation.angle_between(half_turn) < 1e-2);

        // Keep going: a full turn lands back at the start
        for _ in 0..180 {
            apply_drag_rotation(&mut transform, &mut angles, Vec2::new(1.0, 0.0), PI / 180.0);
        }
        assert!(transform.rotation.angle_between(Quat::IDENTITY) < 1e-2);
    }

    /// Mouse-down on the model at (100,100), move to (110,115), release.
    #[test]
    fn test_mouse_grab_scenario() {
        let mut world = World::new();
        let model = world
            .spawn((InteractiveModel, Transform::IDENTITY))
            .id();
        let leaf = world.spawn(ChildOf(model)).id();
        let floor = world.spawn_empty().id();

        let hits = [
            PickHit { entity: leaf, distance: 5.0 },
            PickHit { entity: floor, distance: 20.0 },
        ];
        let target = resolve_target(&hits, &world).unwrap();
        assert_eq!(target, model);

        let mut session = InteractionSession::default();
        assert!(session.begin(target, GrabSource::Mouse, Some(Vec2::new(100.0, 100.0))));

        let (grabbed, delta) = session.drag_to(Vec2::new(110.0, 115.0)).unwrap();
        let mut angles = *world.get::<DragRotation>(grabbed).unwrap();
        let mut transform = world.get_mut::<Transform>(grabbed).unwrap();
        apply_drag_rotation(&mut transform, &mut angles, delta, PI / 180.0);

        let (x, y, _) = world
            .get::<Transform>(model)
            .unwrap()
            .rotation
            .to_euler(EulerRot::XYZ);
        assert!((x - 15.0 * PI / 180.0).abs() < EPSILON);
        assert!((y + 10.0 * PI / 180.0).abs() < EPSILON);

        assert_eq!(session.end(GrabSource::Mouse), Some(model));
        assert_eq!(session.target(), None);
    }

    /// App running the session systems; the pick step is fed by writing
    /// `GrabStart` directly.
    struct Showroom {
        app: App,
        camera: Entity,
        model: Entity,
        window: Entity,
    }

    fn showroom(lock_camera_on_mouse_grab: bool) -> Showroom {
        let mut config = VitrineConfig::default();
        config.interaction.lock_camera_on_mouse_grab = lock_camera_on_mouse_grab;

        let mut app = App::new();
        app.insert_resource(config)
            .init_resource::<InteractionSession>()
            .init_resource::<OutboundHostMessages>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_message::<CursorMoved>()
            .add_message::<ControllerSelectEnd>()
            .add_message::<GrabStart>()
            .add_message::<GrabEnd>()
            .add_systems(
                Update,
                (
                    begin_grab,
                    drag_grabbed_model,
                    (release_mouse_grab, release_controller_grab),
                    end_grab,
                )
                    .chain(),
            );

        let camera = app.world_mut().spawn(OrbitCamera::default()).id();
        let model = app
            .world_mut()
            .spawn((InteractiveModel, Transform::from_xyz(0.0, 1.0, 0.0)))
            .id();
        app.world_mut().spawn((Name::new("body"), ChildOf(model)));
        let window = app.world_mut().spawn_empty().id();

        Showroom {
            app,
            camera,
            model,
            window,
        }
    }

    impl Showroom {
        fn camera_enabled(&self) -> bool {
            self.app.world().get::<OrbitCamera>(self.camera).unwrap().enabled
        }

        fn session(&self) -> &InteractionSession {
            self.app.world().resource::<InteractionSession>()
        }

        fn grab(&mut self, source: GrabSource, pointer: Option<Vec2>) {
            let target = self.model;
            self.app.world_mut().write_message(GrabStart {
                source,
                target,
                pointer,
            });
            self.app.update();
        }

        fn move_cursor(&mut self, position: Vec2) {
            let window = self.window;
            self.app.world_mut().write_message(CursorMoved {
                window,
                position,
                delta: None,
            });
            self.app.update();
        }

        fn click_release(&mut self) {
            let mut input = self.app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
            input.press(MouseButton::Left);
            input.clear();
            input.release(MouseButton::Left);
            self.app.update();
            self.app
                .world_mut()
                .resource_mut::<ButtonInput<MouseButton>>()
                .clear();
        }

        fn sent(&mut self) -> Vec<SceneToHost> {
            self.app
                .world_mut()
                .resource_mut::<OutboundHostMessages>()
                .drain()
        }
    }

    #[test]
    fn test_mouse_grab_drag_release_in_app() {
        let mut scene = showroom(true);

        scene.grab(GrabSource::Mouse, Some(Vec2::new(100.0, 100.0)));
        assert_eq!(scene.session().target(), Some(scene.model));
        assert!(!scene.camera_enabled());
        assert_eq!(
            scene.sent(),
            vec![SceneToHost::GrabStarted {
                source: GrabSourceInfo::Mouse
            }]
        );

        scene.move_cursor(Vec2::new(110.0, 115.0));
        let rotation = scene.app.world().get::<Transform>(scene.model).unwrap().rotation;
        let (x, y, _) = rotation.to_euler(EulerRot::XYZ);
        assert!((x - 15.0_f32.to_radians()).abs() < EPSILON);
        assert!((y + 10.0_f32.to_radians()).abs() < EPSILON);

        scene.click_release();
        assert!(!scene.session().is_active());
        assert!(scene.camera_enabled());
        assert_eq!(
            scene.sent(),
            vec![SceneToHost::GrabEnded {
                source: GrabSourceInfo::Mouse
            }]
        );
    }

    #[test]
    fn test_mouse_grab_without_camera_lock() {
        let mut scene = showroom(false);

        scene.grab(GrabSource::Mouse, Some(Vec2::ZERO));
        assert!(scene.session().is_active());
        assert!(scene.camera_enabled());

        scene.click_release();
        assert!(!scene.session().is_active());
        assert!(scene.camera_enabled());
    }

    /// A mouse-down that resolved to nothing produces no `GrabStart`
    #[test]
    fn test_unresolved_mouse_down_leaves_camera_and_session_alone() {
        let mut scene = showroom(true);

        scene.move_cursor(Vec2::new(50.0, 50.0));
        scene.click_release();

        assert!(!scene.session().is_active());
        assert!(scene.camera_enabled());
        assert!(scene.sent().is_empty());
        let rotation = scene.app.world().get::<Transform>(scene.model).unwrap().rotation;
        assert!(rotation.angle_between(Quat::IDENTITY) < EPSILON);
    }

    #[test]
    fn test_controller_grab_locks_camera_even_without_mouse_lock() {
        let mut scene = showroom(false);
        let hand = scene.app.world_mut().spawn_empty().id();

        scene.grab(controller(hand, 2), None);
        assert!(!scene.camera_enabled());
        assert_eq!(
            scene.sent(),
            vec![SceneToHost::GrabStarted {
                source: GrabSourceInfo::Controller { index: 2 }
            }]
        );

        // Cursor movement does not rotate a controller-held model
        scene.move_cursor(Vec2::new(200.0, 0.0));
        let rotation = scene.app.world().get::<Transform>(scene.model).unwrap().rotation;
        assert!(rotation.angle_between(Quat::IDENTITY) < EPSILON);

        // Mouse-up is not the holder's release
        scene.click_release();
        assert!(scene.session().is_active());

        scene
            .app
            .world_mut()
            .write_message(ControllerSelectEnd { controller: hand, index: 2 });
        scene.app.update();
        assert!(!scene.session().is_active());
        assert!(scene.camera_enabled());
    }

    #[test]
    fn test_second_grab_in_app_is_ignored() {
        let mut scene = showroom(true);
        let hand = scene.app.world_mut().spawn_empty().id();

        scene.grab(GrabSource::Mouse, Some(Vec2::ZERO));
        scene.sent();
        scene.grab(controller(hand, 0), None);

        assert_eq!(scene.session().source(), Some(GrabSource::Mouse));
        assert!(scene.sent().is_empty());
    }

    #[test]
    fn test_release_while_idle_leaves_camera_alone() {
        let mut scene = showroom(true);
        scene
            .app
            .world_mut()
            .get_mut::<OrbitCamera>(scene.camera)
            .unwrap()
            .enabled = false;
        let hand = scene.app.world_mut().spawn_empty().id();

        scene
            .app
            .world_mut()
            .write_message(ControllerSelectEnd { controller: hand, index: 0 });
        scene.app.update();

        // No session ended, so nothing toggled and nothing was reported
        assert!(!scene.camera_enabled());
        assert!(scene.sent().is_empty());
    }
}
