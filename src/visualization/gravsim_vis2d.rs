use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::simulation::params::{next_preset, Parameter, DENSITY_PRESETS, G_PRESETS, MAX_MASS_PRESETS};
use crate::simulation::scenario::Scenario;

/// Smallest disc drawn, in pixels
const MIN_SCREEN_RADIUS: f32 = 1.0;

/// Color ramp from blue (light) through green to red (at `max_mass`).
pub fn mass_to_color(m: f64, max_mass: f64) -> [f32; 3] {
    let ratio = (m / max_mass).clamp(0.0, 1.0);
    let r = 1.0 - (1.0 - ratio).powi(2);
    let g = 1.0 - (2.0 * ratio - 1.0).powi(2);
    let b = 1.0 - ratio.powi(2);
    [r as f32, g as f32, b as f32]
}

/// Extra centers at which a disc at (x, y) with radius `r` must be drawn so
/// that the part poking over an edge shows up on the opposite one.
/// Screen coordinates, origin top-left, extent `w` × `h`.
pub fn mirror_offsets(x: f64, y: f64, r: f64, w: f64, h: f64) -> Vec<(f64, f64)> {
    let mut dxs = vec![0.0];
    if x - r < 0.0 {
        dxs.push(w);
    }
    if x + r > w {
        dxs.push(-w);
    }
    let mut dys = vec![0.0];
    if y - r < 0.0 {
        dys.push(h);
    }
    if y + r > h {
        dys.push(-h);
    }

    let mut out = Vec::new();
    for &dx in &dxs {
        for &dy in &dys {
            if dx != 0.0 || dy != 0.0 {
                out.push((x + dx, y + dy));
            }
        }
    }
    out
}

pub fn run_2d(scenario: Scenario) {
    let space = scenario.world.params().space;
    info!(
        "run_2d: starting Bevy 2D viewer with {} bodies",
        scenario.world.body_count()
    );

    App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "gravsim".into(),
                        resolution: (space.width as f32, space.height as f32).into(),
                        ..default()
                    }),
                    ..default()
                })
                // main() already installed the tracing subscriber
                .disable::<LogPlugin>(),
        )
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_systems(Startup, setup_camera_system)
        .add_systems(
            Update,
            (
                resize_system,
                input_system,
                physics_step_system,
                draw_bodies_system,
                status_system,
            )
                .chain(),
        )
        .run();
}

fn setup_camera_system(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

/// Window cursor -> world coordinates (both y-down, origin top-left).
fn cursor_to_world(window: &Window, width: f64, height: f64) -> Option<(f64, f64)> {
    let c = window.cursor_position()?;
    let x = c.x as f64 / window.width() as f64 * width;
    let y = c.y as f64 / window.height() as f64 * height;
    Some((x, y))
}

fn cycle_preset(scenario: &mut Scenario, param: Parameter, presets: &[f64]) {
    let next = next_preset(presets, scenario.world.params().get(param));
    // rejected values are logged by the world
    let _ = scenario.world.set_parameter(param, next);
}

fn input_system(
    mut scenario: ResMut<Scenario>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let scenario = &mut *scenario;
    let space = scenario.world.params().space;

    if mouse.just_pressed(MouseButton::Left) {
        if let Some((x, y)) = cursor_to_world(window, space.width, space.height) {
            let _ = scenario.world.spawn_random_at(x, y);
        }
    }
    if mouse.just_pressed(MouseButton::Right) || keys.just_pressed(KeyCode::KeyP) {
        scenario.world.toggle_running();
    }
    if keys.just_pressed(KeyCode::Space) {
        scenario.world.step_once();
    }
    if keys.just_pressed(KeyCode::Escape) {
        scenario.world.clear();
    }
    if keys.just_pressed(KeyCode::KeyG) {
        cycle_preset(scenario, Parameter::G, &G_PRESETS);
    }
    if keys.just_pressed(KeyCode::KeyM) {
        cycle_preset(scenario, Parameter::MaxMass, &MAX_MASS_PRESETS);
    }
    if keys.just_pressed(KeyCode::KeyD) {
        cycle_preset(scenario, Parameter::Density, &DENSITY_PRESETS);
    }
}

/// The plane follows the window: a resize goes through the world's
/// `on_resize` policy (rescale or reset).
fn resize_system(mut scenario: ResMut<Scenario>, mut events: EventReader<WindowResized>) {
    let Some(last) = events.read().last() else {
        return;
    };
    let (w, h) = (last.width as f64, last.height as f64);
    let space = scenario.world.params().space;
    // rejected sizes (e.g. a minimized window) are logged by the world
    if w != space.width {
        let _ = scenario.world.set_parameter(Parameter::Width, w);
    }
    if h != space.height {
        let _ = scenario.world.set_parameter(Parameter::Height, h);
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    scenario.world.tick();
}

fn draw_bodies_system(
    scenario: Res<Scenario>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut gizmos: Gizmos,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let params = scenario.world.params();
    let (w, h) = (window.width() as f64, window.height() as f64);
    let sx = w / params.space.width;
    let sy = h / params.space.height;
    let toroidal = params.space.is_toroidal();

    for b in scenario.world.snapshot() {
        // screen space, y down
        let x = b.x * sx;
        let y = b.y * sy;
        let r = (b.radius * sy).max(MIN_SCREEN_RADIUS as f64);
        let [cr, cg, cb] = mass_to_color(b.m, params.max_mass);
        let color = Color::srgb(cr, cg, cb);

        let mut centers = vec![(x, y)];
        if toroidal {
            centers.extend(mirror_offsets(x, y, r, w, h));
        }
        for (cx, cy) in centers {
            // camera space: origin at the window center, y up
            let p = Vec2::new((cx - w / 2.0) as f32, (h / 2.0 - cy) as f32);
            gizmos.circle_2d(p, r as f32, color);
        }
    }
}

fn status_system(
    scenario: Res<Scenario>,
    diagnostics: Res<DiagnosticsStore>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    let world = &scenario.world;
    let params = world.params();
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    let space = params.space;
    let hover = cursor_to_world(&window, space.width, space.height).map(|(x, y)| {
        match world.query_body_at(x, y) {
            Some(b) => format!("m={:.0} v=({:.2}, {:.2})", b.m, b.v.x, b.v.y),
            None => format!("x={x:.0} y={y:.0}"),
        }
    });

    let title = format!(
        "gravsim [{}] bodies: {} | mass: {:.0} | G={} density={} max={} | {:.0} FPS{}",
        if world.is_running() { "running" } else { "paused" },
        world.body_count(),
        world.total_mass(),
        params.g,
        params.density,
        params.max_mass,
        fps,
        hover.map(|s| format!(" | {s}")).unwrap_or_default(),
    );
    if window.title != title {
        window.title = title;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ramp_endpoints() {
        assert_eq!(mass_to_color(0.0, 100.0), [0.0, 0.0, 1.0]);
        assert_eq!(mass_to_color(100.0, 100.0), [1.0, 0.0, 0.0]);
        assert_eq!(mass_to_color(500.0, 100.0), [1.0, 0.0, 0.0]);
        let [_, g, _] = mass_to_color(50.0, 100.0);
        assert_eq!(g, 1.0);
    }

    #[test]
    fn interior_disc_has_no_mirrors() {
        assert!(mirror_offsets(50.0, 50.0, 5.0, 100.0, 100.0).is_empty());
    }

    #[test]
    fn corner_disc_is_drawn_four_times() {
        let m = mirror_offsets(2.0, 98.0, 5.0, 100.0, 100.0);
        assert_eq!(m.len(), 3);
        assert!(m.contains(&(102.0, 98.0)));
        assert!(m.contains(&(2.0, -2.0)));
        assert!(m.contains(&(102.0, -2.0)));
    }

    #[test]
    fn window_resize_rescales_the_world() {
        let cfg = crate::configuration::config::parse_scenario(
            "space:\n  width: 800.0\n  height: 600.0\nbodies:\n  - { x: [ 400.0, 300.0 ], m: 10.0 }\n",
        )
        .unwrap();
        let scenario = Scenario::build_scenario(&cfg).unwrap();

        let mut app = App::new();
        app.insert_resource(scenario)
            .add_event::<WindowResized>()
            .add_systems(Update, resize_system);
        app.world_mut().send_event(WindowResized {
            window: Entity::PLACEHOLDER,
            width: 400.0,
            height: 300.0,
        });
        app.update();

        let world = &app.world().resource::<Scenario>().world;
        assert_eq!(world.params().space.width, 400.0);
        assert_eq!(world.params().space.height, 300.0);
        let b = &world.bodies()[0];
        assert!((b.x.x - 200.0).abs() < 1e-9 && (b.x.y - 150.0).abs() < 1e-9);
    }
}
