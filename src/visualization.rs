//! Interactive 3D viewer using kiss3d.
//!
//! The viewer is both the engine's presentation sink and its command source:
//! key presses become move requests and every frame ticks the engine once.

use kiss3d::prelude::*;
use tracing::debug;

use cube::registry::{idx_to_coord, slot_to_point, Coord, CUBIE_COUNT};
use cube::shuffle::DEFAULT_SHUFFLE_LENGTH;
use cube::{ConfigError, CubiePose, Engine, EngineConfig, PresentationSink};

/// Returns the sticker color for a face, in +x, -x, +y, -y, +z, -z order.
fn face_color(face: usize) -> Color {
    match face {
        0 => Color::new(0.0, 0.61, 0.28, 1.0), // green
        1 => Color::new(0.73, 0.0, 0.0, 1.0),  // red
        2 => Color::new(0.0, 0.27, 0.68, 1.0), // blue
        3 => Color::new(1.0, 0.35, 0.0, 1.0),  // orange
        4 => Color::new(1.0, 1.0, 1.0, 1.0),   // white
        _ => Color::new(1.0, 0.84, 0.0, 1.0),  // yellow
    }
}

/// Sticker thickness and inset relative to the cubie edge.
const STICKER_DEPTH: f32 = 0.1;
const STICKER_INSET: f32 = 0.85;

/// Scene nodes for each cubie, in engine arena order.
struct SceneSink {
    nodes: Vec<SceneNode3d>,
    viewport: (u32, u32),
}

impl PresentationSink for SceneSink {
    fn draw(&mut self, poses: &[CubiePose]) {
        for (node, pose) in self.nodes.iter_mut().zip(poses) {
            let translation = pose.transform.translation.vector;
            let rotation = pose.transform.rotation.quaternion();
            node.set_position(Vec3::new(translation.x, translation.y, translation.z));
            node.set_rotation(Quat::from_xyzw(rotation.i, rotation.j, rotation.k, rotation.w));
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        debug!(width, height, "viewport resized");
        self.viewport = (width, height);
    }
}

/// Builds one cubie: a dark body with a sticker on each outward face.
///
/// Stickers are children of the body, so they follow its transform.
fn build_cubie(scene: &mut SceneNode3d, home: Coord, config: &EngineConfig) -> SceneNode3d {
    let size = config.cube_size;
    let position = slot_to_point(home, config.boundary_size());
    let mut body = scene
        .add_cube(size, size, size)
        .set_color(Color::new(0.05, 0.05, 0.05, 1.0))
        .set_position(Vec3::new(position.x, position.y, position.z));

    let (x, y, z) = home;
    let sticker = size * STICKER_INSET;
    let offset = (size + STICKER_DEPTH) / 2.0;
    let faces = [
        (x == 1, Vec3::new(offset, 0.0, 0.0), (STICKER_DEPTH, sticker, sticker)),
        (x == -1, Vec3::new(-offset, 0.0, 0.0), (STICKER_DEPTH, sticker, sticker)),
        (y == 1, Vec3::new(0.0, offset, 0.0), (sticker, STICKER_DEPTH, sticker)),
        (y == -1, Vec3::new(0.0, -offset, 0.0), (sticker, STICKER_DEPTH, sticker)),
        (z == 1, Vec3::new(0.0, 0.0, offset), (sticker, sticker, STICKER_DEPTH)),
        (z == -1, Vec3::new(0.0, 0.0, -offset), (sticker, sticker, STICKER_DEPTH)),
    ];
    for (face, (outward, local, (w, h, d))) in faces.into_iter().enumerate() {
        if outward {
            body.add_cube(w, h, d)
                .set_color(face_color(face))
                .set_position(local);
        }
    }

    body
}

/// Maps a key to the face letter it turns.
fn face_token(key: kiss3d::event::Key) -> Option<&'static str> {
    use kiss3d::event::Key;
    match key {
        Key::F => Some("F"),
        Key::B => Some("B"),
        Key::L => Some("L"),
        Key::R => Some("R"),
        Key::U => Some("U"),
        Key::D => Some("D"),
        _ => None,
    }
}

/// Opens the viewer and runs until the window is closed.
pub fn display(config: EngineConfig) -> Result<(), ConfigError> {
    pollster::block_on(display_async(config))
}

async fn display_async(config: EngineConfig) -> Result<(), ConfigError> {
    let mut window =
        Window::new("Twisty Cube - [F/B/L/R/U/D] turn, [Shift] prime, [S] shuffle").await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(40.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(-20.0, 20.0, 30.0));

    let nodes = (0..CUBIE_COUNT)
        .map(|index| build_cubie(&mut scene, idx_to_coord(index), &config))
        .collect();
    let mut engine = Engine::new(
        config,
        SceneSink {
            nodes,
            viewport: (0, 0),
        },
    )?;

    let mut rng = rand::thread_rng();
    let mut shift_held = false;

    loop {
        for event in window.events().iter() {
            use kiss3d::event::{Action, Key, WindowEvent};
            match event.value {
                WindowEvent::Key(Key::LShift | Key::RShift, action, _) => {
                    shift_held = action != Action::Release;
                }
                WindowEvent::Key(Key::S, Action::Press, _) => {
                    engine.shuffle(&mut rng, DEFAULT_SHUFFLE_LENGTH);
                }
                WindowEvent::Key(key, Action::Press, _) => {
                    if let Some(face) = face_token(key) {
                        let token = if shift_held {
                            format!("{face}'")
                        } else {
                            face.to_owned()
                        };
                        engine.request_move(&token);
                    }
                }
                WindowEvent::FramebufferSize(width, height) => engine.resize(width, height),
                _ => {}
            }
        }

        engine.tick();

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }

    debug!(viewport = ?engine.sink().viewport, "viewer closed");
    Ok(())
}
