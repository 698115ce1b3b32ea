//! 3D view of the cube using kiss3d.

use std::time::Instant;

use kiss3d::prelude::*;

use twister::lattice::{Cublet, STICKER_PALETTE};
use twister::{
    ConfigError, Direction, EngineConfig, Face, Move, MoveSequencer, PuzzleEngine, RandomMoves,
    SequencerStatus,
};

/// Half extent of a sticker (slightly smaller than the cublet face).
const STICKER_SIZE: f32 = 9.0;
/// Thickness of a sticker.
const STICKER_DEPTH: f32 = 0.4;
/// Frame time cap so a stalled window does not finish a turn in one jump.
const MAX_FRAME_SECONDS: f32 = 0.1;

/// Outward normals in sticker order: front, right, top, back, left, bottom.
const FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
];

/// A cublet's scene nodes.
struct RenderedCublet {
    /// Which engine cublet this mirrors.
    id: usize,
    body: SceneNode3d,
    /// Sticker nodes with their centers relative to the cublet center.
    stickers: Vec<(SceneNode3d, glam::Vec3)>,
}

/// Builds one body plus its stickers for every cublet.
///
/// Each sticker is a thin box lying on its face, so it only ever needs the
/// cublet's rotation; no per-sticker orientation is stored.
fn build_scene(
    scene: &mut SceneNode3d,
    cublets: &[Cublet],
    cublet_size: f32,
) -> Vec<RenderedCublet> {
    let edge = 2.0 * cublet_size;
    cublets
        .iter()
        .map(|cublet| {
            let body = scene
                .add_cube(edge, edge, edge)
                .set_color(Color::new(0.08, 0.08, 0.08, 1.0));

            let stickers = cublet
                .stickers
                .iter()
                .enumerate()
                .filter_map(|(face, color)| color.map(|color| (face, color)))
                .map(|(face, color)| {
                    let normal = glam::Vec3::from_array(FACE_NORMALS[face]);
                    // thin along the normal, sticker-sized across the face
                    let across = glam::Vec3::ONE - normal.abs();
                    let extent = across * (2.0 * STICKER_SIZE) + normal.abs() * STICKER_DEPTH;
                    let [r, g, b] = STICKER_PALETTE[color as usize];
                    let node = scene
                        .add_cube(extent.x, extent.y, extent.z)
                        .set_color(Color::new(r, g, b, 1.0));
                    (node, normal * (cublet_size + STICKER_DEPTH / 2.0))
                })
                .collect();

            RenderedCublet {
                id: cublet.id,
                body,
                stickers,
            }
        })
        .collect()
}

/// Copies the engine's cublet transforms onto the scene nodes.
fn sync_scene(rendered: &mut [RenderedCublet], cublets: &[Cublet]) {
    for piece in rendered {
        let cublet = &cublets[piece.id];
        let rotation = Quat::from_array(glam::Quat::from_mat3(&cublet.rotation).to_array());

        piece
            .body
            .set_position(Vec3::from_array(cublet.world_position().to_array()));
        piece.body.set_rotation(rotation);

        let transform = cublet.transform();
        for (node, local_center) in &mut piece.stickers {
            let center = transform.transform_point3(*local_center);
            node.set_position(Vec3::from_array(center.to_array()));
            node.set_rotation(rotation);
        }
    }
}

/// Maps a key to the face it turns.
fn face_for_key(key: kiss3d::event::Key) -> Option<Face> {
    use kiss3d::event::Key;
    match key {
        Key::R => Some(Face::Right),
        Key::L => Some(Face::Left),
        Key::U => Some(Face::Top),
        Key::D => Some(Face::Bottom),
        Key::F => Some(Face::Front),
        Key::B => Some(Face::Back),
        _ => None,
    }
}

fn window_title(direction: Direction, shuffling: bool) -> String {
    let direction = match direction {
        Direction::Clockwise => "CW",
        Direction::CounterClockwise => "CCW",
    };
    let mode = if shuffling { " - shuffling" } else { "" };
    format!("Twister [{direction}]{mode} - [RLUDFB] turn, [I] invert, [Space] shuffle, [Backspace] reset")
}

/// Opens the interactive viewer and runs until the window closes.
pub fn display(config: EngineConfig) -> Result<(), ConfigError> {
    pollster::block_on(display_async(config))
}

async fn display_async(config: EngineConfig) -> Result<(), ConfigError> {
    let shuffle_seed = config.seed.unwrap_or_else(rand::random);
    let cublet_size = config.cublet_size;
    let mut engine = PuzzleEngine::new(config)?;

    let mut direction = Direction::Clockwise;
    let mut shuffle: Option<MoveSequencer<RandomMoves>> = None;

    let mut window = Window::new(&window_title(direction, false)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(140.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(400.0))
        .set_position(Vec3::new(60.0, 60.0, 60.0));

    let mut rendered = build_scene(&mut scene, engine.cublets(), cublet_size);
    sync_scene(&mut rendered, engine.cublets());

    let mut last_frame = Instant::now();

    loop {
        let mut title_changed = false;
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action != Action::Press {
                    continue;
                }
                match key {
                    Key::I => {
                        direction = direction.reversed();
                        title_changed = true;
                    }
                    Key::Space => {
                        shuffle = Some(MoveSequencer::toggle(
                            shuffle.take(),
                            shuffle_seed.wrapping_add(engine.completed_moves()),
                        ));
                        title_changed = true;
                    }
                    Key::Back => {
                        shuffle = None;
                        engine.reset();
                        title_changed = true;
                    }
                    other => {
                        if let Some(face) = face_for_key(other) {
                            if let Err(e) = engine.request_move(Move::new(face, direction)) {
                                log::info!("{e}");
                            }
                        }
                    }
                }
            }
        }

        let now = Instant::now();
        let dt = (now - last_frame).as_secs_f32().min(MAX_FRAME_SECONDS);
        last_frame = now;

        engine.tick(dt);
        if let Some(sequencer) = shuffle.as_mut() {
            match sequencer.drive(&mut engine) {
                Ok(SequencerStatus::Issued(mv)) => log::debug!("shuffle: {mv}"),
                Ok(SequencerStatus::Waiting) => {}
                Ok(SequencerStatus::Finished) => {
                    shuffle = None;
                    title_changed = true;
                }
                Err(e) => log::warn!("shuffle: {e}"),
            }
        }

        if title_changed {
            window.set_title(&window_title(direction, shuffle.is_some()));
        }
        sync_scene(&mut rendered, engine.cublets());

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }

    Ok(())
}
