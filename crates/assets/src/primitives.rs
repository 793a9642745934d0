use glam::Vec3;

use crate::AssetError;
use crate::buffer::MeshData;
use crate::model::{Material, Model};

const NOSE: Vec3 = Vec3::new(0.0, 0.0, 300.0);
const WING_L: Vec3 = Vec3::new(-220.0, 0.0, -120.0);
const WING_R: Vec3 = Vec3::new(220.0, 0.0, -120.0);
const DORSAL: Vec3 = Vec3::new(0.0, 60.0, -90.0);
const KEEL: Vec3 = Vec3::new(0.0, -40.0, -90.0);
const TAIL: Vec3 = Vec3::new(0.0, 0.0, -160.0);

#[rustfmt::skip]
const HULL_FACES: [[Vec3; 3]; 8] = [
    [NOSE, WING_L, DORSAL], [NOSE, DORSAL, WING_R],
    [WING_L, TAIL, DORSAL], [DORSAL, TAIL, WING_R],
    [NOSE, KEEL, WING_L],   [NOSE, WING_R, KEEL],
    [WING_L, KEEL, TAIL],   [KEEL, WING_R, TAIL],
];

/// Low-poly dart hull, nose along +Z, in model units (drawn at a small scale).
///
/// Flat shaded: every face gets its own three vertices with the face normal,
/// wound counter-clockwise seen from outside. Texture coordinates are a
/// top-down planar projection.
pub fn ship_hull() -> MeshData {
    let mut mesh = MeshData::new("hull");
    let centre = HULL_FACES
        .iter()
        .flatten()
        .fold(Vec3::ZERO, |acc, p| acc + *p)
        / (HULL_FACES.len() * 3) as f32;

    for [a, b, c] in HULL_FACES {
        let mut n = (b - a).cross(c - a).normalize();
        let (b, c) = if n.dot((a + b + c) / 3.0 - centre) < 0.0 {
            n = -n;
            (c, b)
        } else {
            (b, c)
        };
        for p in [a, b, c] {
            mesh.indices.push(mesh.positions.len() as u32);
            mesh.positions.push(p.to_array());
            mesh.normals.push(n.to_array());
            mesh.texcoords[0].push([(p.x + 220.0) / 440.0, (p.z + 160.0) / 460.0]);
        }
    }
    mesh
}

/// Unlit exhaust plate behind the hull: positions only.
pub fn engine_glow() -> MeshData {
    let z = TAIL.z - 2.0;
    MeshData {
        name: "engine_glow".into(),
        positions: vec![
            [-30.0, -12.0, z],
            [30.0, -12.0, z],
            [30.0, 18.0, z],
            [-30.0, 18.0, z],
        ],
        indices: vec![0, 2, 1, 0, 3, 2],
        ..Default::default()
    }
}

/// The built-in ship: white hull plus orange engine plate.
pub fn ship_model() -> Result<Model, AssetError> {
    Model::build(
        "ship",
        vec![
            (ship_hull(), Some(Material::default())),
            (
                engine_glow(),
                Some(Material {
                    name: "exhaust".into(),
                    base_color: [1.0, 0.55, 0.1, 1.0],
                }),
            ),
        ],
    )
}
