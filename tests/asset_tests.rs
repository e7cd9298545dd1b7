// Binary glTF import: a hand-assembled single-triangle file and the
// rejection paths.

use showcase_core::asset::parse_glb;
use showcase_core::AssetError;

const TRIANGLE_JSON: &str = r#"{
  "asset": {"version": "2.0"},
  "buffers": [{"byteLength": 36}],
  "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 36}],
  "accessors": [{
    "bufferView": 0,
    "componentType": 5126,
    "count": 3,
    "type": "VEC3",
    "min": [0.0, 0.0, 0.0],
    "max": [1.0, 1.0, 0.0]
  }],
  "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
  "nodes": [{"mesh": 0, "translation": [5.0, 0.0, 0.0]}],
  "scenes": [{"nodes": [0]}],
  "scene": 0
}"#;

fn pad_to_4(mut bytes: Vec<u8>, fill: u8) -> Vec<u8> {
    while bytes.len() % 4 != 0 {
        bytes.push(fill);
    }
    bytes
}

fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let json = pad_to_4(json.as_bytes().to_vec(), b' ');
    let bin = pad_to_4(bin.to_vec(), 0);
    let total = 12 + 8 + json.len() + if bin.is_empty() { 0 } else { 8 + bin.len() };

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    if !bin.is_empty() {
        out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        out.extend_from_slice(b"BIN\0");
        out.extend_from_slice(&bin);
    }
    out
}

fn triangle_bin() -> Vec<u8> {
    [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        .iter()
        .flat_map(|f| f.to_le_bytes())
        .collect()
}

#[test]
fn single_triangle_is_merged_and_recentered() {
    let bytes = glb(TRIANGLE_JSON, &triangle_bin());
    let asset = parse_glb("tri.glb", &bytes).unwrap();

    assert_eq!(asset.triangle_count(), 1);
    assert_eq!(asset.vertices.len(), 3);
    assert_eq!(asset.indices, vec![0, 1, 2]);

    // The node translation is baked in, then removed by recentering.
    let b = asset.bounds;
    assert!((b.min.x + 0.5).abs() < 1e-6 && (b.max.x - 0.5).abs() < 1e-6);
    assert!((b.min.y + 0.5).abs() < 1e-6 && (b.max.y - 0.5).abs() < 1e-6);
    assert_eq!(b.min.z, 0.0);
    assert_eq!(b.max.z, 0.0);
    assert_eq!(asset.vertices[0].position, [-0.5, -0.5, 0.0]);

    // No normals in the file: flat normals from the winding.
    for v in &asset.vertices {
        assert!((v.normal[2] - 1.0).abs() < 1e-6, "normal {:?}", v.normal);
    }
    // No material: white.
    assert_eq!(asset.vertices[0].color, [1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn external_buffers_are_rejected() {
    let json = TRIANGLE_JSON.replace(
        r#"{"byteLength": 36}"#,
        r#"{"byteLength": 36, "uri": "tri.bin"}"#,
    );
    let err = parse_glb("tri.gltf", json.as_bytes()).unwrap_err();
    assert!(matches!(err, AssetError::ExternalBuffer { .. }), "{err}");
}

#[test]
fn required_extensions_are_rejected() {
    let json = TRIANGLE_JSON.replace(
        r#""scene": 0"#,
        r#""scene": 0, "extensionsUsed": ["KHR_draco_mesh_compression"], "extensionsRequired": ["KHR_draco_mesh_compression"]"#,
    );
    assert!(parse_glb("draco.glb", &glb(&json, &triangle_bin())).is_err());
}

#[test]
fn file_without_geometry_is_empty() {
    let err = parse_glb("empty.glb", br#"{"asset":{"version":"2.0"}}"#).unwrap_err();
    assert!(matches!(err, AssetError::Empty { .. }), "{err}");
}

#[test]
fn garbage_fails_to_parse() {
    let err = parse_glb("junk.glb", b"definitely not a model").unwrap_err();
    assert!(matches!(err, AssetError::Parse { .. }));
    assert!(err.to_string().contains("junk.glb"));
}
