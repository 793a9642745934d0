/// WGSL shader for meshes that carry normals: one directional light.
pub const LIT_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
};

struct PerDraw {
    model: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var<uniform> per_draw: PerDraw;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = per_draw.model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (per_draw.model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let light_dir = normalize(vec3<f32>(0.3, 1.0, 0.5));
    let ambient = 0.3;
    let diffuse = abs(dot(in.world_normal, light_dir));
    let lighting = ambient + diffuse * 0.7;
    return vec4<f32>(per_draw.color.rgb * lighting, per_draw.color.a);
}
"#;

/// WGSL shader for position-only geometry: ground lines and unlit meshes.
pub const FLAT_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
};

struct PerDraw {
    model: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var<uniform> per_draw: PerDraw;

@vertex
fn vs_flat(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return globals.view_proj * per_draw.model * vec4<f32>(position, 1.0);
}

@fragment
fn fs_flat() -> @location(0) vec4<f32> {
    return per_draw.color;
}
"#;
