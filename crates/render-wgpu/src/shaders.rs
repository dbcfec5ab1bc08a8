/// WGSL shader for flat-colored lines and triangles.
pub const COLOR_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct ColorVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct ColorOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_color(vertex: ColorVertex) -> ColorOutput {
    var out: ColorOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_color(in: ColorOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
