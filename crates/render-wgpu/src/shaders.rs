/// Shared declarations: per-frame globals, the environment map, and its lookup.
const COMMON: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    inv_view_proj: mat4x4<f32>,
    // w is 1.0 once an environment map is bound.
    camera_pos: vec4<f32>,
    // Radiance used while no environment map is bound.
    fallback: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;
@group(0) @binding(1)
var env_map: texture_2d<f32>;
@group(0) @binding(2)
var env_sampler: sampler;

const PI: f32 = 3.14159265;
const TAU: f32 = 6.28318531;

fn equirect_uv(dir: vec3<f32>) -> vec2<f32> {
    let d = normalize(dir);
    let u = atan2(d.z, d.x) / TAU + 0.5;
    let v = asin(clamp(d.y, -1.0, 1.0)) / PI + 0.5;
    return vec2<f32>(u, 1.0 - v);
}

fn sample_env(dir: vec3<f32>) -> vec3<f32> {
    if (globals.camera_pos.w < 0.5) {
        return globals.fallback.rgb;
    }
    return textureSampleLevel(env_map, env_sampler, equirect_uv(dir), 0.0).rgb;
}
"#;

/// Transmissive physical material for the scene meshes.
const MESH: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    // metalness, roughness, transmission, ior
    @location(6) material: vec4<f32>,
    // thickness, unused x3
    @location(7) extra: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) material: vec4<f32>,
    @location(3) extra: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize(world_normal);
    out.material = instance.material;
    out.extra = instance.extra;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let metalness = in.material.x;
    let roughness = in.material.y;
    let transmission = in.material.z;
    let ior = in.material.w;
    let thickness = in.extra.x;

    let n = normalize(in.world_normal);
    let v = normalize(globals.camera_pos.xyz - in.world_pos);
    let blur = roughness * roughness;

    // Rough surfaces drift toward the normal-direction radiance.
    let diffuse = sample_env(n);
    let reflected = mix(sample_env(reflect(-v, n)), diffuse, blur);

    let f0_dielectric = pow((ior - 1.0) / (ior + 1.0), 2.0);
    let f0 = mix(vec3<f32>(f0_dielectric), vec3<f32>(1.0), metalness);
    let cos_theta = clamp(dot(n, v), 0.0, 1.0);
    let fresnel = f0 + (vec3<f32>(1.0) - f0) * pow(1.0 - cos_theta, 5.0);

    // Thin-slab refraction: thickness bends the exit ray from the view ray
    // toward the refracted one. Total internal reflection falls back to the
    // mirror direction.
    var refracted = refract(-v, n, 1.0 / ior);
    if (dot(refracted, refracted) < 1e-6) {
        refracted = reflect(-v, n);
    }
    let exit_dir = normalize(mix(-v, refracted, thickness));
    let transmitted = mix(sample_env(exit_dir), diffuse, blur);

    let body = mix(diffuse, transmitted, transmission)
        * (vec3<f32>(1.0) - fresnel)
        * (1.0 - metalness);
    let color = reflected * fresnel + body;
    return vec4<f32>(color, 1.0);
}
"#;

/// Full-screen equirectangular background.
const BACKGROUND: &str = r#"
struct BackgroundOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) ndc: vec2<f32>,
};

@vertex
fn vs_background(@builtin(vertex_index) index: u32) -> BackgroundOutput {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    let ndc = uv * 2.0 - 1.0;

    var out: BackgroundOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.ndc = ndc;
    return out;
}

@fragment
fn fs_background(in: BackgroundOutput) -> @location(0) vec4<f32> {
    let near = globals.inv_view_proj * vec4<f32>(in.ndc, 0.0, 1.0);
    let far = globals.inv_view_proj * vec4<f32>(in.ndc, 1.0, 1.0);
    let dir = far.xyz / far.w - near.xyz / near.w;
    return vec4<f32>(sample_env(dir), 1.0);
}
"#;

/// WGSL for the scene meshes.
pub fn mesh_shader() -> String {
    format!("{COMMON}\n{MESH}")
}

/// WGSL for the background pass.
pub fn background_shader() -> String {
    format!("{COMMON}\n{BACKGROUND}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shaders_carry_entry_points() {
        let mesh = mesh_shader();
        assert!(mesh.contains("fn vs_main") && mesh.contains("fn fs_main"));
        let bg = background_shader();
        assert!(bg.contains("fn vs_background") && bg.contains("fn fs_background"));
        assert!(bg.contains("struct Globals"));
    }
}
