/// How a texture is projected onto directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureMapping {
    /// Plain UV-mapped texture.
    #[default]
    Uv,
    /// Full sphere stored as longitude/latitude, sampled by reflection direction.
    EquirectangularReflection,
}

/// Linear-light RGBA float image used for background and image-based lighting.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentMap {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, top row first.
    pub pixels: Vec<f32>,
    pub mapping: TextureMapping,
}

impl EnvironmentMap {
    pub fn new(width: u32, height: u32, pixels: Vec<f32>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels,
            mapping: TextureMapping::Uv,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<f32>()
    }
}
