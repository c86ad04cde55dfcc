use std::ops::RangeInclusive;

/// Physically based material with transmission.
///
/// Every field is constrained to the range reported by [`MaterialParam::range`].
/// Meshes never own one of these; they hold a handle into the scene so that a
/// single edit is seen by every mesh using it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalMaterial {
    pub metalness: f32,
    pub roughness: f32,
    pub transmission: f32,
    pub ior: f32,
    pub thickness: f32,
}

impl Default for PhysicalMaterial {
    /// Engine defaults: opaque dielectric with the usual glass IOR.
    fn default() -> Self {
        Self {
            metalness: 0.0,
            roughness: 1.0,
            transmission: 0.0,
            ior: 1.5,
            thickness: 0.0,
        }
    }
}

impl PhysicalMaterial {
    /// Clear, fully transmissive glass used by the demo scene.
    pub fn clear_glass() -> Self {
        Self {
            metalness: 0.0,
            roughness: 0.0,
            transmission: 1.0,
            ior: 2.5,
            thickness: 0.5,
        }
    }

    pub fn get(&self, param: MaterialParam) -> f32 {
        match param {
            MaterialParam::Metalness => self.metalness,
            MaterialParam::Roughness => self.roughness,
            MaterialParam::Transmission => self.transmission,
            MaterialParam::Ior => self.ior,
            MaterialParam::Thickness => self.thickness,
        }
    }

    /// Set a parameter, clamped to its documented range. Returns the stored value.
    pub fn set(&mut self, param: MaterialParam, value: f32) -> f32 {
        let clamped = param.clamp(value);
        *self.field_mut(param) = clamped;
        clamped
    }

    /// Direct mutable access for UI bindings that clamp on their own.
    pub fn field_mut(&mut self, param: MaterialParam) -> &mut f32 {
        match param {
            MaterialParam::Metalness => &mut self.metalness,
            MaterialParam::Roughness => &mut self.roughness,
            MaterialParam::Transmission => &mut self.transmission,
            MaterialParam::Ior => &mut self.ior,
            MaterialParam::Thickness => &mut self.thickness,
        }
    }
}

/// The adjustable scalar parameters of a [`PhysicalMaterial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialParam {
    Metalness,
    Roughness,
    Transmission,
    Ior,
    Thickness,
}

impl MaterialParam {
    /// All parameters in panel order.
    pub const ALL: [MaterialParam; 5] = [
        MaterialParam::Metalness,
        MaterialParam::Roughness,
        MaterialParam::Transmission,
        MaterialParam::Ior,
        MaterialParam::Thickness,
    ];

    /// Slider granularity shared by every parameter.
    pub const STEP: f32 = 0.0001;

    pub fn label(self) -> &'static str {
        match self {
            MaterialParam::Metalness => "Metalness",
            MaterialParam::Roughness => "Roughness",
            MaterialParam::Transmission => "Transmission",
            MaterialParam::Ior => "Index of Refraction",
            MaterialParam::Thickness => "Thickness",
        }
    }

    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            MaterialParam::Ior => 1.0..=10.0,
            _ => 0.0..=1.0,
        }
    }

    pub fn clamp(self, value: f32) -> f32 {
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_glass_values() {
        let m = PhysicalMaterial::clear_glass();
        assert_eq!(m.metalness, 0.0);
        assert_eq!(m.roughness, 0.0);
        assert_eq!(m.transmission, 1.0);
        assert_eq!(m.ior, 2.5);
        assert_eq!(m.thickness, 0.5);
    }

    #[test]
    fn set_clamps_to_range() {
        let mut m = PhysicalMaterial::clear_glass();
        assert_eq!(m.set(MaterialParam::Metalness, 1.7), 1.0);
        assert_eq!(m.set(MaterialParam::Ior, 0.2), 1.0);
        assert_eq!(m.set(MaterialParam::Ior, 12.0), 10.0);
        assert_eq!(m.set(MaterialParam::Thickness, -3.0), 0.0);
        assert_eq!(m.metalness, 1.0);
        assert_eq!(m.ior, 10.0);
    }

    #[test]
    fn get_and_field_mut_agree() {
        let mut m = PhysicalMaterial::default();
        for param in MaterialParam::ALL {
            *m.field_mut(param) = 0.25 + param as u8 as f32 * 0.1;
            assert_eq!(m.get(param), 0.25 + param as u8 as f32 * 0.1);
        }
    }

    #[test]
    fn panel_table() {
        let labels: Vec<_> = MaterialParam::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(
            labels,
            [
                "Metalness",
                "Roughness",
                "Transmission",
                "Index of Refraction",
                "Thickness"
            ]
        );
        assert_eq!(MaterialParam::Ior.range(), 1.0..=10.0);
        assert_eq!(MaterialParam::Roughness.range(), 0.0..=1.0);
    }
}
