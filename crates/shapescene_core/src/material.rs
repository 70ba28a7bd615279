//! Per-instance materials derived from surface styles.

use serde::{Deserialize, Serialize};
use shapescene_math::Vec4;

use crate::context::{ShapeInstance, StyleLabel};
use crate::style::StyleRecord;

/// How a renderer should treat the alpha channel of the base colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlphaMode {
    /// Alpha is ignored; the surface is fully opaque
    #[default]
    Opaque,

    /// Alpha is used to composite the surface over what lies behind it
    Blend,
}

/// A render material with metallic-roughness shading.
///
/// A material without a base colour leaves the colour to the renderer's
/// default shading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Material name (from the surface style, when named)
    pub name: Option<String>,

    /// Base colour (RGBA); `None` means renderer default
    pub base_color: Option<Vec4>,

    pub alpha_mode: AlphaMode,

    /// Always true for building geometry, whose faces have no reliable orientation
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            base_color: None,
            alpha_mode: AlphaMode::Opaque,
            double_sided: true,
        }
    }
}

impl Material {
    /// Create a named material with an explicit base colour.
    pub fn with_color(name: Option<String>, base_color: Vec4) -> Self {
        Self {
            name,
            base_color: Some(base_color),
            alpha_mode: alpha_mode_for(base_color.w),
            double_sided: true,
        }
    }

    /// Alpha of the base colour, 1.0 when unset.
    pub fn alpha(&self) -> f32 {
        self.base_color.map_or(1.0, |c| c.w)
    }

    pub fn is_default(&self) -> bool {
        self.base_color.is_none()
    }
}

/// Result of resolving an instance's material.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialResolution {
    pub material: Material,

    /// The instance referenced a style that could not be used
    pub missing_style: Option<StyleLabel>,
}

/// Blend only strictly between fully transparent and fully opaque.
fn alpha_mode_for(alpha: f32) -> AlphaMode {
    if alpha > 0.0 && alpha < 1.0 {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    }
}

/// Transparency to alpha, where zero (or unset) means "not applicable" and
/// yields a fully opaque surface.
pub fn alpha_from_transparency(transparency: Option<f64>) -> f32 {
    match transparency {
        None => 1.0,
        Some(t) if t == 0.0 => 1.0,
        Some(t) => t as f32,
    }
}

/// Build the material for a style record, if it has a rendering entry.
pub fn material_from_style(record: &StyleRecord) -> Option<Material> {
    let rendering = record.rendering()?;
    let alpha = alpha_from_transparency(rendering.transparency);
    let colour = rendering.surface_colour;

    let base_color = Vec4::new(
        colour.red as f32,
        colour.green as f32,
        colour.blue as f32,
        alpha,
    );

    Some(Material::with_color(record.name.clone(), base_color))
}

/// Resolve the material for `instance`, looking its style up through `lookup`.
///
/// Never fails: an instance without a style gets the default material, and a
/// style that cannot be found or has no rendering entry degrades to the
/// default material with `missing_style` set.
pub fn resolve<'a, F>(instance: &ShapeInstance, lookup: F) -> MaterialResolution
where
    F: FnOnce(StyleLabel) -> Option<&'a StyleRecord>,
{
    resolve_with(instance, |label| lookup(label).and_then(material_from_style))
}

/// Like [`resolve`], but with the style-to-material step supplied by the
/// caller so it can be memoised.
pub fn resolve_with<F>(instance: &ShapeInstance, material_for: F) -> MaterialResolution
where
    F: FnOnce(StyleLabel) -> Option<Material>,
{
    let Some(label) = instance.style else {
        return MaterialResolution {
            material: Material::default(),
            missing_style: None,
        };
    };

    match material_for(label) {
        Some(material) => MaterialResolution {
            material,
            missing_style: None,
        },
        None => MaterialResolution {
            material: Material::default(),
            missing_style: Some(label),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{GeometryLabel, InstanceLabel};
    use crate::style::{Rgb, SurfaceStyleElement};

    fn styled_instance() -> ShapeInstance {
        ShapeInstance::new(InstanceLabel(1), GeometryLabel(2)).with_style(StyleLabel(3))
    }

    fn style(transparency: Option<f64>) -> StyleRecord {
        StyleRecord::new(StyleLabel(3))
            .with_name("Concrete")
            .with_rendering(Rgb::new(0.8, 0.6, 0.4), transparency)
    }

    #[test]
    fn test_zero_transparency_is_opaque() {
        let record = style(Some(0.0));
        let resolved = resolve(&styled_instance(), |_| Some(&record));

        assert_eq!(resolved.material.alpha(), 1.0);
        assert_eq!(resolved.material.alpha_mode, AlphaMode::Opaque);
        assert!(resolved.missing_style.is_none());
    }

    #[test]
    fn test_partial_transparency_blends() {
        let record = style(Some(0.4));
        let resolved = resolve(&styled_instance(), |_| Some(&record));

        assert!((resolved.material.alpha() - 0.4).abs() < 1e-6);
        assert_eq!(resolved.material.alpha_mode, AlphaMode::Blend);
    }

    #[test]
    fn test_full_transparency_value_is_opaque() {
        let record = style(Some(1.0));
        let resolved = resolve(&styled_instance(), |_| Some(&record));

        assert_eq!(resolved.material.alpha(), 1.0);
        assert_eq!(resolved.material.alpha_mode, AlphaMode::Opaque);
    }

    #[test]
    fn test_base_color_channels() {
        let record = style(Some(0.25));
        let resolved = resolve(&styled_instance(), |_| Some(&record));
        let color = resolved.material.base_color.unwrap();

        assert!((color - Vec4::new(0.8, 0.6, 0.4, 0.25)).length() < 1e-6);
        assert_eq!(resolved.material.name.as_deref(), Some("Concrete"));
        assert!(resolved.material.double_sided);
    }

    #[test]
    fn test_unset_transparency_is_opaque() {
        let record = style(None);
        let resolved = resolve(&styled_instance(), |_| Some(&record));

        assert_eq!(resolved.material.alpha(), 1.0);
        assert_eq!(resolved.material.alpha_mode, AlphaMode::Opaque);
    }

    #[test]
    fn test_unclamped_channels_pass_through() {
        let record = StyleRecord::new(StyleLabel(3)).with_rendering(Rgb::new(1.5, -0.1, 0.0), None);
        let material = material_from_style(&record).unwrap();

        assert_eq!(material.base_color, Some(Vec4::new(1.5, -0.1, 0.0, 1.0)));
    }

    #[test]
    fn test_no_style_reference_gives_default() {
        let instance = ShapeInstance::new(InstanceLabel(1), GeometryLabel(2));
        let resolved = resolve(&instance, |_| panic!("lookup must not be called"));

        assert_eq!(resolved.material, Material::default());
        assert!(resolved.material.is_default());
        assert!(resolved.missing_style.is_none());
    }

    #[test]
    fn test_unknown_style_gives_default_and_reports() {
        let resolved = resolve(&styled_instance(), |_| None);

        assert!(resolved.material.is_default());
        assert_eq!(resolved.missing_style, Some(StyleLabel(3)));
    }

    #[test]
    fn test_style_without_rendering_gives_default() {
        let record = StyleRecord::new(StyleLabel(3))
            .with_element(SurfaceStyleElement::Other("lighting".into()));
        let resolved = resolve(&styled_instance(), |_| Some(&record));

        assert!(resolved.material.is_default());
        assert_eq!(resolved.missing_style, Some(StyleLabel(3)));
    }
}
