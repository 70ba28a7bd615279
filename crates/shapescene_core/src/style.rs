//! Surface style records attached to shape instances.

use serde::{Deserialize, Serialize};

use crate::context::StyleLabel;

/// Linear RGB colour as stored in the model (not clamped).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Rgb {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }
}

/// The rendering entry of a surface style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceStyleRendering {
    pub surface_colour: Rgb,

    /// Transparency ratio; `None` when the model leaves it unset
    pub transparency: Option<f64>,
}

/// One element of a surface style's style list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SurfaceStyleElement {
    Rendering(SurfaceStyleRendering),

    /// Lighting, refraction, textures and anything else not used for colour
    Other(String),
}

/// A surface style looked up through an instance's style reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleRecord {
    pub label: StyleLabel,
    pub name: Option<String>,
    pub styles: Vec<SurfaceStyleElement>,
}

impl StyleRecord {
    pub fn new(label: StyleLabel) -> Self {
        Self {
            label,
            name: None,
            styles: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a rendering entry with the given colour and transparency.
    pub fn with_rendering(mut self, colour: Rgb, transparency: Option<f64>) -> Self {
        self.styles
            .push(SurfaceStyleElement::Rendering(SurfaceStyleRendering {
                surface_colour: colour,
                transparency,
            }));
        self
    }

    pub fn with_element(mut self, element: SurfaceStyleElement) -> Self {
        self.styles.push(element);
        self
    }

    /// First rendering entry in the style list.
    pub fn rendering(&self) -> Option<&SurfaceStyleRendering> {
        self.styles.iter().find_map(|s| match s {
            SurfaceStyleElement::Rendering(r) => Some(r),
            SurfaceStyleElement::Other(_) => None,
        })
    }
}
