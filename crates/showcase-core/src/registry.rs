//! Static description of every showcased item.
//!
//! The registry is authored as JSON next to the page and validated once at
//! startup; nothing in it changes afterwards.

use crate::constants::DEFAULT_FOCUS_SCALE;
use crate::error::RegistryError;
use fnv::FnvHashMap;
use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::Deserialize;

/// Which storyline a model belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    #[default]
    Default,
    Alternate,
}

/// Depth classification; anything behind the foreground fades while another
/// item is focused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthTier {
    Background,
    Midground,
    #[default]
    Foreground,
}

impl DepthTier {
    #[inline]
    pub fn fades(self) -> bool {
        !matches!(self, DepthTier::Foreground)
    }
}

/// Whether the portal waits for every default-facet item to be discovered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalGate {
    #[default]
    Strict,
    Open,
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Clone, Debug, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub focus_scale: Option<f32>,
    #[serde(default)]
    pub tier: Option<DepthTier>,
    #[serde(default)]
    pub brightness: Option<f32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub facet: Option<Facet>,
}

impl ModelConfig {
    /// Convenience constructor with every optional field unset.
    pub fn new(name: impl Into<String>, path: impl Into<String>, position: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            position,
            rotation: [0.0; 3],
            scale: 1.0,
            focus_scale: None,
            tier: None,
            brightness: None,
            title: None,
            link: None,
            facet: None,
        }
    }

    #[inline]
    pub fn focus_scale(&self) -> f32 {
        self.focus_scale.unwrap_or(DEFAULT_FOCUS_SCALE)
    }

    #[inline]
    pub fn tier(&self) -> DepthTier {
        self.tier.unwrap_or_default()
    }

    #[inline]
    pub fn brightness(&self) -> f32 {
        self.brightness.unwrap_or(1.0)
    }

    #[inline]
    pub fn facet(&self) -> Facet {
        self.facet.unwrap_or_default()
    }

    /// Title shown next to the focused item; falls back to the name.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Base transform at the given uniform scale.
    pub fn transform(&self, scale: f32) -> Mat4 {
        let [rx, ry, rz] = self.rotation;
        Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
            Vec3::from_array(self.position),
        )
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    portal: Option<String>,
    #[serde(default)]
    portal_gate: PortalGate,
    models: Vec<ModelConfig>,
}

/// Ordered, validated list of models with a name index.
#[derive(Clone, Debug)]
pub struct ModelRegistry {
    models: Vec<ModelConfig>,
    index: FnvHashMap<String, usize>,
    portal: Option<usize>,
    portal_gate: PortalGate,
}

impl ModelRegistry {
    pub fn new(
        models: Vec<ModelConfig>,
        portal: Option<&str>,
        portal_gate: PortalGate,
    ) -> Result<Self, RegistryError> {
        if models.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut index = FnvHashMap::default();
        for (i, m) in models.iter().enumerate() {
            if m.name.trim().is_empty() {
                return Err(RegistryError::EmptyName(i));
            }
            if !(m.scale.is_finite() && m.scale > 0.0) {
                return Err(RegistryError::InvalidScale {
                    name: m.name.clone(),
                    scale: m.scale,
                });
            }
            if index.insert(m.name.clone(), i).is_some() {
                return Err(RegistryError::DuplicateName(m.name.clone()));
            }
        }
        let portal = match portal {
            Some(name) => {
                let i = *index
                    .get(name)
                    .ok_or_else(|| RegistryError::UnknownPortal(name.to_string()))?;
                if models[i].facet() != Facet::Default {
                    return Err(RegistryError::PortalOutsideDefaultFacet(name.to_string()));
                }
                Some(i)
            }
            None => None,
        };
        Ok(Self {
            models,
            index,
            portal,
            portal_gate,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = serde_json::from_str(text)?;
        Self::new(file.models, file.portal.as_deref(), file.portal_gate)
    }

    #[inline]
    pub fn models(&self) -> &[ModelConfig] {
        &self.models
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&ModelConfig> {
        self.index_of(name).map(|i| &self.models[i])
    }

    pub fn portal_name(&self) -> Option<&str> {
        self.portal.map(|i| self.models[i].name.as_str())
    }

    #[inline]
    pub fn portal_gate(&self) -> PortalGate {
        self.portal_gate
    }

    pub fn is_portal(&self, name: &str) -> bool {
        self.portal_name() == Some(name)
    }

    /// Whether `name` is rendered and interactable while `facet` is active.
    pub fn in_facet(&self, name: &str, facet: Facet) -> bool {
        self.get(name).is_some_and(|m| m.facet() == facet)
    }

    /// Ordered names of a facet with the portal left out; this is the list
    /// navigation and the discovery gates work over.
    pub fn facet_names(&self, facet: Facet) -> Vec<&str> {
        self.models
            .iter()
            .enumerate()
            .filter(|(i, m)| m.facet() == facet && Some(*i) != self.portal)
            .map(|(_, m)| m.name.as_str())
            .collect()
    }
}
