//! Mounted render nodes and their world-space bounds.

use crate::framing::{ray_aabb, Aabb};
use crate::node::RenderNode;
use crate::passes::LayerMask;
use crate::registry::{Facet, ModelRegistry};
use crate::rendered::{NodeHandle, RenderedObjectRegistry};
use crate::selection::BoundsLookup;
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};

#[derive(Clone, Debug)]
struct SceneItem {
    name: String,
    base: Mat4,
    local_bounds: Option<Aabb>,
    node: Option<RenderNode>,
}

/// One slot per registry entry, in registry order. A slot is mounted when
/// its asset has loaded and it belongs to the current facet.
#[derive(Clone, Debug)]
pub struct Scene {
    items: Vec<SceneItem>,
    index: FnvHashMap<String, usize>,
    rendered: RenderedObjectRegistry,
}

impl Scene {
    pub fn new(registry: &ModelRegistry) -> Self {
        let items = registry
            .models()
            .iter()
            .map(|m| SceneItem {
                name: m.name.clone(),
                base: m.transform(m.scale),
                local_bounds: None,
                node: None,
            })
            .collect::<Vec<_>>();
        let index = items
            .iter()
            .enumerate()
            .map(|(i, it)| (it.name.clone(), i))
            .collect();
        Self {
            items,
            index,
            rendered: RenderedObjectRegistry::default(),
        }
    }

    /// Record the local bounds of a freshly loaded asset.
    pub fn attach_bounds(&mut self, index: usize, bounds: Aabb) {
        if let Some(item) = self.items.get_mut(index) {
            item.local_bounds = Some(bounds);
        }
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.items
            .get(index)
            .is_some_and(|it| it.local_bounds.is_some())
    }

    /// Mount loaded items of `facet`, unmount everything else.
    pub fn sync_mounts(&mut self, registry: &ModelRegistry, facet: Facet) {
        for (i, config) in registry.models().iter().enumerate() {
            let Some(item) = self.items.get_mut(i) else {
                continue;
            };
            let want = item.local_bounds.is_some() && config.facet() == facet;
            match (want, item.node.is_some()) {
                (true, false) => {
                    item.node = Some(RenderNode::new(config));
                    self.rendered.register(&item.name, NodeHandle(i));
                    log::debug!("[scene] mounted {}", item.name);
                }
                (false, true) => {
                    item.node = None;
                    self.rendered.unregister(&item.name, Some(NodeHandle(i)));
                    log::debug!("[scene] unmounted {}", item.name);
                }
                _ => {}
            }
        }
    }

    pub fn update(&mut self, active: Option<&str>, dt_sec: f32) {
        for node in self.items.iter_mut().filter_map(|it| it.node.as_mut()) {
            node.update(active, dt_sec);
        }
    }

    /// Mounted nodes with their registry index, in registry order.
    pub fn mounted(&self) -> impl Iterator<Item = (usize, &RenderNode)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(i, it)| it.node.as_ref().map(|n| (i, n)))
    }

    pub fn node(&self, name: &str) -> Option<&RenderNode> {
        let NodeHandle(i) = self.rendered.get(name)?;
        self.items.get(i)?.node.as_ref()
    }

    #[inline]
    pub fn rendered(&self) -> &RenderedObjectRegistry {
        &self.rendered
    }

    /// World bounds of a mounted node, using its current transform.
    pub fn node_world_bounds(&self, index: usize) -> Option<Aabb> {
        let item = self.items.get(index)?;
        let node = item.node.as_ref()?;
        Some(item.local_bounds?.transformed(&node.world_matrix()))
    }

    /// Nearest hit-testable node on `layers` along the ray.
    pub fn raycast(&self, origin: Vec3, dir: Vec3, layers: LayerMask) -> Option<(f32, &str)> {
        self.mounted()
            .filter(|(_, n)| n.hit_testable() && layers.intersects(n.layer()))
            .filter_map(|(i, n)| {
                let bounds = self.node_world_bounds(i)?;
                ray_aabb(origin, dir, &bounds).map(|t| (t, n.name.as_str()))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }
}

impl BoundsLookup for Scene {
    /// The rendered node's bounds when mounted, otherwise the loaded asset
    /// placed with its registry transform.
    fn live_bounds(&self, name: &str) -> Option<Aabb> {
        if let Some(NodeHandle(i)) = self.rendered.get(name) {
            if let Some(b) = self.node_world_bounds(i) {
                return Some(b);
            }
        }
        let item = self.items.get(*self.index.get(name)?)?;
        Some(item.local_bounds?.transformed(&item.base))
    }
}
