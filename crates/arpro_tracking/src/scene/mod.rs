//! Scene side: templates + capability trait, который дёргает reconciler
//!
//! Reconciler не знает ни про рендер, ни про pose — только три вызова:
//! create / set_visible / destroy. Pose instance ведёт runtime через anchor.

use serde::{Deserialize, Serialize};

pub mod ecs;

pub use ecs::{EcsScene, MarkerInstance, PrefabPath, Shown, TrackingIndicator};

/// Visual template для маркера
///
/// `name` совпадает с именем reference image (ordinal, case-sensitive).
/// `prefab` — opaque asset path, резолвит host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerTemplate {
    pub name: String,
    pub prefab: String,
}

impl MarkerTemplate {
    pub fn new(name: impl Into<String>, prefab: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefab: prefab.into(),
        }
    }
}

/// Capability interface scene/rendering runtime
pub trait SceneGraph {
    /// Live transform маркера (instance паррентится к нему)
    type Anchor;
    /// Handle созданного instance (reconciler — единственный владелец)
    type Instance;

    fn create(&mut self, template: &MarkerTemplate, anchor: &Self::Anchor) -> Self::Instance;

    fn set_visible(&mut self, instance: &Self::Instance, visible: bool);

    fn destroy(&mut self, instance: Self::Instance);
}
