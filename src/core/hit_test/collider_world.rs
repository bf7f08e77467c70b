//=========================================================================
// Collider World
//=========================================================================
//
// Reference `HitTest` implementation: a flat list of 2D colliders.
//
// Selection rule: among colliders on a filtered layer that contain the
// point, the lowest depth wins. Equal depths keep insertion order.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::{HitTest, HitTestError, LayerMask, TargetId};

//=== Shape ===============================================================

/// Collision region in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle, edges inclusive.
    Rect { min: Vec2, max: Vec2 },

    /// Circle, boundary inclusive.
    Circle { center: Vec2, radius: f32 },
}

impl Shape {
    /// Returns `true` if `point` lies inside the shape.
    pub fn contains(&self, point: Vec2) -> bool {
        match *self {
            Self::Rect { min, max } => {
                point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
            }
            Self::Circle { center, radius } => center.distance_squared(point) <= radius * radius,
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            Self::Rect { min, max } => {
                *min += delta;
                *max += delta;
            }
            Self::Circle { center, .. } => *center += delta,
        }
    }
}

//=== Collider ============================================================

/// A hit-testable object: shape, anchor, depth and layer.
///
/// The anchor is the object's position (what a drag re-anchors to). For
/// shapes built with [`Collider::rect`] and [`Collider::circle`] it is the
/// shape's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub id: TargetId,
    pub shape: Shape,
    pub anchor: Vec2,
    /// Lower is closer to the viewer.
    pub depth: f32,
    pub layer: u8,
}

impl Collider {
    pub fn rect(id: TargetId, min: Vec2, max: Vec2) -> Self {
        Self {
            id,
            shape: Shape::Rect { min, max },
            anchor: (min + max) * 0.5,
            depth: 0.0,
            layer: 0,
        }
    }

    pub fn circle(id: TargetId, center: Vec2, radius: f32) -> Self {
        Self {
            id,
            shape: Shape::Circle { center, radius },
            anchor: center,
            depth: 0.0,
            layer: 0,
        }
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    /// Places the collider on `layer` (`0..32`).
    pub fn on_layer(mut self, layer: u8) -> Result<Self, HitTestError> {
        if layer >= LayerMask::LAYER_COUNT {
            return Err(HitTestError::InvalidLayer(layer));
        }
        self.layer = layer;
        Ok(self)
    }
}

//=== ColliderWorld =======================================================

/// Flat collection of colliders answering hit-test queries.
#[derive(Debug, Default)]
pub struct ColliderWorld {
    colliders: Vec<Collider>,
}

impl ColliderWorld {
    pub fn new() -> Self {
        Self { colliders: Vec::new() }
    }

    //--- Editing ----------------------------------------------------------

    /// Registers a collider. Ids must be unique.
    pub fn insert(&mut self, collider: Collider) -> Result<(), HitTestError> {
        if self.get(collider.id).is_some() {
            return Err(HitTestError::DuplicateTarget(collider.id));
        }
        debug!("Collider registered: {:?}", collider.id);
        self.colliders.push(collider);
        Ok(())
    }

    /// Removes and returns a collider.
    pub fn remove(&mut self, id: TargetId) -> Option<Collider> {
        let index = self.colliders.iter().position(|c| c.id == id)?;
        Some(self.colliders.remove(index))
    }

    /// Moves a collider (shape and anchor) so its anchor lands on `anchor`.
    ///
    /// Returns `false` if the id is unknown.
    pub fn set_anchor(&mut self, id: TargetId, anchor: Vec2) -> bool {
        match self.get(id) {
            Some(collider) => {
                let delta = anchor - collider.anchor;
                self.translate(id, delta)
            }
            None => false,
        }
    }

    /// Moves a collider (shape and anchor) by `delta`.
    pub fn translate(&mut self, id: TargetId, delta: Vec2) -> bool {
        match self.colliders.iter_mut().find(|c| c.id == id) {
            Some(collider) => {
                collider.shape.translate(delta);
                collider.anchor += delta;
                true
            }
            None => false,
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn get(&self, id: TargetId) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter()
    }
}

//--- Trait Implementations -----------------------------------------------

impl HitTest for ColliderWorld {
    fn hit_test(&self, point: Vec2, filter: LayerMask) -> Option<TargetId> {
        let mut best: Option<&Collider> = None;
        for collider in &self.colliders {
            if !filter.contains(collider.layer) || !collider.shape.contains(point) {
                continue;
            }
            // Strictly lower depth replaces; ties keep the earlier collider
            if best.map_or(true, |b| collider.depth < b.depth) {
                best = Some(collider);
            }
        }
        best.map(|c| c.id)
    }

    fn anchor_position(&self, target: TargetId) -> Option<Vec2> {
        self.get(target).map(|c| c.anchor)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn square(id: u32, x: f32, y: f32, size: f32) -> Collider {
        Collider::rect(TargetId(id), Vec2::new(x, y), Vec2::new(x + size, y + size))
    }

    //=====================================================================
    // Shape Tests
    //=====================================================================

    #[test]
    fn rect_contains_edges() {
        let shape = Shape::Rect { min: Vec2::ZERO, max: Vec2::new(2.0, 2.0) };
        assert!(shape.contains(Vec2::new(0.0, 0.0)));
        assert!(shape.contains(Vec2::new(2.0, 1.0)));
        assert!(!shape.contains(Vec2::new(2.1, 1.0)));
    }

    #[test]
    fn circle_contains_boundary() {
        let shape = Shape::Circle { center: Vec2::ZERO, radius: 1.0 };
        assert!(shape.contains(Vec2::new(1.0, 0.0)));
        assert!(!shape.contains(Vec2::new(0.8, 0.8)));
    }

    //=====================================================================
    // Hit Test Tests
    //=====================================================================

    #[test]
    fn miss_returns_none() {
        let mut world = ColliderWorld::new();
        world.insert(square(1, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(world.hit_test(Vec2::new(5.0, 5.0), LayerMask::ALL), None);
    }

    #[test]
    fn lowest_depth_wins() {
        let mut world = ColliderWorld::new();
        world.insert(square(1, 0.0, 0.0, 10.0).with_depth(5.0)).unwrap();
        world.insert(square(2, 0.0, 0.0, 10.0).with_depth(-1.0)).unwrap();
        world.insert(square(3, 0.0, 0.0, 10.0).with_depth(2.0)).unwrap();

        assert_eq!(
            world.hit_test(Vec2::new(5.0, 5.0), LayerMask::ALL),
            Some(TargetId(2))
        );
    }

    #[test]
    fn equal_depth_keeps_insertion_order() {
        let mut world = ColliderWorld::new();
        world.insert(square(7, 0.0, 0.0, 10.0)).unwrap();
        world.insert(square(8, 0.0, 0.0, 10.0)).unwrap();

        assert_eq!(
            world.hit_test(Vec2::new(1.0, 1.0), LayerMask::ALL),
            Some(TargetId(7))
        );
    }

    #[test]
    fn filter_excludes_layers() {
        let mut world = ColliderWorld::new();
        world
            .insert(square(1, 0.0, 0.0, 10.0).with_depth(0.0).on_layer(1).unwrap())
            .unwrap();
        world
            .insert(square(2, 0.0, 0.0, 10.0).with_depth(1.0).on_layer(2).unwrap())
            .unwrap();

        let point = Vec2::new(5.0, 5.0);
        assert_eq!(world.hit_test(point, LayerMask::layer(2)), Some(TargetId(2)));
        assert_eq!(world.hit_test(point, LayerMask::ALL), Some(TargetId(1)));
        assert_eq!(world.hit_test(point, LayerMask::NONE), None);
    }

    //=====================================================================
    // Editing Tests
    //=====================================================================

    #[test]
    fn duplicate_id_rejected() {
        let mut world = ColliderWorld::new();
        world.insert(square(1, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(
            world.insert(square(1, 5.0, 5.0, 1.0)),
            Err(HitTestError::DuplicateTarget(TargetId(1)))
        );
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn invalid_layer_rejected() {
        assert_eq!(
            square(1, 0.0, 0.0, 1.0).on_layer(32),
            Err(HitTestError::InvalidLayer(32))
        );
    }

    #[test]
    fn set_anchor_moves_shape() {
        let mut world = ColliderWorld::new();
        world.insert(square(1, 0.0, 0.0, 2.0)).unwrap();
        assert_eq!(world.anchor_position(TargetId(1)), Some(Vec2::new(1.0, 1.0)));

        assert!(world.set_anchor(TargetId(1), Vec2::new(11.0, 11.0)));
        assert_eq!(world.anchor_position(TargetId(1)), Some(Vec2::new(11.0, 11.0)));
        assert_eq!(
            world.hit_test(Vec2::new(10.5, 10.5), LayerMask::ALL),
            Some(TargetId(1))
        );
        assert_eq!(world.hit_test(Vec2::new(0.5, 0.5), LayerMask::ALL), None);
    }

    #[test]
    fn remove_and_unknown_ids() {
        let mut world = ColliderWorld::new();
        world.insert(square(1, 0.0, 0.0, 2.0)).unwrap();

        assert!(world.remove(TargetId(1)).is_some());
        assert!(world.is_empty());
        assert!(world.remove(TargetId(1)).is_none());
        assert!(!world.translate(TargetId(1), Vec2::ONE));
        assert_eq!(world.anchor_position(TargetId(1)), None);
    }
}
