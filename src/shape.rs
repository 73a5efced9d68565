use std::fmt;
use crate::prelude::*;
use crate::frame::Placement;

#[cfg(feature="serde")]
use serde::{Serialize, Deserialize};

/// One outline of a shape group, with the outlines nested inside it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature="serde", derive(Serialize, Deserialize))]
pub struct ShapeNode {
    pub frame: Frame,
    pub outline: Subpath,
    pub children: Vec<ShapeNode>,
}
impl ShapeNode {
    /// The outline in the unit square of this node's frame.
    pub fn relative_outline(&self) -> Subpath {
        self.outline.relative_to(&self.frame)
    }

    pub fn transformed(&self, placement: &Placement) -> ShapeNode {
        self.map_points(&|p| placement.apply(p))
    }

    /// Moves every point and handle through `f`; frames follow the moved outlines.
    pub fn map_points<F: Fn(Point) -> Point>(&self, f: &F) -> ShapeNode {
        let outline = self.outline.map(f);
        ShapeNode {
            frame: outline.bounds().unwrap_or_default(),
            outline,
            children: self.children.iter().map(|c| c.map_points(f)).collect(),
        }
    }

    /// This node and all nodes below it, parents first.
    pub fn descendants(&self) -> Vec<&ShapeNode> {
        let mut nodes = vec![self];
        for child in &self.children {
            nodes.extend(child.descendants());
        }
        nodes
    }
}
impl fmt::Display for ShapeNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.outline)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        Ok(())
    }
}

/// The converted form of one path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature="serde", derive(Serialize, Deserialize))]
pub struct ShapeGroup {
    pub frame: Frame,
    pub shapes: Vec<ShapeNode>,
}
impl ShapeGroup {
    pub fn transformed(&self, placement: &Placement) -> ShapeGroup {
        ShapeGroup {
            frame: placement.apply_frame(&self.frame),
            shapes: self.shapes.iter().map(|s| s.transformed(placement)).collect(),
        }
    }

    /// Applies an affine transform; the frame becomes the bounds of the moved nodes.
    pub fn with_transform(&self, transform: &Transform) -> ShapeGroup {
        let shapes: Vec<ShapeNode> = self.shapes.iter()
            .map(|s| s.map_points(&|p| transform.apply(p)))
            .collect();
        let frame = max_bounds(shapes.iter().flat_map(|s| s.descendants()).map(|n| n.frame))
            .unwrap_or_default();
        ShapeGroup { frame, shapes }
    }

    /// Scales the group uniformly to fit inside `target`, centered.
    ///
    /// The frame of the result is the box the content now occupies.
    pub fn fit_into(&self, target: &Frame) -> ShapeGroup {
        let placement = Placement::fit(&self.frame, target, FitMode::Contain);
        debug!("fit {:?} into {:?}: scale {:?}", self.frame, target, placement.scale());
        self.transformed(&placement)
    }

    /// Every node of every shape, parents first.
    pub fn nodes(&self) -> Vec<&ShapeNode> {
        self.shapes.iter().flat_map(|s| s.descendants()).collect()
    }
}
impl fmt::Display for ShapeGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, shape) in self.shapes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", shape)?;
        }
        Ok(())
    }
}
