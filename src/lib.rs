//! Turns SVG path data into the shape groups of a vector design file.
//!
//! A path string goes through tokenizing, normalizing every segment to a
//! cubic, grouping into subpaths, nesting holes into their outer shapes and
//! finally placement into a target frame.

#[macro_use] extern crate log;

#[macro_use]
mod util;

pub mod prelude;

mod error;
mod options;

pub mod arc;
pub mod document;
pub mod frame;
pub mod geometry;
pub mod nest;
pub mod normalize;
pub mod path;
pub mod scale;
pub mod shape;
pub mod subpath;

pub use prelude::*;

use crate::frame::{place, intrinsic_frame, Placement};

fn resolve_path(d: &str, options: &ConvertOptions) -> Result<(Vec<Nested>, Frame), MalformedPathError> {
    let fail = |fault: PathFault| MalformedPathError::new(d, fault);
    let data = PathData::new(d).map_err(fail)?;
    let subpaths = timed!("subpaths", {
        subpath::build_subpaths(data, options).map_err(fail)?
    });
    let intrinsic = intrinsic_frame(subpaths.iter());
    debug!("{} subpaths, intrinsic frame {:?}", subpaths.len(), intrinsic);
    let forest = timed!("nesting", {
        nest::resolve(subpaths, options.tolerance)
    });
    Ok((forest, intrinsic))
}

/// Converts path data without placing it: points keep their source
/// coordinates and the frame is the bounding box of the geometry.
pub fn path_to_shape_group(d: &str) -> Result<ShapeGroup, MalformedPathError> {
    path_to_shape_group_with(d, &ConvertOptions::default())
}

pub fn path_to_shape_group_with(d: &str, options: &ConvertOptions) -> Result<ShapeGroup, MalformedPathError> {
    let (forest, intrinsic) = resolve_path(d, options)?;
    Ok(ShapeGroup {
        frame: intrinsic,
        shapes: place(forest, &Placement::identity()),
    })
}

/// Converts path data and places it in `target`.
///
/// The group frame is `target` itself; every point, handle and node frame is
/// expressed in the same space.
pub fn convert(d: &str, target: &Frame) -> Result<ShapeGroup, MalformedPathError> {
    convert_with(d, target, &ConvertOptions::default())
}

pub fn convert_with(d: &str, target: &Frame, options: &ConvertOptions) -> Result<ShapeGroup, MalformedPathError> {
    let (forest, intrinsic) = resolve_path(d, options)?;
    let placement = Placement::fit(&intrinsic, target, options.fit);
    debug!("placing {:?} in {:?}: scale {:?}", intrinsic, target, placement.scale());
    let shapes = timed!("placement", {
        place(forest, &placement)
    });
    Ok(ShapeGroup { frame: *target, shapes })
}
