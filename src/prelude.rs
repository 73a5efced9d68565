pub use crate::{
    error::{Error, MalformedPathError, PathFault},
    frame::FitMode,
    geometry::{Cubic, Frame, Point, Transform},
    nest::Nested,
    options::ConvertOptions,
    path::{arguments, letter, PathData},
    scale::calc_frame_scale,
    shape::{ShapeGroup, ShapeNode},
    subpath::{CurvePoint, Subpath},
    util::*,
};
