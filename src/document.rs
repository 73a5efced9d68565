//! Whole `<svg>` documents: every rendered `<path>` becomes one shape group.

use roxmltree::{Document, Node, NodeType};
use crate::prelude::*;
use crate::frame::{Placement, intrinsic_frame};

/// A `<path>` with the transform it is drawn under.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    pub data: String,
    /// own `transform` composed with those of all ancestors
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SvgLayer {
    /// `viewBox`, or `0 0 width height` when only a size is given
    pub view_box: Option<Frame>,
    /// every rendered path in document order
    pub paths: Vec<SvgPath>,
}

impl SvgLayer {
    pub fn parse(text: &str) -> Result<SvgLayer, Error> {
        let doc = timed!("parse xml", {
            Document::parse(text)?
        });
        let root = doc.root_element();
        if !root.has_tag_name("svg") {
            return Err(Error::NotSvg);
        }
        let view_box = root.attribute("viewBox").map(view_box).transpose()?;
        let width = root.attribute("width").map(length).transpose()?;
        let height = root.attribute("height").map(length).transpose()?;
        let view_box = match (view_box, width, height) {
            (Some(r), _, _) => Some(r),
            (None, Some(w), Some(h)) => Some(Frame::new(0., 0., w, h)),
            _ => None
        };

        let mut paths = Vec::new();
        collect_paths(root, Transform::identity(), &mut paths)?;
        debug!("found {} paths, view box {:?}", paths.len(), view_box);
        Ok(SvgLayer { view_box, paths })
    }

    /// Places the document in `frame` and converts each path.
    ///
    /// Path transforms are applied first. Without a view box the union of all
    /// transformed path bounds is mapped instead.
    pub fn to_shape_groups(&self, frame: &Frame, options: &ConvertOptions) -> Result<Vec<ShapeGroup>, Error> {
        let groups = self.paths.iter()
            .map(|path| -> Result<ShapeGroup, Error> {
                let group = crate::path_to_shape_group_with(&path.data, options)?;
                Ok(if path.transform.is_identity() {
                    group
                } else {
                    group.with_transform(&path.transform)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let source = match self.view_box {
            Some(r) => r,
            None => intrinsic_frame(groups.iter().flat_map(|g| g.nodes()).map(|n| &n.outline)),
        };
        let placement = Placement::fit(&source, frame, options.fit);
        Ok(groups.iter().map(|g| g.transformed(&placement)).collect())
    }
}

fn collect_paths(node: Node, parent: Transform, paths: &mut Vec<SvgPath>) -> Result<(), Error> {
    for child in node.children() {
        if child.node_type() != NodeType::Element {
            continue;
        }
        let transform = match child.attribute("transform") {
            Some(value) => parent * transform_list(value)?,
            None => parent,
        };
        match child.tag_name().name() {
            "path" => match child.attribute("d") {
                Some(d) if !d.trim().is_empty() => paths.push(SvgPath { data: d.into(), transform }),
                _ => debug!("skipping path without data"),
            }
            "svg" | "g" | "a" | "switch" => collect_paths(child, transform, paths)?,
            "defs" | "symbol" | "clipPath" | "mask" | "pattern" | "marker" => {}
            tag => trace!("ignoring <{}>", tag),
        }
    }
    Ok(())
}

#[test]
fn test_collect() {
    let layer = SvgLayer::parse(r#"
        <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
            <defs><path d="M0 0 L1 1"/></defs>
            <path d="M0 0 H24 V24 H0 Z"/>
            <g><path d="M6 6 H18 V18 H6 Z"/><circle r="3"/></g>
        </svg>
    "#).unwrap();
    assert_eq!(layer.view_box, Some(Frame::new(0., 0., 24., 24.)));
    let data: Vec<&str> = layer.paths.iter().map(|p| p.data.as_str()).collect();
    assert_eq!(data, vec!["M0 0 H24 V24 H0 Z", "M6 6 H18 V18 H6 Z"]);
    assert!(layer.paths.iter().all(|p| p.transform.is_identity()));
}

#[test]
fn test_group_transforms() {
    let layer = SvgLayer::parse(r#"
        <svg viewBox="0 0 100 100">
            <g transform="translate(10 20)"><path d="M0 0 H10 V10 H0 Z"/></g>
            <g transform="scale(2)"><path d="M5 5 H10 V10 H5 Z" transform="translate(1 1)"/></g>
            <g transform="translate(10 0)"><g transform="scale(2)"><path d="M0 0 H1 V1 H0 Z"/></g></g>
        </svg>
    "#).unwrap();
    assert_eq!(layer.paths[1].transform, Transform::new(2., 0., 0., 2., 2., 2.));

    let groups = layer.to_shape_groups(&Frame::new(0., 0., 100., 100.), &ConvertOptions::default()).unwrap();
    assert_eq!(groups[0].frame, Frame::new(10., 20., 10., 10.));
    assert_eq!(groups[1].frame, Frame::new(12., 12., 10., 10.));
    assert_eq!(groups[2].frame, Frame::new(10., 0., 2., 2.));
    assert_eq!(groups[2].shapes[0].outline.points[2].position, vec(12., 2.));
}

#[test]
fn test_transformed_bounds_without_view_box() {
    let layer = SvgLayer::parse(r#"
        <svg><g transform="translate(50 50)"><path d="M0 0 H20 V10 H0 Z"/></g></svg>
    "#).unwrap();
    assert_eq!(layer.view_box, None);
    let groups = layer.to_shape_groups(&Frame::new(0., 0., 10., 10.), &ConvertOptions::default()).unwrap();
    assert_eq!(groups[0].frame, Frame::new(0., 0., 10., 10.));
    assert_eq!(groups[0].shapes[0].outline.points[0].position, vec(0., 0.));
}

#[test]
fn test_bad_transform() {
    assert!(matches!(
        SvgLayer::parse(r#"<svg><g transform="rotate("><path d="M0 0 H1"/></g></svg>"#),
        Err(Error::InvalidAttributeValue(_))
    ));
}

#[test]
fn test_size_without_view_box() {
    let layer = SvgLayer::parse(r#"<svg width="200px" height="100"><path d="M0 0 L1 1"/></svg>"#).unwrap();
    assert_eq!(layer.view_box, Some(Frame::new(0., 0., 200., 100.)));
}

#[test]
fn test_not_svg() {
    assert!(matches!(SvgLayer::parse("<html/>"), Err(Error::NotSvg)));
    assert!(matches!(SvgLayer::parse("<svg"), Err(Error::Xml(_))));
}

#[test]
fn test_place_in_frame() {
    let layer = SvgLayer::parse(r#"
        <svg viewBox="0 0 24 24">
            <path d="M0 0 H24 V24 H0 Z"/>
            <path d="M6 6 H18 V18 H6 Z"/>
        </svg>
    "#).unwrap();
    let groups = layer.to_shape_groups(&Frame::new(100., 100., 48., 48.), &ConvertOptions::default()).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].frame, Frame::new(100., 100., 48., 48.));
    assert_eq!(groups[1].frame, Frame::new(112., 112., 24., 24.));
    assert_eq!(groups[1].shapes[0].frame, groups[1].frame);
}

#[test]
fn test_bad_path_is_reported() {
    let layer = SvgLayer::parse(r#"<svg viewBox="0 0 1 1"><path d="Z"/></svg>"#).unwrap();
    match layer.to_shape_groups(&Frame::new(0., 0., 1., 1.), &ConvertOptions::default()) {
        Err(Error::MalformedPath(e)) => assert_eq!(e.data(), "Z"),
        r => panic!("unexpected {:?}", r),
    }
}
