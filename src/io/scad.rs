// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! OpenSCAD script emitter

use crate::ast::{Node, NodeKind, TransformOp, Vec2, Vec3};
use std::fmt::Write;

const INDENT: &str = "    ";

/// Render a node tree as an OpenSCAD script
pub fn to_scad(node: &Node) -> String {
    let mut writer = ScadWriter::default();
    writer.header();
    writer.node(node);
    writer.out
}

#[derive(Default)]
struct ScadWriter {
    out: String,
    depth: usize,
}

impl ScadWriter {
    fn header(&mut self) {
        self.out.push_str(&format!(
            "// Generated by polyframe-parts {}\n\n",
            env!("CARGO_PKG_VERSION")
        ));
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn node(&mut self, node: &Node) {
        if let Some(id) = &node.id {
            self.line(&format!("// {}", id));
        }

        match &node.kind {
            NodeKind::Cube { size, center } => {
                self.line(&format!("cube(size = {}, center = {});", vec3(size), center))
            }
            NodeKind::Sphere { r, fn_ } => {
                self.line(&format!("sphere(r = {}{});", num(*r), segments(*fn_)))
            }
            NodeKind::Cylinder { h, r, fn_, center } => self.line(&format!(
                "cylinder(h = {}, r = {}, center = {}{});",
                num(*h),
                num(*r),
                center,
                segments(*fn_)
            )),
            NodeKind::Cone {
                h,
                r1,
                r2,
                fn_,
                center,
            } => self.line(&format!(
                "cylinder(h = {}, r1 = {}, r2 = {}, center = {}{});",
                num(*h),
                num(*r1),
                num(*r2),
                center,
                segments(*fn_)
            )),
            NodeKind::Polyhedron { points, faces } => {
                let points: Vec<String> = points.iter().map(vec3).collect();
                let faces: Vec<String> = faces
                    .iter()
                    .map(|face| {
                        let indices: Vec<String> = face.iter().map(|i| i.to_string()).collect();
                        format!("[{}]", indices.join(", "))
                    })
                    .collect();
                self.line(&format!(
                    "polyhedron(points = [{}], faces = [{}]);",
                    points.join(", "),
                    faces.join(", ")
                ));
            }
            NodeKind::Circle { r, fn_ } => {
                self.line(&format!("circle(r = {}{});", num(*r), segments(*fn_)))
            }
            NodeKind::Square { size, center } => {
                self.line(&format!("square(size = {}, center = {});", vec2(size), center))
            }
            NodeKind::Polygon { points } => {
                let points: Vec<String> = points.iter().map(vec2).collect();
                self.line(&format!("polygon(points = [{}]);", points.join(", ")));
            }
            NodeKind::LinearExtrude {
                height,
                center,
                children,
            } => self.block(
                &format!("linear_extrude(height = {}, center = {})", num(*height), center),
                children,
            ),
            NodeKind::RotateExtrude { fn_, children } => {
                let args = if *fn_ > 0 {
                    format!("$fn = {}", fn_)
                } else {
                    String::new()
                };
                self.block(&format!("rotate_extrude({})", args), children);
            }
            NodeKind::Import { file } => self.line(&format!("import(\"{}\");", escape(file))),
            NodeKind::Union(children) => self.block("union()", children),
            NodeKind::Difference(children) => self.block("difference()", children),
            NodeKind::Intersection(children) => self.block("intersection()", children),
            NodeKind::Hull(children) => self.block("hull()", children),
            NodeKind::Transform { op, children } => self.block(&transform(op), children),
            NodeKind::Color { color, children } => {
                self.block(&format!("color(\"{}\")", escape(color)), children)
            }
            NodeKind::Empty => self.line("union() {}"),
        }
    }

    fn block(&mut self, head: &str, children: &[Node]) {
        if children.is_empty() {
            self.line(&format!("{} {{}}", head));
            return;
        }
        self.line(&format!("{} {{", head));
        self.depth += 1;
        for child in children {
            self.node(child);
        }
        self.depth -= 1;
        self.line("}");
    }
}

fn transform(op: &TransformOp) -> String {
    match op {
        TransformOp::Translate(v) => format!("translate({})", vec3(v)),
        TransformOp::Rotate(v) => format!("rotate({})", vec3(v)),
        TransformOp::Scale(v) => format!("scale({})", vec3(v)),
        TransformOp::Mirror(v) => format!("mirror({})", vec3(v)),
        TransformOp::Multmatrix(m) => {
            let mut rows = String::new();
            for r in 0..4 {
                if r > 0 {
                    rows.push_str(", ");
                }
                let _ = write!(
                    rows,
                    "[{}, {}, {}, {}]",
                    num(m[(r, 0)]),
                    num(m[(r, 1)]),
                    num(m[(r, 2)]),
                    num(m[(r, 3)])
                );
            }
            format!("multmatrix([{}])", rows)
        }
    }
}

fn segments(fn_: u32) -> String {
    if fn_ > 0 {
        format!(", $fn = {}", fn_)
    } else {
        String::new()
    }
}

/// Format a number with at most nine decimals and no negative zero
fn num(value: f64) -> String {
    let rounded = (value * 1e9).round() / 1e9;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

fn vec3(v: &Vec3) -> String {
    format!("[{}, {}, {}]", num(v.x), num(v.y), num(v.z))
}

fn vec2(v: &Vec2) -> String {
    format!("[{}, {}]", num(v.x), num(v.y))
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
