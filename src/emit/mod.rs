//! TypeScript module generation.
//!
//! A single walk over the [`AssetTree`] writes the `AssetsTree` interface and
//! the `Assets` value side by side, so both always describe the same shape.
//! The result is a complete replacement for the output file.

mod paths;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::tree::{AssetLeaf, AssetNode, AssetTree, Children, LeafKind};

pub use paths::{clean_path, import_specifier, relative_path, url_reference};

/// Name of the exported structural type.
pub const TYPE_NAME: &str = "AssetsTree";
/// Name of the exported value.
pub const VALUE_NAME: &str = "Assets";
/// Type alias for SVG components.
pub const COMPONENT_TYPE: &str = "SvgComponent";
/// Query suffix the bundler transform uses to turn an SVG into a component.
pub const COMPONENT_QUERY: &str = "?react";

const HEADER: &str = "\
// This file is generated by assets-gen. Do not edit it by hand.
// Run `assets-gen` (or `assets-gen --watch`) to regenerate it.
";

const INDENT: &str = "  ";

/// Locations needed to turn leaves into references.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Directory that URL references are relative to.
    pub project_root: PathBuf,
    /// Path of the module being generated; imports are relative to its directory.
    pub output_path: PathBuf,
}

impl EmitOptions {
    pub fn new(project_root: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            output_path: output_path.into(),
        }
    }

    fn module_dir(&self) -> &Path {
        self.output_path.parent().unwrap_or(Path::new(""))
    }
}

/// Render the full module text for a tree.
pub fn emit_module(tree: &AssetTree, options: &EmitOptions) -> String {
    let mut emitter = Emitter::new(options);
    emitter.level(tree.root(), 1, &mut Vec::new());
    emitter.finish()
}

struct ComponentImport {
    name: String,
    specifier: String,
}

struct Emitter<'a> {
    options: &'a EmitOptions,
    types: String,
    values: String,
    imports: Vec<ComponentImport>,
    taken: HashSet<String>,
}

impl<'a> Emitter<'a> {
    fn new(options: &'a EmitOptions) -> Self {
        let taken = [TYPE_NAME, VALUE_NAME, COMPONENT_TYPE, "FC", "SVGProps"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        Self {
            options,
            types: String::new(),
            values: String::new(),
            imports: Vec::new(),
            taken,
        }
    }

    fn level(&mut self, children: &Children, depth: usize, key_path: &mut Vec<String>) {
        let pad = INDENT.repeat(depth);

        for (key, node) in children {
            key_path.push(key.clone());
            match node {
                AssetNode::Branch(branch) if branch.children.is_empty() => {
                    self.types.push_str(&format!("{pad}readonly {key}: {{}};\n"));
                    self.values.push_str(&format!("{pad}{key}: {{}},\n"));
                }
                AssetNode::Branch(branch) => {
                    self.types.push_str(&format!("{pad}readonly {key}: {{\n"));
                    self.values.push_str(&format!("{pad}{key}: {{\n"));
                    self.level(&branch.children, depth + 1, key_path);
                    self.types.push_str(&format!("{pad}}};\n"));
                    self.values.push_str(&format!("{pad}}},\n"));
                }
                AssetNode::Leaf(leaf) => {
                    let (ty, expr) = self.leaf(leaf, key_path);
                    self.types.push_str(&format!("{pad}readonly {key}: {ty};\n"));
                    self.values.push_str(&format!("{pad}{key}: {expr},\n"));
                }
            }
            key_path.pop();
        }
    }

    /// Type and value expression for one leaf.
    fn leaf(&mut self, leaf: &AssetLeaf, key_path: &[String]) -> (&'static str, String) {
        match leaf.kind {
            LeafKind::Path => {
                let url = url_reference(&self.options.project_root, &leaf.absolute_path);
                ("string", ts_string(&url))
            }
            LeafKind::Component => {
                let name = self.claim_name(key_path);
                let specifier = format!(
                    "{}{}",
                    import_specifier(self.options.module_dir(), &leaf.absolute_path),
                    COMPONENT_QUERY
                );
                self.imports.push(ComponentImport {
                    name: name.clone(),
                    specifier,
                });
                (COMPONENT_TYPE, name)
            }
        }
    }

    /// Reserve a unique PascalCase import binding for a component leaf.
    fn claim_name(&mut self, key_path: &[String]) -> String {
        let base = format!("{}Svg", pascal_case(key_path));
        let mut name = base.clone();
        let mut n = 2;
        while self.taken.contains(&name) {
            name = format!("{}{}", base, n);
            n += 1;
        }
        self.taken.insert(name.clone());
        name
    }

    fn finish(self) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');

        if !self.imports.is_empty() {
            out.push_str("import type { FC, SVGProps } from 'react';\n\n");
            for import in &self.imports {
                out.push_str(&format!(
                    "import {} from {};\n",
                    import.name,
                    ts_string(&import.specifier)
                ));
            }
            out.push('\n');
            out.push_str(&format!(
                "export type {} = FC<SVGProps<SVGSVGElement>>;\n\n",
                COMPONENT_TYPE
            ));
        }

        if self.types.is_empty() {
            out.push_str(&format!("export interface {} {{}}\n\n", TYPE_NAME));
            out.push_str(&format!("export const {}: {} = {{}};\n\n", VALUE_NAME, TYPE_NAME));
        } else {
            out.push_str(&format!("export interface {} {{\n", TYPE_NAME));
            out.push_str(&self.types);
            out.push_str("}\n\n");
            out.push_str(&format!("export const {}: {} = {{\n", VALUE_NAME, TYPE_NAME));
            out.push_str(&self.values);
            out.push_str("};\n\n");
        }

        out.push_str(&format!("export default {};\n", VALUE_NAME));
        out
    }
}

fn pascal_case(segments: &[String]) -> String {
    let mut out = String::new();
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Single-quoted TypeScript string literal.
fn ts_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}
