//! Target model tree display.
//!
//! ```text
//! Foo (Foo.Builder)
//! ├─ items: List<Bar> -> BarCollection
//! ├─ mode: Mode
//! │  └─ also: String
//! ├─ reset()
//! └─ used by
//!    └─ Client.send (scalar)
//! ```

use std::fmt;

use bauplan_core::simple_name;

use crate::{MethodGroup, TargetModel};

struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }
}

/// Box-drawing tree of a target's groups, nested linkages and usages.
#[derive(Debug, Clone, Copy)]
pub struct TargetDisplay<'a> {
    model: &'a TargetModel,
    indent_str: &'a str,
}

impl<'a> TargetDisplay<'a> {
    pub fn new(model: &'a TargetModel) -> Self {
        Self {
            model,
            indent_str: "",
        }
    }

    /// Prefix every line with `indent`.
    pub fn indent(mut self, indent: &'a str) -> Self {
        self.indent_str = indent;
        self
    }

    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str(self.indent_str);
        output.push_str(&format!(
            "{} ({})\n",
            self.model.target.name, self.model.builder.name
        ));

        let mut nodes: Vec<Node> = self.model.groups.iter().map(|g| self.group_node(g)).collect();
        if !self.model.usages.is_empty() {
            nodes.push(Node {
                label: "used by".to_string(),
                children: self
                    .model
                    .usages
                    .iter()
                    .map(|u| Node::leaf(format!("{}.{} ({})", simple_name(&u.owner), u.name, u.shape)))
                    .collect(),
            });
        }

        let total = nodes.len();
        for (i, node) in nodes.iter().enumerate() {
            render_node(&mut output, node, self.indent_str, i + 1 == total);
        }
        output
    }

    fn group_node(&self, group: &MethodGroup) -> Node {
        let mut children = Vec::new();
        let label = match group.primary_property() {
            Some(primary) => {
                let value = primary
                    .method
                    .single_param()
                    .map_or("", |p| p.display_name.as_str());
                let mut label = format!("{}: {}", group.name, value);
                let signature = primary.method.signature();
                if let Some(nested) = self.model.nested.iter().find(|n| n.signature == signature) {
                    label.push_str(&format!(" -> {}", nested.linkage));
                }
                if let Some(action) = group.plain_action() {
                    children.push(Node::leaf(format!("{}()", action.method.name)));
                }
                label
            }
            None => {
                let params: Vec<&str> = group
                    .members
                    .first()
                    .map(|m| m.method.params.iter().map(|p| p.display_name.as_str()).collect())
                    .unwrap_or_default();
                format!("{}({})", group.name, params.join(", "))
            }
        };

        if let Some(secondary) = group.secondary_overload() {
            let value = secondary
                .method
                .single_param()
                .map_or("", |p| p.display_name.as_str());
            children.push(Node::leaf(format!("also: {}", value)));
        }

        Node { label, children }
    }
}

impl fmt::Display for TargetDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render().trim_end())
    }
}

/// Render a target as a box-drawing tree.
pub fn render_target(model: &TargetModel) -> String {
    TargetDisplay::new(model).render()
}

fn render_node(output: &mut String, node: &Node, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let child_prefix = if is_last { "   " } else { "│  " };

    output.push_str(prefix);
    output.push_str(connector);
    output.push(' ');
    output.push_str(&node.label);
    output.push('\n');

    let total = node.children.len();
    let new_prefix = format!("{}{}", prefix, child_prefix);
    for (i, child) in node.children.iter().enumerate() {
        render_node(output, child, &new_prefix, i + 1 == total);
    }
}
