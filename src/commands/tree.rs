//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the
//! dependency tree of a component in a hierarchical format.
//!
//! ## Functionality
//!
//! - **Dependency Visualization**: Shows each declared dependency under the
//!   component that declares it
//! - **Depth Control**: Supports `--depth` flag to limit tree depth
//! - **Problem Markers**: Components that cannot be resolved and edges that
//!   close a cycle are labelled instead of expanded
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::borrow::Cow;

use cocos_components::metadata::MetadataResolver;
use cocos_components::output::{emoji, OutputConfig};
use cocos_components::phases::{build_dependency_tree, DependencyNode};
use cocos_components::suggestions;

use super::{ProjectArgs, ProjectContext};

/// Display the dependency tree of a component
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// The component whose dependencies to show
    #[arg(value_name = "COMPONENT")]
    pub component: String,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the component itself, 1 to show its direct
    /// dependencies, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs, output: &OutputConfig) -> Result<()> {
    let context = ProjectContext::load(&args.project)?;
    let registry = &context.registry;

    if registry.find(&args.component).is_none() {
        return Err(suggestions::component_not_found(
            &args.component,
            registry.names(),
        ));
    }

    println!(
        "{} Dependency tree for: {}",
        emoji(output, "🌳", "[TREE]"),
        output.bold(&args.component)
    );

    let mut resolver = MetadataResolver::new();
    let root = build_dependency_tree(
        registry,
        &mut resolver,
        &args.component,
        args.depth.unwrap_or(usize::MAX),
    );
    print_tree(&TreeNode::from(&root))
        .map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;

    Ok(())
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl From<&DependencyNode> for TreeNode {
    fn from(node: &DependencyNode) -> Self {
        let label = if node.cyclic {
            format!("{} (cycle)", node.name)
        } else if node.missing {
            format!("{} (unresolved)", node.name)
        } else {
            node.name.clone()
        };

        Self {
            label,
            children: node.children.iter().map(TreeNode::from).collect(),
        }
    }
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
