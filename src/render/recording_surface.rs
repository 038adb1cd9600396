use crate::core::{BoundingBox, Coordinates, Path, Point};
use crate::error::{ChartError, ChartResult};
use crate::render::{NodeId, PathStyle, RenderSurface, TextPrimitive};

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNodeKind {
    Mount(BoundingBox),
    Group(Coordinates),
    Path(Path, PathStyle),
    Text(TextPrimitive),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub parent: Option<NodeId>,
    pub kind: SceneNodeKind,
    pub children: Vec<NodeId>,
}

/// Path emitted somewhere below a node, with its absolute screen offset.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPath {
    pub node: NodeId,
    pub offset: Coordinates,
    pub path: Path,
    pub style: PathStyle,
}

/// Text emitted somewhere below a node, with its absolute screen offset.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedText {
    pub node: NodeId,
    pub offset: Coordinates,
    pub text: TextPrimitive,
}

/// In-memory scene tree used by tests and headless hosts.
///
/// It validates every primitive it receives so invalid geometry is caught
/// before a real backend sees it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    nodes: Vec<Option<SceneNode>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a host mount node occupying `bounds` on screen.
    pub fn add_mount(&mut self, bounds: BoundingBox) -> NodeId {
        self.insert(None, SceneNodeKind::Mount(bounds))
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.get() as usize).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Number of live nodes, mounts included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    #[must_use]
    pub fn descendant_count(&self, id: NodeId) -> usize {
        self.children(id)
            .iter()
            .map(|child| 1 + self.descendant_count(*child))
            .sum()
    }

    #[must_use]
    pub fn paths(&self, id: NodeId) -> Vec<RenderedPath> {
        let mut out = Vec::new();
        self.walk(id, Coordinates::default(), &mut |node, offset, kind| {
            if let SceneNodeKind::Path(path, style) = kind {
                out.push(RenderedPath {
                    node,
                    offset,
                    path: path.clone(),
                    style: *style,
                });
            }
        });
        out
    }

    #[must_use]
    pub fn texts(&self, id: NodeId) -> Vec<RenderedText> {
        let mut out = Vec::new();
        self.walk(id, Coordinates::default(), &mut |node, offset, kind| {
            if let SceneNodeKind::Text(text) = kind {
                out.push(RenderedText {
                    node,
                    offset,
                    text: text.clone(),
                });
            }
        });
        out
    }

    fn insert(&mut self, parent: Option<NodeId>, kind: SceneNodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u64);
        self.nodes.push(Some(SceneNode {
            parent,
            kind,
            children: Vec::new(),
        }));
        id
    }

    fn append(&mut self, parent: NodeId, kind: SceneNodeKind) -> ChartResult<NodeId> {
        if self.node(parent).is_none() {
            return Err(unknown_node(parent));
        }
        let id = self.insert(Some(parent), kind);
        if let Some(Some(node)) = self.nodes.get_mut(parent.get() as usize) {
            node.children.push(id);
        }
        Ok(id)
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let children = self
            .nodes
            .get_mut(id.get() as usize)
            .and_then(Option::take)
            .map(|node| node.children)
            .unwrap_or_default();
        for child in children {
            self.remove_subtree(child);
        }
    }

    /// Visits `id` and its descendants, offsets accumulated from `id`'s parent.
    fn walk(
        &self,
        id: NodeId,
        offset: Coordinates,
        visit: &mut dyn FnMut(NodeId, Coordinates, &SceneNodeKind),
    ) {
        let Some(node) = self.node(id) else {
            return;
        };
        let offset = match node.kind {
            SceneNodeKind::Mount(bounds) => offset.offset_by(bounds.origin()),
            SceneNodeKind::Group(transform) => offset.offset_by(transform),
            _ => offset,
        };
        visit(id, offset, &node.kind);
        for child in &node.children {
            self.walk(*child, offset, visit);
        }
    }

    fn absolute_offset(&self, id: NodeId) -> Coordinates {
        let mut offset = Coordinates::default();
        let mut cursor = self.node(id).and_then(|node| node.parent);
        while let Some(parent) = cursor {
            let Some(node) = self.node(parent) else {
                break;
            };
            offset = match node.kind {
                SceneNodeKind::Mount(bounds) => offset.offset_by(bounds.origin()),
                SceneNodeKind::Group(transform) => offset.offset_by(transform),
                _ => offset,
            };
            cursor = node.parent;
        }
        offset
    }
}

impl RenderSurface for RecordingSurface {
    fn create_group(&mut self, parent: NodeId, transform: Coordinates) -> ChartResult<NodeId> {
        if !transform.left.is_finite() || !transform.top.is_finite() {
            return Err(ChartError::InvalidData(
                "group transform must be finite".to_owned(),
            ));
        }
        self.append(parent, SceneNodeKind::Group(transform))
    }

    fn append_path(
        &mut self,
        parent: NodeId,
        path: &Path,
        style: &PathStyle,
    ) -> ChartResult<NodeId> {
        style.validate()?;
        if path
            .points()
            .iter()
            .any(|point| !point.x.is_finite() || !point.y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        self.append(parent, SceneNodeKind::Path(path.clone(), *style))
    }

    fn append_text(&mut self, parent: NodeId, text: &TextPrimitive) -> ChartResult<NodeId> {
        text.validate()?;
        self.append(parent, SceneNodeKind::Text(text.clone()))
    }

    fn clear_children(&mut self, node: NodeId) -> ChartResult<()> {
        let children = match self.nodes.get_mut(node.get() as usize) {
            Some(Some(entry)) => std::mem::take(&mut entry.children),
            _ => return Err(unknown_node(node)),
        };
        for child in children {
            self.remove_subtree(child);
        }
        Ok(())
    }

    fn measure_bounding_box(&self, node: NodeId) -> ChartResult<BoundingBox> {
        let entry = self.node(node).ok_or_else(|| unknown_node(node))?;
        if let SceneNodeKind::Mount(bounds) = entry.kind {
            return Ok(bounds);
        }

        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut include = |x: f64, y: f64| {
            min = Point::new(min.x.min(x), min.y.min(y));
            max = Point::new(max.x.max(x), max.y.max(y));
        };
        self.walk(node, self.absolute_offset(node), &mut |_, offset, kind| match kind {
            SceneNodeKind::Path(path, _) => {
                for point in path.points() {
                    include(offset.left + point.x, offset.top + point.y);
                }
            }
            SceneNodeKind::Text(text) => include(offset.left + text.x, offset.top + text.y),
            SceneNodeKind::Group(_) => include(offset.left, offset.top),
            SceneNodeKind::Mount(_) => {}
        });

        if !min.x.is_finite() {
            let origin = self.absolute_offset(node);
            return Ok(BoundingBox::new(origin.left, origin.top, 0.0, 0.0));
        }
        Ok(BoundingBox::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

fn unknown_node(id: NodeId) -> ChartError {
    ChartError::InvalidData(format!("surface has no node {}", id.get()))
}
