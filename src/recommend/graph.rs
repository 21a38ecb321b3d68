use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use super::models::CandidateSong;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Artist,
    Theme,
    Style,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationKind {
    /// Artist to a theme they wrote about.
    #[serde(rename = "创作主题")]
    WritesAbout,
    /// Theme to a style it was performed in.
    #[serde(rename = "主题风格")]
    PerformedAs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphRelationship {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
}

/// Artists, themes and styles of a song collection and the links between them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KnowledgeGraph {
    pub nodes: Vec<GraphNode>,
    pub relationships: Vec<GraphRelationship>,
}

impl KnowledgeGraph {
    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }
}

#[derive(Default)]
struct NodeSet {
    seen: HashSet<String>,
    names: Vec<String>,
}

impl NodeSet {
    fn insert(&mut self, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
        }
    }

    fn into_nodes(self, kind: NodeKind) -> impl Iterator<Item = GraphNode> {
        self.names.into_iter().map(move |name| GraphNode {
            id: name.clone(),
            kind,
            label: name,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Build the artist/theme/style graph of `songs`.
///
/// Nodes are grouped by kind (artists, then themes, then styles) and keep the
/// order in which each name first appears. A relationship is listed once even
/// when several songs imply it. Songs without a theme add only their artist
/// node; a style without a theme has nothing to link to.
pub fn build_knowledge_graph(songs: &[Arc<CandidateSong>]) -> KnowledgeGraph {
    let mut artists = NodeSet::default();
    let mut themes = NodeSet::default();
    let mut styles = NodeSet::default();
    let mut seen_relationships: HashSet<(String, String, RelationKind)> = HashSet::new();
    let mut relationships = Vec::new();

    let mut link = |source: &str, target: &str, kind: RelationKind| {
        if seen_relationships.insert((source.to_string(), target.to_string(), kind)) {
            relationships.push(GraphRelationship {
                source: source.to_string(),
                target: target.to_string(),
                kind,
            });
        }
    };

    for song in songs {
        let artist = non_empty(Some(song.artist.as_str()));
        let theme = non_empty(song.theme.as_deref());
        let style = non_empty(song.style.as_deref());

        if let Some(artist) = artist {
            artists.insert(artist);
        }
        if let Some(theme) = theme {
            themes.insert(theme);
        }
        if let Some(style) = style {
            styles.insert(style);
        }

        if let (Some(artist), Some(theme)) = (artist, theme) {
            link(artist, theme, RelationKind::WritesAbout);
        }
        if let (Some(theme), Some(style)) = (theme, style) {
            link(theme, style, RelationKind::PerformedAs);
        }
    }

    let nodes = artists
        .into_nodes(NodeKind::Artist)
        .chain(themes.into_nodes(NodeKind::Theme))
        .chain(styles.into_nodes(NodeKind::Style))
        .collect();

    KnowledgeGraph {
        nodes,
        relationships,
    }
}
