//! Hierarchie-Abgleich: leitet aus den zwei Buchführungsquellen der
//! Registry einen Volumen-Baum ab.
//!
//! Der Baum wird bei jedem Aufruf komplett neu berechnet; es gibt keinen
//! zwischengespeicherten Zustand, der nach Mutationen veralten könnte.

use super::{EditorError, Registry};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// Anzeigetext für Volumen ohne Material
pub const ASSEMBLY_LABEL: &str = "(Assembly)";

/// Materialspalte eines Volumens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterialLabel {
    Material(String),
    /// Kein Material (Assembly, Null-Material oder unbekanntes Volumen)
    Assembly,
}

impl MaterialLabel {
    /// Label eines Volumens der Registry
    pub fn of(registry: &Registry, volume: &str) -> Self {
        registry
            .volume(volume)
            .and_then(|v| v.material_name())
            .map(|name| Self::Material(name.to_string()))
            .unwrap_or(Self::Assembly)
    }
}

impl fmt::Display for MaterialLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Material(name) => f.write_str(name),
            Self::Assembly => f.write_str(ASSEMBLY_LABEL),
        }
    }
}

/// Welche Buchführungsquelle(n) in die Kind-Map einfließen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSource {
    /// Nur das Platzierungs-Dictionary
    Placements,
    /// Nur die Kinderlisten der Volumen
    Daughters,
    /// Vereinigung beider Quellen (Standard)
    Union,
}

/// Eltern → Kind → Menge der Platzierungsnamen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildMap {
    edges: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl ChildMap {
    fn insert(&mut self, parent: &str, child: &str, placement: &str) {
        self.edges
            .entry(parent.to_string())
            .or_default()
            .entry(child.to_string())
            .or_default()
            .insert(placement.to_string());
    }

    /// Kinder eines Volumens, case-insensitiv sortiert
    pub fn children(&self, parent: &str) -> Vec<&str> {
        let mut children: Vec<&str> = self
            .edges
            .get(parent)
            .map(|c| c.keys().map(String::as_str).collect())
            .unwrap_or_default();
        children.sort_by_key(|name| name.to_lowercase());
        children
    }

    /// Anzahl unterschiedlicher Platzierungen für die Kante parent → child
    pub fn occurrences(&self, parent: &str, child: &str) -> usize {
        self.edges
            .get(parent)
            .and_then(|c| c.get(child))
            .map_or(0, BTreeSet::len)
    }

    /// Alle Kanten (parent, child) in deterministischer Reihenfolge
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().flat_map(|(parent, children)| {
            children
                .keys()
                .map(move |child| (parent.as_str(), child.as_str()))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }
}

/// Baut die Kind-Map aus der gewählten Quelle.
///
/// Referenzen werden normalisiert; verwaiste Handles werden übersprungen.
pub fn child_map(registry: &Registry, source: ChildSource) -> ChildMap {
    let mut map = ChildMap::default();

    if source != ChildSource::Daughters {
        for placement in registry.placements_iter() {
            let parent = registry.resolve_ref(&placement.parent);
            let child = registry.resolve_ref(&placement.child);
            if let (Some(parent), Some(child)) = (parent, child) {
                map.insert(parent, child, &placement.name);
            } else {
                log::debug!("Platzierung '{}' mit verwaister Referenz ignoriert", placement.name);
            }
        }
    }

    if source != ChildSource::Placements {
        for volume in registry.volumes_iter() {
            for daughter in &volume.daughters {
                match registry.resolve_ref(&daughter.child) {
                    Some(child) => map.insert(&volume.name, child, &daughter.placement),
                    None => log::debug!(
                        "Kind '{}' von '{}' mit verwaister Referenz ignoriert",
                        daughter.placement,
                        volume.name
                    ),
                }
            }
        }
    }

    map
}

/// Knoten des abgeleiteten Volumen-Baums
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeNode {
    pub name: String,
    pub material: MaterialLabel,
    /// Anzahl Platzierungen dieses Kindes im Eltern-Volumen (Wurzel: 1)
    pub occurrences: usize,
    pub children: Vec<VolumeNode>,
}

/// Abgeleiteter Volumen-Baum, Wurzel ist das World-Volumen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeTree {
    pub root: VolumeNode,
}

impl VolumeTree {
    /// Tiefensuche (pre-order) mit Tiefe
    pub fn iter(&self) -> impl Iterator<Item = (usize, &VolumeNode)> {
        let mut stack = vec![(0usize, &self.root)];
        std::iter::from_fn(move || {
            let (depth, node) = stack.pop()?;
            stack.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
            Some((depth, node))
        })
    }

    /// Anzahl der Knoten inklusive Wurzel
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|(_, node)| node.name == name)
    }

    /// Pfad von der Wurzel bis zum Volumen `name` (inklusive beider Enden).
    ///
    /// Wird genutzt, um ein neu eingefügtes Volumen aufzuklappen.
    pub fn path_to(&self, name: &str) -> Option<Vec<&str>> {
        let mut path = Vec::new();
        for (depth, node) in self.iter() {
            path.truncate(depth);
            path.push(node.name.as_str());
            if node.name == name {
                return Some(path);
            }
        }
        None
    }

    /// Eingerückte Textdarstellung (eine Zeile pro Knoten)
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (depth, node) in self.iter() {
            out.push_str(&"  ".repeat(depth));
            out.push_str(&node.name);
            out.push_str(&format!(" [{}]", node.material));
            if node.occurrences > 1 {
                out.push_str(&format!(" x{}", node.occurrences));
            }
            out.push('\n');
        }
        out
    }
}

/// Leitet den Baum aus der Vereinigung beider Quellen ab.
pub fn reconcile(registry: &Registry) -> Result<VolumeTree, EditorError> {
    reconcile_from(registry, ChildSource::Union)
}

/// Leitet den Baum aus der gewählten Quelle ab.
///
/// Jedes Volumen erscheint höchstens einmal im Baum; Zyklen und mehrfach
/// erreichbare Volumen werden beim zweiten Besuch abgeschnitten.
pub fn reconcile_from(registry: &Registry, source: ChildSource) -> Result<VolumeTree, EditorError> {
    let world = registry.world_name()?;
    let map = child_map(registry, source);
    let mut visited: HashSet<String> = HashSet::new();

    let root = build_tree(registry, &map, world, &mut visited);
    Ok(VolumeTree { root })
}

/// Knoten während des Aufbaus; Kinder als Indizes in die Knotenliste
struct PendingNode<'a> {
    name: &'a str,
    occurrences: usize,
    children: Vec<usize>,
}

/// Offene Ebene der Tiefensuche
struct Frame<'a> {
    node: usize,
    children: Vec<&'a str>,
    next: usize,
}

/// Tiefensuche mit explizitem Stack (beliebige Verschachtelungstiefe).
fn build_tree<'a>(
    registry: &Registry,
    map: &'a ChildMap,
    world: &'a str,
    visited: &mut HashSet<String>,
) -> VolumeNode {
    let mut pending = vec![PendingNode {
        name: world,
        occurrences: 1,
        children: Vec::new(),
    }];
    visited.insert(world.to_string());
    let mut stack = vec![Frame {
        node: 0,
        children: map.children(world),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(&child) = frame.children.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let parent = frame.node;
        let parent_name = pending[parent].name;

        if visited.contains(child) {
            log::warn!(
                "Volumen '{}' bereits im Baum, Kante '{}' -> '{}' ignoriert",
                child,
                parent_name,
                child
            );
            continue;
        }
        visited.insert(child.to_string());

        let index = pending.len();
        pending.push(PendingNode {
            name: child,
            occurrences: map.occurrences(parent_name, child),
            children: Vec::new(),
        });
        pending[parent].children.push(index);
        stack.push(Frame {
            node: index,
            children: map.children(child),
            next: 0,
        });
    }

    // Kinder haben immer größere Indizes als ihre Eltern
    let mut built: Vec<Option<VolumeNode>> = (0..pending.len()).map(|_| None).collect();
    for (index, node) in pending.iter().enumerate().rev() {
        let children = node
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(VolumeNode {
            name: node.name.to_string(),
            material: MaterialLabel::of(registry, node.name),
            occurrences: node.occurrences,
            children,
        });
    }
    built
        .into_iter()
        .next()
        .flatten()
        .unwrap_or_else(|| VolumeNode {
            name: world.to_string(),
            material: MaterialLabel::of(registry, world),
            occurrences: 1,
            children: Vec::new(),
        })
}

impl Drop for VolumeNode {
    fn drop(&mut self) {
        // Iterativ abbauen, damit tiefe Bäume den Stack nicht sprengen
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Eintrag der flachen (gefilterten) Liste
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeEntry {
    pub name: String,
    pub material: MaterialLabel,
}

/// Alle Volumen, deren Name `needle` (case-insensitiv) enthält, nach Name sortiert.
pub fn filter_volumes(registry: &Registry, needle: &str) -> Vec<VolumeEntry> {
    let needle = needle.trim().to_lowercase();
    let mut entries: Vec<VolumeEntry> = registry
        .volumes_iter()
        .filter(|v| v.name.to_lowercase().contains(&needle))
        .map(|v| VolumeEntry {
            name: v.name.clone(),
            material: MaterialLabel::of(registry, &v.name),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Angezeigte Volumen-Ansicht: entweder Baum oder gefilterte Liste, nie beides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeView {
    Tree(VolumeTree),
    Flat(Vec<VolumeEntry>),
}

impl VolumeView {
    /// Namen aller angezeigten Volumen in Anzeige-Reihenfolge
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Tree(tree) => tree.iter().map(|(_, n)| n.name.as_str()).collect(),
            Self::Flat(entries) => entries.iter().map(|e| e.name.as_str()).collect(),
        }
    }
}

/// Berechnet die Ansicht neu: leerer Suchtext → Baum, sonst flache Liste.
pub fn volume_view(registry: &Registry, search: &str) -> Result<VolumeView, EditorError> {
    if search.trim().is_empty() {
        reconcile(registry).map(VolumeView::Tree)
    } else {
        Ok(VolumeView::Flat(filter_volumes(registry, search)))
    }
}

#[cfg(test)]
mod tests;
