//! Reshaping of CSV endpoint responses into JSON-friendly structures.
//!
//! The DraCor API serves network data, character relations and the Wikidata
//! mix-n-match table as CSV. Column positions are fixed per endpoint and the
//! header row is dropped without validating its names; if the upstream shape
//! ever changes, columns would be silently misassigned.

use std::{error::Error, fmt};

use csv::ReaderBuilder;
use serde::Serialize;

/// Error type for CSV reshaping failures.
#[derive(Debug)]
pub enum TabularError {
    Csv(csv::Error),
    /// A data row carried fewer cells than the endpoint schema requires.
    ShortRow { line: u64 },
}

impl fmt::Display for TabularError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "CSV parse error: {err}"),
            Self::ShortRow { line } => write!(f, "CSV row at line {line} is missing columns"),
        }
    }
}

impl Error for TabularError {}

impl From<csv::Error> for TabularError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One edge of a co-presence network. Row schema: Source,Type,Target,Weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkEdge {
    pub source: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target: String,
    pub weight: String,
}

/// Node/edge projection of a co-presence network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<NetworkEdge>,
}

/// A kinship or social relation between two characters.
/// Row schema: Source,Type,Target,Label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterRelation {
    pub source: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target: String,
    pub label: String,
}

/// One row of the Wikidata mix-n-match table. Row schema: id,name,q.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MixnmatchEntry {
    pub id: String,
    pub title: String,
    pub q: Option<String>,
}

/// Projects network CSV into a node list and an edge list.
///
/// Node identifiers are deduplicated in first-seen order; downstream graph
/// layout consumers rely on that order, so a hash set alone would not do.
/// Edge types are lowercased.
///
/// # Errors
/// Returns `TabularError` if the CSV is malformed or a row is short.
pub fn parse_network_csv(raw: &str) -> Result<NetworkGraph, TabularError> {
    let mut nodes: Vec<String> = Vec::new();
    let mut edges = Vec::new();
    for row in rows(raw) {
        let (row, line) = row?;
        let [source, kind, target, weight] = cells::<4>(&row, line)?;
        if !nodes.iter().any(|node| node == &source) {
            nodes.push(source.clone());
        }
        if !nodes.iter().any(|node| node == &target) {
            nodes.push(target.clone());
        }
        edges.push(NetworkEdge {
            source,
            kind: kind.to_lowercase(),
            target,
            weight,
        });
    }
    Ok(NetworkGraph { nodes, edges })
}

/// Parses relation CSV into relation triples with a label.
///
/// # Errors
/// Returns `TabularError` if the CSV is malformed or a row is short.
pub fn parse_relations_csv(raw: &str) -> Result<Vec<CharacterRelation>, TabularError> {
    let mut relations = Vec::new();
    for row in rows(raw) {
        let (row, line) = row?;
        let [source, kind, target, label] = cells::<4>(&row, line)?;
        relations.push(CharacterRelation {
            source,
            kind: kind.to_lowercase(),
            target,
            label,
        });
    }
    Ok(relations)
}

/// Parses the mix-n-match CSV. Titles are lowercased; an empty Q-number cell
/// means the play has not been matched to Wikidata and becomes `None`.
///
/// # Errors
/// Returns `TabularError` if the CSV is malformed or a row is short.
pub fn parse_mixnmatch_csv(raw: &str) -> Result<Vec<MixnmatchEntry>, TabularError> {
    let mut entries = Vec::new();
    for row in rows(raw) {
        let (row, line) = row?;
        let [id, name, q] = cells::<3>(&row, line)?;
        entries.push(MixnmatchEntry {
            id,
            title: name.to_lowercase(),
            q: if q.is_empty() { None } else { Some(q) },
        });
    }
    Ok(entries)
}

fn rows(raw: &str) -> impl Iterator<Item = Result<(csv::StringRecord, u64), TabularError>> + '_ {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(raw.as_bytes())
        .into_records()
        .map(|record| {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            Ok((record, line))
        })
}

fn cells<const N: usize>(record: &csv::StringRecord, line: u64) -> Result<[String; N], TabularError> {
    let mut out: [String; N] = std::array::from_fn(|_| String::new());
    for (idx, cell) in out.iter_mut().enumerate() {
        *cell = record
            .get(idx)
            .ok_or(TabularError::ShortRow { line })?
            .to_string();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_round_trip() {
        let graph = parse_network_csv("Source,Type,Target,Weight\na,undirected,b,3\n").unwrap();
        assert_eq!(graph.nodes, vec!["a", "b"]);
        assert_eq!(
            graph.edges,
            vec![NetworkEdge {
                source: "a".to_string(),
                kind: "undirected".to_string(),
                target: "b".to_string(),
                weight: "3".to_string(),
            }]
        );
    }

    #[test]
    fn network_nodes_deduplicate_in_first_seen_order() {
        let raw = "Source,Type,Target,Weight\n\
                   odoardo,Undirected,emilia,3\n\
                   claudia,Undirected,emilia,2\n\
                   odoardo,Undirected,claudia,1\n";
        let graph = parse_network_csv(raw).unwrap();
        assert_eq!(graph.nodes, vec!["odoardo", "emilia", "claudia"]);
        assert_eq!(graph.edges.len(), 3);
        assert!(graph.edges.iter().all(|edge| edge.kind == "undirected"));
    }

    #[test]
    fn network_short_row_is_an_error() {
        let err = parse_network_csv("Source,Type,Target,Weight\na,undirected\n").unwrap_err();
        assert!(matches!(err, TabularError::ShortRow { .. }));
    }

    #[test]
    fn relations_are_lowercased_and_labeled() {
        let raw = "Source,Type,Target,Label\nodoardo,Directed,emilia,parent_of\n";
        let relations = parse_relations_csv(raw).unwrap();
        assert_eq!(
            relations,
            vec![CharacterRelation {
                source: "odoardo".to_string(),
                kind: "directed".to_string(),
                target: "emilia".to_string(),
                label: "parent_of".to_string(),
            }]
        );
    }

    #[test]
    fn mixnmatch_empty_q_becomes_none() {
        let raw = "id,name,q\nger000088,Emilia Galotti,Q782653\nger000001,Der Besuch,\n";
        let entries = parse_mixnmatch_csv(raw).unwrap();
        assert_eq!(entries[0].q.as_deref(), Some("Q782653"));
        assert_eq!(entries[0].title, "emilia galotti");
        assert_eq!(entries[1].q, None);
    }

    #[test]
    fn quoted_commas_stay_in_one_cell() {
        let raw = "id,name,q\nger000002,\"Der Sturm, oder die bezauberte Insel\",\n";
        let entries = parse_mixnmatch_csv(raw).unwrap();
        assert_eq!(entries[0].title, "der sturm, oder die bezauberte insel");
    }

    #[test]
    fn header_only_input_yields_empty_output() {
        assert!(parse_network_csv("Source,Type,Target,Weight\n").unwrap().edges.is_empty());
        assert!(parse_relations_csv("Source,Type,Target,Label\n").unwrap().is_empty());
    }
}
