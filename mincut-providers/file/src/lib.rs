//! Reference reader for the plain-text weighted edge-list graph format.
//!
//! Named a "provider" to follow the workspace's swappable-data-source
//! naming convention, out of `mincut-core`'s scope but shipped so the CLI
//! has a real file-backed input path.

#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]

use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;

use mincut_core::{GraphSource, GraphSourceError, WeightedEdge, edge_slice_bounds};

fn malformed(name: &str, reason: &str) -> GraphSourceError {
    GraphSourceError::Malformed {
        name: Arc::from(name),
        reason: Arc::from(reason),
    }
}

/// A graph loaded from the workspace's plain-text edge-list format:
///
/// ```text
/// # optional comment (single line, ignored)
/// <vertices> <edges>
/// <u> <v> <w>
/// ...
/// ```
///
/// Vertices are 0-based; weights are positive integers; self-loops are
/// accepted in the input and silently dropped.
pub struct FileGraphSource {
    name: String,
    vertex_count: u64,
    edges: Vec<WeightedEdge>,
}

impl FileGraphSource {
    /// Parses a graph from `reader`, naming it `name` for diagnostics and
    /// result emission.
    ///
    /// # Errors
    ///
    /// Returns [`GraphSourceError::Malformed`] if the header or an edge line
    /// cannot be parsed, or [`GraphSourceError::VertexOutOfRange`] if an edge
    /// references a vertex id outside `[0, vertex_count)`.
    ///
    /// # Examples
    /// ```
    /// use mincut_providers_file::FileGraphSource;
    ///
    /// let text = "3 3\n0 1 1\n1 2 1\n0 2 1\n";
    /// let source = FileGraphSource::from_reader("triangle", text.as_bytes())?;
    /// assert_eq!(source.vertex_count(), 3);
    /// # Ok::<(), mincut_core::GraphSourceError>(())
    /// ```
    pub fn from_reader(name: impl Into<String>, reader: impl Read) -> Result<Self, GraphSourceError> {
        let name = name.into();
        let buffered = BufReader::new(reader);
        let mut lines = buffered.lines();

        let header = loop {
            let line = lines
                .next()
                .ok_or_else(|| malformed(&name, "missing header line"))?
                .map_err(|_| malformed(&name, "I/O error while reading header"))?;
            let trimmed = line.trim().to_string();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            break trimmed;
        };

        let mut header_fields = header.split_whitespace();
        let vertex_count: u64 = header_fields
            .next()
            .and_then(|field| field.parse().ok())
            .ok_or_else(|| malformed(&name, "header vertex count is not a valid integer"))?;
        let declared_edge_count: u64 = header_fields
            .next()
            .and_then(|field| field.parse().ok())
            .ok_or_else(|| malformed(&name, "header edge count is not a valid integer"))?;

        #[allow(
            clippy::cast_possible_truncation,
            reason = "edge counts in input files fit comfortably in usize on supported platforms"
        )]
        let mut edges = Vec::with_capacity(declared_edge_count as usize);

        for line in lines {
            let line = line.map_err(|_| malformed(&name, "I/O error while reading an edge line"))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut fields = trimmed.split_whitespace();
            let u: u64 = fields
                .next()
                .and_then(|field| field.parse().ok())
                .ok_or_else(|| malformed(&name, "edge line is missing its `u` endpoint"))?;
            let v: u64 = fields
                .next()
                .and_then(|field| field.parse().ok())
                .ok_or_else(|| malformed(&name, "edge line is missing its `v` endpoint"))?;
            let weight: u64 = fields
                .next()
                .and_then(|field| field.parse().ok())
                .ok_or_else(|| malformed(&name, "edge line is missing its weight"))?;

            if u >= vertex_count {
                return Err(GraphSourceError::VertexOutOfRange {
                    vertex: u,
                    vertex_count,
                });
            }
            if v >= vertex_count {
                return Err(GraphSourceError::VertexOutOfRange {
                    vertex: v,
                    vertex_count,
                });
            }
            if u == v {
                continue;
            }

            #[allow(
                clippy::cast_possible_truncation,
                reason = "vertex ids are validated against vertex_count above, which fits u32 for realistic graphs"
            )]
            edges.push(WeightedEdge::new(u as u32, v as u32, weight));
        }

        Ok(Self {
            name,
            vertex_count,
            edges,
        })
    }
}

impl GraphSource for FileGraphSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn vertex_count(&self) -> u64 {
        self.vertex_count
    }

    fn edge_count(&self) -> u64 {
        self.edges.len() as u64
    }

    fn slice(&self, rank: usize, group_size: usize) -> Result<Vec<WeightedEdge>, GraphSourceError> {
        let (start, end) = edge_slice_bounds(self.edge_count(), rank, group_size)?;
        Ok(self.edges[start as usize..end as usize].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_graph() {
        let text = "# a comment\n3 3\n0 1 1\n1 2 1\n0 2 1\n";
        let source = FileGraphSource::from_reader("triangle", text.as_bytes()).unwrap();
        assert_eq!(source.vertex_count(), 3);
        assert_eq!(source.edge_count(), 3);
        assert_eq!(source.name(), "triangle");
    }

    #[test]
    fn drops_self_loops() {
        let text = "2 2\n0 0 5\n0 1 1\n";
        let source = FileGraphSource::from_reader("loops", text.as_bytes()).unwrap();
        assert_eq!(source.edge_count(), 1);
    }

    #[test]
    fn rejects_vertex_out_of_range() {
        let text = "2 1\n0 5 1\n";
        let err = FileGraphSource::from_reader("bad", text.as_bytes()).unwrap_err();
        assert_eq!(err.code(), mincut_core::GraphSourceErrorCode::VertexOutOfRange);
    }

    #[test]
    fn rejects_missing_header() {
        let err = FileGraphSource::from_reader("empty", "".as_bytes()).unwrap_err();
        assert_eq!(err.code(), mincut_core::GraphSourceErrorCode::Malformed);
    }

    #[test]
    fn ignores_blank_lines_between_edges() {
        let text = "2 1\n\n0 1 1\n\n";
        let source = FileGraphSource::from_reader("blanks", text.as_bytes()).unwrap();
        assert_eq!(source.edge_count(), 1);
    }

    #[test]
    fn slice_matches_edge_slice_bounds() {
        let text = "4 4\n0 1 1\n1 2 1\n2 3 1\n0 3 1\n";
        let source = FileGraphSource::from_reader("cycle", text.as_bytes()).unwrap();
        let first = source.slice(0, 2).unwrap();
        let second = source.slice(1, 2).unwrap();
        assert_eq!(first.len() + second.len(), 4);
    }
}
