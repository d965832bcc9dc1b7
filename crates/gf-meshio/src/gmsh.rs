//! Reader for the ASCII gmsh 2.x format.
//!
//! Only the sections needed to build a [`Mesh`] are interpreted:
//! `$MeshFormat`, `$PhysicalNames`, `$Nodes` and `$Elements`. Other sections
//! are skipped. The highest-dimension elements become cells, their
//! physical tag the material id; tagged lower-dimension elements become
//! vertex groups.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::str::FromStr;

use gf_components::CoordSysInfo;
use gf_core::{KernelError, KernelResult};
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::kernel::MeshIoKernel;
use crate::mesh::Mesh;

/// (dimension, node count) of the supported gmsh element types.
fn element_shape(elem_type: u32) -> Option<(usize, usize)> {
    match elem_type {
        15 => Some((0, 1)), // point
        1 => Some((1, 2)),  // line
        2 => Some((2, 3)),  // triangle
        3 => Some((2, 4)),  // quadrangle
        4 => Some((3, 4)),  // tetrahedron
        5 => Some((3, 8)),  // hexahedron
        _ => None,
    }
}

struct Element {
    line: usize,
    elem_type: u32,
    dim: usize,
    physical: Option<i64>,
    nodes: Vec<u64>,
}

/// Non-blank, trimmed lines with their 1-based line numbers.
struct Cursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        self.lines
            .by_ref()
            .map(|(i, l)| (i + 1, l.trim()))
            .find(|(_, l)| !l.is_empty())
    }

    fn expect(&mut self, what: &str) -> MeshResult<(usize, &'a str)> {
        self.next_line().ok_or_else(|| MeshError::Parse {
            line: 0,
            message: format!("unexpected end of file while reading {}", what),
        })
    }

    fn expect_exact(&mut self, tag: &str) -> MeshResult<()> {
        let (line, text) = self.expect(tag)?;
        if text != tag {
            return Err(MeshError::Parse {
                line,
                message: format!("expected {}, found '{}'", tag, text),
            });
        }
        Ok(())
    }

    fn count(&mut self, what: &str) -> MeshResult<usize> {
        let (line, text) = self.expect(what)?;
        field(line, Some(text), what)
    }
}

fn field<T: FromStr>(line: usize, token: Option<&str>, what: &str) -> MeshResult<T> {
    let token = token.ok_or_else(|| MeshError::Parse {
        line,
        message: format!("missing {}", what),
    })?;
    token.parse().map_err(|_| MeshError::Parse {
        line,
        message: format!("invalid {} '{}'", what, token),
    })
}

fn check_format(cursor: &mut Cursor<'_>) -> MeshResult<()> {
    match cursor.next_line() {
        Some((_, "$MeshFormat")) => {}
        _ => return Err(MeshError::Format("file does not start with $MeshFormat".into())),
    }
    let (line, text) = cursor.expect("mesh format")?;
    let mut tokens = text.split_whitespace();
    let version: String = field(line, tokens.next(), "format version")?;
    let file_type: u32 = field(line, tokens.next(), "file type")?;
    if !version.starts_with("2.") {
        return Err(MeshError::Format(format!("version {}", version)));
    }
    if file_type != 0 {
        return Err(MeshError::Format("binary file".into()));
    }
    cursor.expect_exact("$EndMeshFormat")
}

fn read_names(
    cursor: &mut Cursor<'_>,
    names: &mut HashMap<(usize, i64), String>,
) -> MeshResult<()> {
    let n = cursor.count("number of physical names")?;
    for _ in 0..n {
        let (line, text) = cursor.expect("physical name")?;
        let mut tokens = text.splitn(3, char::is_whitespace);
        let dim: usize = field(line, tokens.next(), "physical dimension")?;
        let tag: i64 = field(line, tokens.next(), "physical tag")?;
        let name = tokens.next().unwrap_or("").trim().trim_matches('"');
        names.insert((dim, tag), name.to_string());
    }
    cursor.expect_exact("$EndPhysicalNames")
}

fn read_nodes(
    cursor: &mut Cursor<'_>,
    ids: &mut HashMap<u64, usize>,
    points: &mut Vec<[f64; 3]>,
) -> MeshResult<()> {
    // Counts are untrusted; grow as lines actually arrive.
    let n = cursor.count("number of nodes")?;
    for _ in 0..n {
        let (line, text) = cursor.expect("node")?;
        let mut tokens = text.split_whitespace();
        let id: u64 = field(line, tokens.next(), "node id")?;
        let mut xyz = [0.0; 3];
        for (c, name) in xyz.iter_mut().zip(["x", "y", "z"]) {
            *c = field(line, tokens.next(), name)?;
        }
        if ids.insert(id, points.len()).is_some() {
            return Err(MeshError::Parse {
                line,
                message: format!("duplicate node id {}", id),
            });
        }
        points.push(xyz);
    }
    cursor.expect_exact("$EndNodes")
}

fn read_elements(cursor: &mut Cursor<'_>, elements: &mut Vec<Element>) -> MeshResult<()> {
    let n = cursor.count("number of elements")?;
    for _ in 0..n {
        let (line, text) = cursor.expect("element")?;
        let mut tokens = text.split_whitespace();
        let _id: u64 = field(line, tokens.next(), "element id")?;
        let elem_type: u32 = field(line, tokens.next(), "element type")?;
        let (dim, num_nodes) = element_shape(elem_type).ok_or_else(|| MeshError::Parse {
            line,
            message: format!("unsupported element type {}", elem_type),
        })?;

        let num_tags: usize = field(line, tokens.next(), "number of tags")?;
        let mut physical = None;
        for i in 0..num_tags {
            let tag: i64 = field(line, tokens.next(), "tag")?;
            if i == 0 {
                physical = Some(tag);
            }
        }

        let nodes = (0..num_nodes)
            .map(|_| field(line, tokens.next(), "element node"))
            .collect::<MeshResult<Vec<u64>>>()?;
        elements.push(Element {
            line,
            elem_type,
            dim,
            physical,
            nodes,
        });
    }
    cursor.expect_exact("$EndElements")
}

fn skip_section(cursor: &mut Cursor<'_>, name: &str) -> MeshResult<()> {
    let end = format!("$End{}", name);
    loop {
        let (_, text) = cursor.expect(&end)?;
        if text == end {
            return Ok(());
        }
    }
}

/// Build a mesh from gmsh text.
///
/// Coordinates keep the first `space_dim` components and are multiplied
/// by `to_meters`.
pub fn parse(text: &str, space_dim: usize, to_meters: f64) -> MeshResult<Mesh> {
    let mut cursor = Cursor::new(text);
    check_format(&mut cursor)?;

    let mut names = HashMap::new();
    let mut ids = HashMap::new();
    let mut points = Vec::new();
    let mut elements = Vec::new();
    let (mut have_nodes, mut have_elements) = (false, false);

    while let Some((line, header)) = cursor.next_line() {
        let Some(section) = header.strip_prefix('$') else {
            return Err(MeshError::Parse {
                line,
                message: format!("expected section header, found '{}'", header),
            });
        };
        match section {
            "PhysicalNames" => read_names(&mut cursor, &mut names)?,
            "Nodes" => {
                read_nodes(&mut cursor, &mut ids, &mut points)?;
                have_nodes = true;
            }
            "Elements" => {
                read_elements(&mut cursor, &mut elements)?;
                have_elements = true;
            }
            other => skip_section(&mut cursor, other)?,
        }
    }
    if !have_nodes {
        return Err(MeshError::MissingSection("Nodes"));
    }
    if !have_elements {
        return Err(MeshError::MissingSection("Elements"));
    }

    let cell_dim = elements
        .iter()
        .map(|e| e.dim)
        .max()
        .ok_or_else(|| MeshError::Format("mesh has no elements".into()))?;

    let index = |e: &Element, node: u64| {
        ids.get(&node).copied().ok_or_else(|| MeshError::Parse {
            line: e.line,
            message: format!("unknown node {}", node),
        })
    };

    let mut mesh = Mesh {
        cell_dim,
        space_dim,
        ..Mesh::default()
    };
    let mut cell_type = None;
    for e in elements.iter().filter(|e| e.dim == cell_dim) {
        match cell_type {
            None => {
                cell_type = Some(e.elem_type);
                mesh.corners = e.nodes.len();
            }
            Some(t) if t != e.elem_type => {
                return Err(MeshError::Parse {
                    line: e.line,
                    message: "mixed cell types".to_string(),
                });
            }
            Some(_) => {}
        }
        for &node in &e.nodes {
            mesh.cells.push(index(e, node)?);
        }
        mesh.material_ids.push(e.physical.unwrap_or(0));
    }

    for e in elements.iter().filter(|e| e.dim < cell_dim) {
        let Some(tag) = e.physical else { continue };
        let name = names
            .get(&(e.dim, tag))
            .cloned()
            .unwrap_or_else(|| tag.to_string());
        let group = mesh.groups.entry(name).or_default();
        for &node in &e.nodes {
            group.push(index(e, node)?);
        }
    }
    for group in mesh.groups.values_mut() {
        group.sort_unstable();
        group.dedup();
    }

    let keep = space_dim.min(3);
    mesh.coordinates = points
        .iter()
        .flat_map(|p| p[..keep].iter().map(|c| c * to_meters))
        .collect();

    mesh.check()?;
    Ok(mesh)
}

/// Kernel reading gmsh files.
#[derive(Debug, Default)]
pub struct GmshKernel {
    filename: String,
    coordsys: Option<CoordSysInfo>,
    debug: bool,
    interpolate: bool,
    ready: bool,
}

impl GmshKernel {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn interpolate(&self) -> bool {
        self.interpolate
    }

    fn io_error(&self, err: std::io::Error) -> MeshError {
        MeshError::Io {
            path: self.filename.clone(),
            message: err.to_string(),
        }
    }
}

impl MeshIoKernel for GmshKernel {
    fn set_filename(&mut self, filename: &str) {
        self.filename = filename.to_string();
    }

    fn set_coordsys(&mut self, coordsys: CoordSysInfo) {
        self.coordsys = Some(coordsys);
    }

    fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    fn set_interpolate(&mut self, interpolate: bool) {
        self.interpolate = interpolate;
    }

    fn initialize(&mut self) -> KernelResult<()> {
        let file = File::open(&self.filename).map_err(|e| self.io_error(e))?;
        let mut first = None;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| self.io_error(e))?;
            if !line.trim().is_empty() {
                first = Some(line);
                break;
            }
        }
        if first.as_deref().map(str::trim) != Some("$MeshFormat") {
            return Err(KernelError::new(format!(
                "'{}' is not a gmsh file (missing $MeshFormat)",
                self.filename
            )));
        }
        self.ready = true;
        Ok(())
    }

    fn read(&mut self) -> KernelResult<Mesh> {
        if !self.ready {
            return Err(KernelError::new("gmsh reader not initialized"));
        }
        let text = std::fs::read_to_string(&self.filename).map_err(|e| self.io_error(e))?;
        let (space_dim, to_meters) = self
            .coordsys
            .map_or((3, 1.0), |cs| (cs.space_dim, cs.to_meters));
        let mesh = parse(&text, space_dim, to_meters)?;
        if self.debug {
            debug!(
                filename = %self.filename,
                vertices = mesh.num_vertices(),
                cells = mesh.num_cells(),
                groups = mesh.groups.len(),
                "gmsh mesh read"
            );
        }
        Ok(mesh)
    }

    fn write(&mut self, _mesh: &Mesh) -> KernelResult<()> {
        Err(MeshError::WriteUnsupported("the gmsh reader").into())
    }
}
