//! Wavefront OBJ parsing into GPU-ready flattened buffers.
//!
//! OBJ stores positions, texture coordinates and normals in independent
//! arrays, referenced per face corner by 1-based index triplets. The GPU
//! wants one interleaved record per position plus a flat index list, so
//! the parser resolves each position's texcoord and normal from the
//! *first* face reference naming it, in file order. Later references to
//! the same position with different attribute indices are ignored on
//! purpose: one uv/normal per position, documented lossy behavior.

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use mesh::{MeshData, MeshVertex};

use crate::error::{ObjError, ObjResult};

/// Texcoord substituted when a face reference carries no `vt` index.
const DEFAULT_UV: [f32; 2] = [0.0, 0.0];
/// Normal substituted when a face reference carries no `vn` index.
const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Attributes of the first face reference seen for a position index.
#[derive(Clone, Copy, Debug)]
struct FirstRef {
    line: usize,
    texcoord: Option<usize>,
    normal: Option<usize>,
}

/// Load an OBJ model from a file path.
///
/// The file handle lives only for the duration of the read pass and is
/// released whether the load completes or fails.
pub fn load_model(path: impl AsRef<Path>) -> ObjResult<MeshData> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ObjError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loading OBJ model from {}", path.display());
    parse_model(BufReader::new(file)).map_err(|err| match err {
        // Read errors surfaced mid-stream get the path attached here.
        ObjError::Io { source, .. } => ObjError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse an OBJ source string.
pub fn parse_model_str(contents: &str) -> ObjResult<MeshData> {
    parse_model(io::Cursor::new(contents))
}

/// Parse OBJ text from a buffered reader.
///
/// One streaming pass collects the attribute arrays and face references,
/// then a resolution pass emits one interleaved vertex per position.
pub fn parse_model<R: BufRead>(reader: R) -> ObjResult<MeshData> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut texcoords: Vec<[f32; 2]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();

    let mut indices: Vec<u32> = Vec::new();
    let mut first_refs: HashMap<usize, FirstRef> = HashMap::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.map_err(|source| ObjError::Io {
            path: PathBuf::new(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else { continue };

        match tag {
            "v" => {
                let x = parse_f32(parts.next(), line_no, "x coordinate")?;
                let y = parse_f32(parts.next(), line_no, "y coordinate")?;
                let z = parse_f32(parts.next(), line_no, "z coordinate")?;
                positions.push([x, y, z]);
            }
            "vt" => {
                let u = parse_f32(parts.next(), line_no, "u coordinate")?;
                let v = parse_f32(parts.next(), line_no, "v coordinate")?;
                // Optional w is ignored; records stay 2 floats wide.
                texcoords.push([u, v]);
            }
            "vn" => {
                let nx = parse_f32(parts.next(), line_no, "nx coordinate")?;
                let ny = parse_f32(parts.next(), line_no, "ny coordinate")?;
                let nz = parse_f32(parts.next(), line_no, "nz coordinate")?;
                normals.push([nx, ny, nz]);
            }
            "f" => {
                let refs: Vec<&str> = parts.collect();
                if refs.len() < 3 {
                    return Err(ObjError::DegenerateFace {
                        line: line_no,
                        found: refs.len(),
                    });
                }
                for token in refs {
                    let (pos, texcoord, normal) = parse_face_vertex(token, line_no)?;
                    let index = u32::try_from(pos).map_err(|_| ObjError::MalformedRecord {
                        line: line_no,
                        reason: format!("position index {} exceeds u32 range", pos + 1),
                    })?;
                    indices.push(index);
                    first_refs.entry(pos).or_insert(FirstRef {
                        line: line_no,
                        texcoord,
                        normal,
                    });
                }
            }
            _ => {
                // o/g/s/mtllib/usemtl and friends.
            }
        }
    }

    // Face references pointing past the last `v` record have no vertex
    // to index into.
    for (&pos, first) in &first_refs {
        if pos >= positions.len() {
            return Err(ObjError::MalformedRecord {
                line: first.line,
                reason: format!(
                    "position index {} out of range (have {} positions)",
                    pos + 1,
                    positions.len()
                ),
            });
        }
    }

    let mut vertices = Vec::with_capacity(positions.len());
    for (pos, &position) in positions.iter().enumerate() {
        let first = first_refs
            .get(&pos)
            .copied()
            .ok_or(ObjError::UnresolvedPositionIndex { index: pos })?;
        let uv = match first.texcoord {
            Some(t) => *texcoords
                .get(t)
                .ok_or_else(|| out_of_range(first.line, "texcoord", t, texcoords.len()))?,
            None => DEFAULT_UV,
        };
        let normal = match first.normal {
            Some(n) => *normals
                .get(n)
                .ok_or_else(|| out_of_range(first.line, "normal", n, normals.len()))?,
            None => DEFAULT_NORMAL,
        };
        vertices.push(MeshVertex::new(position, uv, normal));
    }

    log::debug!(
        "parsed OBJ: {} positions, {} texcoords, {} normals, {} indices",
        positions.len(),
        texcoords.len(),
        normals.len(),
        indices.len()
    );

    Ok(MeshData::new(vertices, indices))
}

fn parse_f32(value: Option<&str>, line: usize, what: &str) -> ObjResult<f32> {
    let token = value.ok_or_else(|| ObjError::MalformedRecord {
        line,
        reason: format!("missing {what}"),
    })?;
    token.parse::<f32>().map_err(|_| ObjError::MalformedRecord {
        line,
        reason: format!("invalid {what} '{token}'"),
    })
}

/// Split a face element (`pos`, `pos/tex`, `pos/tex/norm` or `pos//norm`)
/// into 0-based indices. The texcoord and normal components are optional.
fn parse_face_vertex(token: &str, line: usize) -> ObjResult<(usize, Option<usize>, Option<usize>)> {
    let mut split = token.split('/');
    let pos = parse_index(split.next().unwrap_or(""), line, token)?;
    let texcoord = match split.next() {
        Some(field) if !field.is_empty() => Some(parse_index(field, line, token)?),
        _ => None,
    };
    let normal = match split.next() {
        Some(field) if !field.is_empty() => Some(parse_index(field, line, token)?),
        _ => None,
    };
    Ok((pos, texcoord, normal))
}

fn parse_index(field: &str, line: usize, token: &str) -> ObjResult<usize> {
    let raw: i64 = field.parse().map_err(|_| ObjError::MalformedRecord {
        line,
        reason: format!("invalid index '{field}' in face element '{token}'"),
    })?;
    if raw < 1 {
        return Err(ObjError::MalformedRecord {
            line,
            reason: format!("index {raw} in face element '{token}' is not 1-based"),
        });
    }
    Ok((raw - 1) as usize)
}

fn out_of_range(line: usize, what: &str, index: usize, len: usize) -> ObjError {
    ObjError::MalformedRecord {
        line,
        reason: format!("{what} index {} out of range (have {len})", index + 1),
    }
}
