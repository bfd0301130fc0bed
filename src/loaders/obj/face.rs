use super::index::NumericReader;
use super::tokenize::split_fields;
use super::types::RawIndex;

/// Parses one `pos[/uv][/normal]` face token. An empty field (as in `5//2`)
/// means the attribute is not referenced by this corner.
pub fn parse_face_corner(token: &str, numbers: &mut NumericReader, line_number: usize) -> RawIndex {
    let fields = split_fields(token, '/');
    let position = numbers.index(fields[0], line_number);

    let mut optional = |slot: usize| {
        fields
            .get(slot)
            .filter(|field| !field.is_empty())
            .map(|field| numbers.index(field, line_number))
    };
    let uv = optional(1);
    let normal = optional(2);

    RawIndex::new(position, uv, normal)
}

/// Face corners collected for the sub-mesh being read, already split into
/// triangles.
#[derive(Debug, Clone, Default)]
pub struct FaceAccumulator {
    corners: Vec<RawIndex>,
}

impl FaceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the triangles of one `f` line. Quads are split into (1,2,3) and
    /// (1,3,4); corners past the fourth are ignored.
    pub fn create_face(&mut self, line: &str, numbers: &mut NumericReader, line_number: usize) {
        let tokens: Vec<&str> = line.split_whitespace().skip(1).collect();
        if tokens.len() < 3 {
            log::warn!(
                "line {}: face needs at least 3 vertices, skipping '{}'",
                line_number,
                line
            );
            return;
        }
        if tokens.len() > 4 {
            log::warn!(
                "line {}: only the first 4 of {} face vertices are used",
                line_number,
                tokens.len()
            );
        }

        let corners: Vec<RawIndex> = tokens
            .iter()
            .take(4)
            .map(|token| parse_face_corner(token, numbers, line_number))
            .collect();

        self.corners.extend_from_slice(&corners[..3]);
        if corners.len() == 4 {
            self.corners
                .extend_from_slice(&[corners[0], corners[2], corners[3]]);
        }
    }

    pub fn corners(&self) -> &[RawIndex] {
        &self.corners
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    pub fn len(&self) -> usize {
        self.corners.len()
    }

    pub fn clear(&mut self) {
        self.corners.clear();
    }
}
