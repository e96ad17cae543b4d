//! Curated palettes and their cyclic iterator.
//!
//! The palettes are hand-picked to avoid grays, which are reserved for
//! unannotated context in highlight images.

use super::Color;

/// Base colors for polymer entities.
pub const POLYMER: &[Color] = &[
    Color(0x1b9e77),
    Color(0xd95f02),
    Color(0x7570b3),
    Color(0xe7298a),
    Color(0x66a61e),
    Color(0xe6ab02),
    Color(0xa6761d),
    Color(0x1f78b4),
    Color(0xb2df8a),
    Color(0xfb9a99),
    Color(0xfdbf6f),
    Color(0xcab2d6),
];

/// Base colors for ligand (non-polymer) entities.
pub const LIGAND: &[Color] = &[
    Color(0x8dd3c7),
    Color(0xfb8072),
    Color(0x80b1d3),
    Color(0xfdb462),
    Color(0xb3de69),
    Color(0xfccde5),
    Color(0xbc80bd),
    Color(0xccebc5),
    Color(0xffed6f),
];

/// Highlight colors for domain annotations.
pub const ANNOTATION: &[Color] = &[
    Color(0xe41a1c),
    Color(0x377eb8),
    Color(0x4daf4a),
    Color(0x984ea3),
    Color(0xff7f00),
    Color(0xa65628),
    Color(0xf781bf),
];

/// Highlight colors for modified residues.
pub const MODRES: &[Color] = &[
    Color(0xe7298a),
    Color(0x66a61e),
    Color(0xe6ab02),
    Color(0x7570b3),
];

/// Endless iterator over a palette with inspectable position.
///
/// Each class of entity gets its own instance, so drawing a color for one
/// class never shifts the sequence of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclicPalette {
    colors: &'static [Color],
    position: usize,
}

impl CyclicPalette {
    /// Start at the beginning of `colors`.
    #[must_use]
    pub fn new(colors: &'static [Color]) -> Self {
        Self {
            colors,
            position: 0,
        }
    }

    /// Polymer palette.
    #[must_use]
    pub fn polymer() -> Self {
        Self::new(POLYMER)
    }

    /// Ligand palette.
    #[must_use]
    pub fn ligand() -> Self {
        Self::new(LIGAND)
    }

    /// Domain-annotation palette.
    #[must_use]
    pub fn annotation() -> Self {
        Self::new(ANNOTATION)
    }

    /// Modified-residue palette.
    #[must_use]
    pub fn modres() -> Self {
        Self::new(MODRES)
    }

    /// Number of colors drawn so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Draw the next color, wrapping after the last one. An empty palette
    /// yields [`Color::GRAY`].
    pub fn next_color(&mut self) -> Color {
        if self.colors.is_empty() {
            return Color::GRAY;
        }
        let color = self.colors[self.position % self.colors.len()];
        self.position += 1;
        color
    }
}

impl Iterator for CyclicPalette {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        Some(self.next_color())
    }
}
