use super::Color;

/// Fixed color for water entities.
pub const WATER: Color = Color(0xff4c4c);

/// Element colors, CPK/Jmol style, keyed by capitalized symbol.
pub(super) const ELEMENTS: &[(&str, Color)] = &[
    ("H", Color(0xffffff)),
    ("Li", Color(0xcc80ff)),
    ("C", Color(0x909090)),
    ("N", Color(0x3050f8)),
    ("O", Color(0xff0d0d)),
    ("F", Color(0x90e050)),
    ("Na", Color(0xab5cf2)),
    ("Mg", Color(0x8aff00)),
    ("P", Color(0xff8000)),
    ("S", Color(0xffff30)),
    ("Cl", Color(0x1ff01f)),
    ("K", Color(0x8f40d4)),
    ("Ca", Color(0x3dff00)),
    ("Mn", Color(0x9c7ac7)),
    ("Fe", Color(0xe06633)),
    ("Co", Color(0xf090a0)),
    ("Ni", Color(0x50d050)),
    ("Cu", Color(0xc88033)),
    ("Zn", Color(0x7d80b0)),
    ("Se", Color(0xffa100)),
    ("Br", Color(0xa62929)),
    ("Rb", Color(0x702eb0)),
    ("Sr", Color(0x00ff00)),
    ("Cd", Color(0xffd98f)),
    ("I", Color(0x940094)),
    ("Cs", Color(0x57178f)),
    ("Ba", Color(0x00c900)),
    ("Hg", Color(0xb8b8d0)),
];

/// Color of a chemical element, case-insensitive.
#[must_use]
pub fn element_color(symbol: &str) -> Option<Color> {
    ELEMENTS
        .iter()
        .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
        .map(|&(_, color)| color)
}
