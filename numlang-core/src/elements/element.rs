use std::fmt::Display;

use super::table::ELEMENTS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub number: u8,
    pub symbol: &'static str,
    pub name: &'static str,
    pub atomic_mass: f64,
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): Z={}, atomic mass {}",
            self.name, self.symbol, self.number, self.atomic_mass
        )
    }
}

// alternative spellings accepted by `lookup`
const ALIASES: &[(&str, &str)] = &[
    ("aluminum", "Al"),
    ("cesium", "Cs"),
    ("sulphur", "S"),
];

/// Finds an element by its exact symbol (`Fe`) or by its name in any case
/// (`iron`, `Iron`).
pub fn lookup(name: &str) -> Option<&'static Element> {
    if let Some(element) = ELEMENTS.iter().find(|element| element.symbol == name) {
        return Some(element);
    }

    let lowercase = name.to_lowercase();

    if let Some((_, symbol)) = ALIASES.iter().find(|(alias, _)| *alias == lowercase) {
        return ELEMENTS.iter().find(|element| element.symbol == *symbol);
    }

    ELEMENTS.iter().find(|element| element.name.to_lowercase() == lowercase)
}

pub fn by_number(number: u8) -> Option<&'static Element> {
    ELEMENTS.get((number as usize).checked_sub(1)?)
}
