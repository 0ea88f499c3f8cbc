//! Rendering options and the typographic symbol table.

use std::collections::HashMap;

/// Typographic characters the phrase grammar recognizes. The renderer
/// replaces each one with the entity registered for it in
/// [`Options::symbols`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Apostrophe,
    Ellipsis,
    Emdash,
    Endash,
    Trademark,
    Registered,
    Copyright,
    Half,
    Quarter,
    ThreeQuarters,
    Degrees,
    PlusMinus,
}

/// Options controlling how a parsed document is rendered.
#[derive(Debug, Clone)]
pub struct Options {
    /// When `true` (the default), a single newline inside a block becomes
    /// `<br />`. When `false` the newline is kept verbatim.
    pub line_wrap: bool,
    /// Replacement strings for typographic symbols. Replacements are
    /// emitted as-is, so they may contain character entities.
    pub symbols: HashMap<Symbol, String>,
}

impl Default for Options {
    fn default() -> Self {
        let mut symbols = HashMap::new();
        symbols.insert(Symbol::Apostrophe, "&#8217;".to_string());
        symbols.insert(Symbol::Ellipsis, "&#8230;".to_string());
        symbols.insert(Symbol::Emdash, "&#8212;".to_string());
        // The endash parser consumes the surrounding spaces, so the
        // replacement restores them.
        symbols.insert(Symbol::Endash, " &#8211; ".to_string());
        symbols.insert(Symbol::Trademark, "&#8482;".to_string());
        symbols.insert(Symbol::Registered, "&#174;".to_string());
        symbols.insert(Symbol::Copyright, "&#169;".to_string());
        symbols.insert(Symbol::Half, "&#189;".to_string());
        symbols.insert(Symbol::Quarter, "&#188;".to_string());
        symbols.insert(Symbol::ThreeQuarters, "&#190;".to_string());
        symbols.insert(Symbol::Degrees, "&#176;".to_string());
        symbols.insert(Symbol::PlusMinus, "&#177;".to_string());
        Self {
            line_wrap: true,
            symbols,
        }
    }
}
