//! Colour tags understood by every display surface

use serde::{Deserialize, Serialize};

/// Eight-colour terminal palette
///
/// Physics code treats a colour as an opaque tag that travels with a glyph;
/// only surfaces map it onto something displayable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colour {
    #[default]
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}
