//! Tile, meld, action and outcome formatters for terminal display.
//!
//! Pure functions that turn engine values into the short strings the `deal`,
//! `replay` and `sim` commands print. Tiles render as their face names (`3m`,
//! `Red`) or, on request, as the Unicode Mahjong tile glyphs.
//!
//! ## Unicode vs ASCII
//!
//! [`supports_unicode`] mirrors the usual terminal detection: modern Windows
//! terminals are recognised through environment variables and every Unix-like
//! system is assumed to cope. The glyph block is poorly covered by many fonts,
//! so commands only use it when asked to.
//!
//! ## Example
//!
//! ```rust
//! use majiang_cli::formatters::{format_hand, format_tile};
//! use majiang_engine::tiles::TileId;
//!
//! let one_dot = TileId::new(36).unwrap();
//! assert_eq!(format_tile(one_dot, false), "1p");
//! assert_eq!(format_tile(one_dot, true), "🀙");
//! assert_eq!(format_hand(&[one_dot], None, false), "[1p]");
//! ```

use majiang_engine::game::Outcome;
use majiang_engine::logger::Action;
use majiang_engine::player::{MeldKind, OpenedSet};
use majiang_engine::tiles::{Suit, TileId};

/// Check if the terminal is likely to render Unicode tile glyphs.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// Unicode glyph for a tile's face (U+1F000 block).
pub fn tile_glyph(tile: TileId) -> char {
    let face = tile.face();
    let base = match face.suit {
        Suit::Honor => 0x1F000,
        Suit::Characters => 0x1F007,
        Suit::Bamboo => 0x1F010,
        Suit::Dots => 0x1F019,
    };
    char::from_u32(base + u32::from(face.rank) - 1).unwrap_or('?')
}

/// Format one tile as its face name or glyph.
pub fn format_tile(tile: TileId, unicode: bool) -> String {
    if unicode {
        tile_glyph(tile).to_string()
    } else {
        tile.name().to_string()
    }
}

fn join(tiles: &[TileId], unicode: bool) -> String {
    tiles
        .iter()
        .map(|t| format_tile(*t, unicode))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a concealed hand in bracket notation, the drawn tile set apart.
///
/// # Example
///
/// ```rust
/// use majiang_engine::tiles::TileId;
/// # use majiang_cli::formatters::format_hand;
///
/// let t = |raw| TileId::new(raw).unwrap();
/// assert_eq!(format_hand(&[t(0), t(4)], Some(t(135)), false), "[1m 2m] + White");
/// assert_eq!(format_hand(&[], None, false), "[]");
/// ```
pub fn format_hand(hand: &[TileId], picked: Option<TileId>, unicode: bool) -> String {
    let base = format!("[{}]", join(hand, unicode));
    match picked {
        Some(t) => format!("{} + {}", base, format_tile(t, unicode)),
        None => base,
    }
}

/// Format an exposed set, e.g. `peng(5s 5s 5s) from West`.
pub fn format_meld(set: &OpenedSet, unicode: bool) -> String {
    let kind = match set.kind {
        MeldKind::Chi => "chi",
        MeldKind::Peng => "peng",
        MeldKind::Gang => "gang",
        MeldKind::ConcealedGang => "angang",
    };
    if set.kind == MeldKind::ConcealedGang {
        format!("{}({})", kind, join(&set.tiles, unicode))
    } else {
        format!("{}({}) from {}", kind, join(&set.tiles, unicode), set.from)
    }
}

/// Format an Action as a human-readable string.
///
/// # Example
///
/// ```rust
/// use majiang_engine::logger::Action;
/// use majiang_engine::tiles::TileId;
/// # use majiang_cli::formatters::format_action;
///
/// assert_eq!(format_action(&Action::Pass), "pass");
/// assert_eq!(format_action(&Action::Discard(TileId::new(9).unwrap())), "discard 3m");
/// ```
pub fn format_action(action: &Action) -> String {
    match action {
        Action::Discard(t) => format!("discard {}", t.name()),
        Action::ConcealedGang(t) => format!("angang {}", join(t, false)),
        Action::SelfDrawWin => "self-drawn win".to_string(),
        Action::Pass => "pass".to_string(),
        Action::Chi(t) => format!("chi {}", join(t, false)),
        Action::Peng(t) => format!("peng {}", join(t, false)),
        Action::Gang(t) => format!("gang {}", join(t, false)),
        Action::Hu => "hu".to_string(),
    }
}

/// Format how a hand ended; `None` reads as unfinished.
pub fn format_outcome(outcome: Option<&Outcome>) -> String {
    match outcome {
        Some(Outcome::SelfDrawnWin { seat, tile: Some(t) }) => {
            format!("{} wins by self-draw on {}", seat, t.name())
        }
        Some(Outcome::SelfDrawnWin { seat, tile: None }) => format!("{} wins by self-draw", seat),
        Some(Outcome::DiscardWin { seat, tile, from }) => {
            format!("{} wins on {}'s {}", seat, from, tile.name())
        }
        Some(Outcome::Exhausted) => "exhausted".to_string(),
        None => "unfinished".to_string(),
    }
}
