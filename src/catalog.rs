//! # Size and Error-Correction Catalog
//!
//! Fixed option tables offered by the generator: five size tiers, four
//! error-correction levels and a palette of pre-approved colors.
//!
//! ## Size Profiles
//!
//! | id | Box (px) | Border (modules) | L | M | Q | H | Max version |
//! |----|----------|------------------|---|---|---|---|-------------|
//! | xs | 5 | 2 | ~100 | ~80 | ~60 | ~40 | 10 |
//! | s | 8 | 3 | ~200 | ~160 | ~120 | ~80 | 20 |
//! | m | 10 | 4 | ~300 | ~240 | ~180 | ~120 | 30 |
//! | l | 15 | 5 | ~500 | ~400 | ~300 | ~200 | 40 |
//! | xl | 20 | 6 | ~700 | ~550 | ~400 | ~280 | 40 |
//!
//! The character budgets are advisory. They are shown as a hint before
//! submission and quoted in the overflow warning, never used to reject input.
//!
//! ## Usage
//!
//! ```
//! use qrforge::catalog::{max_chars_for, SizeProfile};
//!
//! let profile = SizeProfile::by_id("nope");
//! assert_eq!(profile.id, "m");
//! assert_eq!(max_chars_for("m", "H"), "~120 символов");
//! ```

use qrcode::EcLevel;
use serde::Serialize;

/// Approximate character budget per error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharLimits {
    #[serde(rename = "L")]
    pub l: &'static str,
    #[serde(rename = "M")]
    pub m: &'static str,
    #[serde(rename = "Q")]
    pub q: &'static str,
    #[serde(rename = "H")]
    pub h: &'static str,
}

impl CharLimits {
    /// Budget for a level.
    pub fn for_level(&self, level: ErrorCorrection) -> &'static str {
        match level {
            ErrorCorrection::L => self.l,
            ErrorCorrection::M => self.m,
            ErrorCorrection::Q => self.q,
            ErrorCorrection::H => self.h,
        }
    }
}

/// # Size Profile
///
/// One rendering size tier.
///
/// - **box_size**: pixel width of one module
/// - **border**: quiet zone width, in modules
/// - **max_version**: largest symbol version the tier is sized for
///
/// The rendered image is square with side
/// `(modules + 2 * border) * box_size` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeProfile {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "desc")]
    pub description: &'static str,
    pub box_size: u32,
    pub border: u32,
    pub char_limits: CharLimits,
    pub max_version: i16,
}

/// Profile id used whenever a requested id is unknown.
pub const DEFAULT_SIZE_ID: &str = "m";

const PROFILES: [SizeProfile; 5] = [
    SizeProfile {
        id: "xs",
        name: "Очень маленький",
        description: "Для очень плотной печати",
        box_size: 5,
        border: 2,
        char_limits: CharLimits {
            l: "~100 символов",
            m: "~80 символов",
            q: "~60 символов",
            h: "~40 символов",
        },
        max_version: 10,
    },
    SizeProfile {
        id: "s",
        name: "Маленький",
        description: "Для документов и визиток",
        box_size: 8,
        border: 3,
        char_limits: CharLimits {
            l: "~200 символов",
            m: "~160 символов",
            q: "~120 символов",
            h: "~80 символов",
        },
        max_version: 20,
    },
    SizeProfile {
        id: "m",
        name: "Средний",
        description: "Универсальный размер",
        box_size: 10,
        border: 4,
        char_limits: CharLimits {
            l: "~300 символов",
            m: "~240 символов",
            q: "~180 символов",
            h: "~120 символов",
        },
        max_version: 30,
    },
    SizeProfile {
        id: "l",
        name: "Большой",
        description: "Для плакатов и дисплеев",
        box_size: 15,
        border: 5,
        char_limits: CharLimits {
            l: "~500 символов",
            m: "~400 символов",
            q: "~300 символов",
            h: "~200 символов",
        },
        max_version: 40,
    },
    SizeProfile {
        id: "xl",
        name: "Очень большой",
        description: "Для больших дисплеев и баннеров",
        box_size: 20,
        border: 6,
        char_limits: CharLimits {
            l: "~700 символов",
            m: "~550 символов",
            q: "~400 символов",
            h: "~280 символов",
        },
        max_version: 40,
    },
];

impl SizeProfile {
    /// All profiles, smallest first.
    pub fn catalog() -> &'static [SizeProfile] {
        &PROFILES
    }

    /// The medium profile.
    pub fn medium() -> &'static SizeProfile {
        &PROFILES[2]
    }

    /// Look up a profile by id, falling back to the medium profile.
    pub fn by_id(id: &str) -> &'static SizeProfile {
        Self::find(id).unwrap_or_else(Self::medium)
    }

    /// Exact-id lookup without fallback.
    pub fn find(id: &str) -> Option<&'static SizeProfile> {
        PROFILES.iter().find(|p| p.id == id)
    }

    /// Rendered image side in pixels for a symbol `modules` wide.
    #[inline]
    pub fn pixel_size(&self, modules: u32) -> u32 {
        (modules + 2 * self.border) * self.box_size
    }
}

/// # Error Correction Level
///
/// | Level | Recovery | Display name |
/// |-------|----------|--------------|
/// | L | ~7% | L (Низкий, 7%) |
/// | M | ~15% | M (Средний, 15%) |
/// | Q | ~25% | Q (Высокий, 25%) |
/// | H | ~30% | H (Максимальный, 30%) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

impl ErrorCorrection {
    pub const ALL: [ErrorCorrection; 4] = [Self::L, Self::M, Self::Q, Self::H];

    /// Parse a level code. Codes are matched exactly: `"h"` is not `H`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(Self::L),
            "M" => Some(Self::M),
            "Q" => Some(Self::Q),
            "H" => Some(Self::H),
            _ => None,
        }
    }

    /// Parse a level code, defaulting to M.
    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::L => "L (Низкий, 7%)",
            Self::M => "M (Средний, 15%)",
            Self::Q => "Q (Высокий, 25%)",
            Self::H => "H (Максимальный, 30%)",
        }
    }

    /// Encoder constant for this level.
    pub fn ec_level(self) -> EcLevel {
        match self {
            Self::L => EcLevel::L,
            Self::M => EcLevel::M,
            Self::Q => EcLevel::Q,
            Self::H => EcLevel::H,
        }
    }
}

/// Pre-approved colors. Matched case-sensitively, as listed.
pub const PALETTE: [&str; 16] = [
    "#000000", "#6c63ff", "#ff6584", "#36d1dc", "#ff9966", "#59c173", "#a17fe0", "#4a00e0",
    "#ff416c", "#5d26c1", "#00b09b", "#FF5733", "#33FF57", "#3357FF", "#FF33F6", "#F0FF33",
];

/// Advisory character budget for a size id and level code.
///
/// Unknown size ids use the medium profile; unknown level codes use the M
/// budget of the resolved profile.
pub fn max_chars_for(size_id: &str, level_code: &str) -> &'static str {
    SizeProfile::by_id(size_id)
        .char_limits
        .for_level(ErrorCorrection::resolve(level_code))
}
