//! Fake name generation
//!
//! Deterministic, seedable source of record names and mutation targets.
//!
//! ## Name Grammar
//! ```text
//! <color>-<8 digits>      e.g. "Teal-00412987"
//! ```
//! The color is drawn from [`COLORS`], the number uniformly from
//! `1..=99_999_999` and zero padded to eight digits.
//!
//! A generator is stateful and is never shared between threads: the
//! driver uses it to populate the store and then hands it to the
//! mutation loop, so a run is reproducible from its seed alone.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{BenchError, Result};

/// Color words used as the first half of every name
pub const COLORS: &[&str] = &[
    "AliceBlue", "AntiqueWhite", "Aqua", "Aquamarine", "Azure", "Beige", "Bisque", "Black",
    "BlanchedAlmond", "Blue", "BlueViolet", "Brown", "BurlyWood", "CadetBlue", "Chartreuse",
    "Chocolate", "Coral", "CornflowerBlue", "Cornsilk", "Crimson", "Cyan", "DarkBlue",
    "DarkCyan", "DarkGoldenRod", "DarkGray", "DarkGreen", "DarkKhaki", "DarkMagenta",
    "DarkOliveGreen", "DarkOrange", "DarkOrchid", "DarkRed", "DarkSalmon", "DarkSeaGreen",
    "DarkSlateBlue", "DarkSlateGray", "DarkTurquoise", "DarkViolet", "DeepPink", "DeepSkyBlue",
    "DimGray", "DodgerBlue", "FireBrick", "FloralWhite", "ForestGreen", "Fuchsia", "Gainsboro",
    "GhostWhite", "Gold", "GoldenRod", "Gray", "Green", "GreenYellow", "HoneyDew", "HotPink",
    "IndianRed", "Indigo", "Ivory", "Khaki", "Lavender", "LavenderBlush", "LawnGreen",
    "LemonChiffon", "LightBlue", "LightCoral", "LightCyan", "LightGoldenRodYellow",
    "LightGray", "LightGreen", "LightPink", "LightSalmon", "LightSeaGreen", "LightSkyBlue",
    "LightSlateGray", "LightSteelBlue", "LightYellow", "Lime", "LimeGreen", "Linen", "Magenta",
    "Maroon", "MediumAquaMarine", "MediumBlue", "MediumOrchid", "MediumPurple",
    "MediumSeaGreen", "MediumSlateBlue", "MediumSpringGreen", "MediumTurquoise",
    "MediumVioletRed", "MidnightBlue", "MintCream", "MistyRose", "Moccasin", "NavajoWhite",
    "Navy", "OldLace", "Olive", "OliveDrab", "Orange", "OrangeRed", "Orchid", "PaleGoldenRod",
    "PaleGreen", "PaleTurquoise", "PaleVioletRed", "PapayaWhip", "PeachPuff", "Peru", "Pink",
    "Plum", "PowderBlue", "Purple", "RebeccaPurple", "Red", "RosyBrown", "RoyalBlue",
    "SaddleBrown", "Salmon", "SandyBrown", "SeaGreen", "SeaShell", "Sienna", "Silver",
    "SkyBlue", "SlateBlue", "SlateGray", "Snow", "SpringGreen", "SteelBlue", "Tan", "Teal",
    "Thistle", "Tomato", "Turquoise", "Violet", "Wheat", "White", "WhiteSmoke", "Yellow",
    "YellowGreen",
];

/// Digits in the numeric suffix
pub const SUFFIX_DIGITS: usize = 8;

/// Largest numeric suffix (inclusive)
pub const MAX_SUFFIX: u32 = 99_999_999;

/// Longest name the generator can produce
pub const MAX_NAME_LEN: usize = longest_color() + 1 + SUFFIX_DIGITS;

const fn longest_color() -> usize {
    let mut longest = 0;
    let mut i = 0;
    while i < COLORS.len() {
        if COLORS[i].len() > longest {
            longest = COLORS[i].len();
        }
        i += 1;
    }
    longest
}

/// Seeded generator for names and record ids
#[derive(Debug, Clone)]
pub struct NameGenerator {
    rng: StdRng,
}

impl NameGenerator {
    /// Create a generator; equal seeds produce equal sequences
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produce the next `<color>-<8 digits>` name
    pub fn next_name(&mut self) -> String {
        let color = COLORS[self.rng.gen_range(0..COLORS.len())];
        let number = self.rng.gen_range(1..=MAX_SUFFIX);
        format!("{}-{:08}", color, number)
    }

    /// Pick an id uniformly from `0..population`
    ///
    /// An empty population has no id to pick and is rejected.
    pub fn next_id(&mut self, population: usize) -> Result<u64> {
        if population == 0 {
            return Err(BenchError::Config(
                "cannot pick an id from an empty population".to_string(),
            ));
        }
        Ok(self.rng.gen_range(0..population as u64))
    }
}

/// Check that `name` follows the generator grammar
///
/// A torn read of a name cell can produce a string that fails this check
/// even though every complete write passed it.
pub fn is_valid_name(name: &str) -> bool {
    let Some((color, digits)) = name.rsplit_once('-') else {
        return false;
    };

    COLORS.contains(&color)
        && digits.len() == SUFFIX_DIGITS
        && digits.bytes().all(|b| b.is_ascii_digit())
}
