//! Linear RGB triples as handed to the `lightColor` uniform.

use serde::{Deserialize, Deserializer};

/// Colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(packed: u32) -> Self {
        let channel = |shift: u32| ((packed >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Parse `#rrggbb`, `rrggbb` or the short `#rgb` form.
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.trim().trim_start_matches('#');
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_hex),
            3 => {
                let short = u32::from_str_radix(digits, 16).ok()?;
                let expand = |nibble: u32| (nibble & 0xf) * 0x11;
                let packed =
                    (expand(short >> 8) << 16) | (expand(short >> 4) << 8) | expand(short);
                Some(Self::from_hex(packed))
            }
            _ => None,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn scale(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    /// GLSL `mix(self, other, t)`.
    pub fn mix(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    fn in_gamut(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }
}

/// Accepted spellings of a colour option: `"#87cefa"`, `0x87cefa` or `[r, g, b]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RgbRepr {
    Text(String),
    Packed(u32),
    Triple([f32; 3]),
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let rgb = match RgbRepr::deserialize(deserializer)? {
            RgbRepr::Text(text) => Rgb::parse(&text)
                .ok_or_else(|| D::Error::custom(format!("invalid colour `{text}`")))?,
            RgbRepr::Packed(packed) if packed <= 0xff_ffff => Rgb::from_hex(packed),
            RgbRepr::Packed(packed) => {
                return Err(D::Error::custom(format!("colour {packed:#x} exceeds 0xffffff")));
            }
            RgbRepr::Triple([r, g, b]) => Rgb::new(r, g, b),
        };
        if !rgb.in_gamut() {
            return Err(D::Error::custom("colour channels must lie in [0, 1]"));
        }
        Ok(rgb)
    }
}
