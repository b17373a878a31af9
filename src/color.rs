//! CSS color resolution for `fill`/`stroke` normalization.
//!
//! Colors resolve the way a canvas `fillStyle` does: opaque colors print as
//! `#rrggbb`, translucent ones as `rgba(r, g, b, a)`.

use std::fmt;

use crate::error::SvgError;

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in `0.0..=1.0`
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse a CSS color: hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`, or a
    /// named color. Case-insensitive.
    pub fn parse(input: &str) -> Option<Self> {
        let lower = input.trim().to_ascii_lowercase();

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(args) = function_args(&lower, &["rgba", "rgb"]) {
            return parse_rgb_args(args);
        }
        if let Some(args) = function_args(&lower, &["hsla", "hsl"]) {
            return parse_hsl_args(args);
        }
        if lower == "transparent" {
            return Some(Self {
                r: 0,
                g: 0,
                b: 0,
                a: 0.0,
            });
        }
        named_color(&lower).map(|(r, g, b)| Self::rgb(r, g, b))
    }

    fn alpha_byte(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alpha = self.alpha_byte();
        if alpha == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                format_alpha(alpha)
            )
        }
    }
}

/// Shortest decimal that maps back onto the same 8-bit alpha.
fn format_alpha(alpha: u8) -> String {
    if alpha == 0 {
        return "0".into();
    }
    let exact = f64::from(alpha) / 255.0;
    for precision in 1..=3 {
        let scale = 10f64.powi(precision);
        let rounded = (exact * scale).round() / scale;
        if (rounded * 255.0).round() as u8 == alpha {
            let s = format!("{:.prec$}", rounded, prec = precision as usize);
            return s.trim_end_matches('0').trim_end_matches('.').to_string();
        }
    }
    format!("{:.3}", exact)
}

/// Normalize one `fill`/`stroke` value.
///
/// `none`, `currentColor`, `inherit` and `url(...)` paint references are
/// returned unchanged; every other value must be a color.
pub fn normalize_paint(attribute: &str, value: &str) -> Result<String, SvgError> {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();
    if value == "none" || lower == "currentcolor" || lower == "inherit" || lower.starts_with("url(")
    {
        return Ok(value.to_string());
    }

    Color::parse(trimmed)
        .map(|c| c.to_string())
        .ok_or_else(|| SvgError::ColorResolution {
            attribute: attribute.to_string(),
            value: value.to_string(),
        })
}

fn function_args<'a>(input: &'a str, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        input
            .strip_prefix(name)?
            .trim_start()
            .strip_prefix('(')?
            .strip_suffix(')')
    })
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(Color {
        r,
        g,
        b,
        a: f64::from(a) / 255.0,
    })
}

/// Split `a, b, c[, d]` or `a b c[ / d]` into color components and alpha.
fn split_components(args: &str) -> Option<(Vec<&str>, Option<&str>)> {
    if args.contains(',') {
        let mut parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let alpha = if parts.len() == 4 { parts.pop() } else { None };
        (parts.len() == 3).then_some((parts, alpha))
    } else {
        let (channels, alpha) = match args.split_once('/') {
            Some((c, a)) => (c, Some(a.trim())),
            None => (args, None),
        };
        let parts: Vec<&str> = channels.split_whitespace().collect();
        (parts.len() == 3).then_some((parts, alpha))
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_percentage(s: &str) -> Option<f64> {
    parse_number(s.strip_suffix('%')?)
}

fn parse_rgb_channel(s: &str) -> Option<u8> {
    let value = match parse_percentage(s) {
        Some(p) => p * 2.55,
        None => parse_number(s)?,
    };
    Some(value.clamp(0.0, 255.0).round() as u8)
}

fn parse_alpha(s: Option<&str>) -> Option<f64> {
    let Some(s) = s else {
        return Some(1.0);
    };
    let value = match parse_percentage(s) {
        Some(p) => p / 100.0,
        None => parse_number(s)?,
    };
    Some(value.clamp(0.0, 1.0))
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let (parts, alpha) = split_components(args)?;
    Some(Color {
        r: parse_rgb_channel(parts[0])?,
        g: parse_rgb_channel(parts[1])?,
        b: parse_rgb_channel(parts[2])?,
        a: parse_alpha(alpha)?,
    })
}

fn parse_hsl_args(args: &str) -> Option<Color> {
    let (parts, alpha) = split_components(args)?;
    let hue = parse_number(parts[0].strip_suffix("deg").unwrap_or(parts[0]))?;
    let saturation = (parse_percentage(parts[1])? / 100.0).clamp(0.0, 1.0);
    let lightness = (parse_percentage(parts[2])? / 100.0).clamp(0.0, 1.0);
    let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
    Some(Color {
        r,
        g,
        b,
        a: parse_alpha(alpha)?,
    })
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let hue = hue.rem_euclid(360.0);
    let channel = |n: f64| {
        let k = (n + hue / 30.0) % 12.0;
        let a = saturation * lightness.min(1.0 - lightness);
        let value = lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
        (value * 255.0).round() as u8
    };
    (channel(0.0), channel(8.0), channel(4.0))
}

fn named_color(name: &str) -> Option<(u8, u8, u8)> {
    NAMED_COLORS
        .binary_search_by(|(n, _)| n.cmp(&name))
        .ok()
        .map(|i| NAMED_COLORS[i].1)
}

/// CSS named colors, sorted by name.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("aliceblue", (240, 248, 255)),
    ("antiquewhite", (250, 235, 215)),
    ("aqua", (0, 255, 255)),
    ("aquamarine", (127, 255, 212)),
    ("azure", (240, 255, 255)),
    ("beige", (245, 245, 220)),
    ("bisque", (255, 228, 196)),
    ("black", (0, 0, 0)),
    ("blanchedalmond", (255, 235, 205)),
    ("blue", (0, 0, 255)),
    ("blueviolet", (138, 43, 226)),
    ("brown", (165, 42, 42)),
    ("burlywood", (222, 184, 135)),
    ("cadetblue", (95, 158, 160)),
    ("chartreuse", (127, 255, 0)),
    ("chocolate", (210, 105, 30)),
    ("coral", (255, 127, 80)),
    ("cornflowerblue", (100, 149, 237)),
    ("cornsilk", (255, 248, 220)),
    ("crimson", (220, 20, 60)),
    ("cyan", (0, 255, 255)),
    ("darkblue", (0, 0, 139)),
    ("darkcyan", (0, 139, 139)),
    ("darkgoldenrod", (184, 134, 11)),
    ("darkgray", (169, 169, 169)),
    ("darkgreen", (0, 100, 0)),
    ("darkgrey", (169, 169, 169)),
    ("darkkhaki", (189, 183, 107)),
    ("darkmagenta", (139, 0, 139)),
    ("darkolivegreen", (85, 107, 47)),
    ("darkorange", (255, 140, 0)),
    ("darkorchid", (153, 50, 204)),
    ("darkred", (139, 0, 0)),
    ("darksalmon", (233, 150, 122)),
    ("darkseagreen", (143, 188, 143)),
    ("darkslateblue", (72, 61, 139)),
    ("darkslategray", (47, 79, 79)),
    ("darkslategrey", (47, 79, 79)),
    ("darkturquoise", (0, 206, 209)),
    ("darkviolet", (148, 0, 211)),
    ("deeppink", (255, 20, 147)),
    ("deepskyblue", (0, 191, 255)),
    ("dimgray", (105, 105, 105)),
    ("dimgrey", (105, 105, 105)),
    ("dodgerblue", (30, 144, 255)),
    ("firebrick", (178, 34, 34)),
    ("floralwhite", (255, 250, 240)),
    ("forestgreen", (34, 139, 34)),
    ("fuchsia", (255, 0, 255)),
    ("gainsboro", (220, 220, 220)),
    ("ghostwhite", (248, 248, 255)),
    ("gold", (255, 215, 0)),
    ("goldenrod", (218, 165, 32)),
    ("gray", (128, 128, 128)),
    ("green", (0, 128, 0)),
    ("greenyellow", (173, 255, 47)),
    ("grey", (128, 128, 128)),
    ("honeydew", (240, 255, 240)),
    ("hotpink", (255, 105, 180)),
    ("indianred", (205, 92, 92)),
    ("indigo", (75, 0, 130)),
    ("ivory", (255, 255, 240)),
    ("khaki", (240, 230, 140)),
    ("lavender", (230, 230, 250)),
    ("lavenderblush", (255, 240, 245)),
    ("lawngreen", (124, 252, 0)),
    ("lemonchiffon", (255, 250, 205)),
    ("lightblue", (173, 216, 230)),
    ("lightcoral", (240, 128, 128)),
    ("lightcyan", (224, 255, 255)),
    ("lightgoldenrodyellow", (250, 250, 210)),
    ("lightgray", (211, 211, 211)),
    ("lightgreen", (144, 238, 144)),
    ("lightgrey", (211, 211, 211)),
    ("lightpink", (255, 182, 193)),
    ("lightsalmon", (255, 160, 122)),
    ("lightseagreen", (32, 178, 170)),
    ("lightskyblue", (135, 206, 250)),
    ("lightslategray", (119, 136, 153)),
    ("lightslategrey", (119, 136, 153)),
    ("lightsteelblue", (176, 196, 222)),
    ("lightyellow", (255, 255, 224)),
    ("lime", (0, 255, 0)),
    ("limegreen", (50, 205, 50)),
    ("linen", (250, 240, 230)),
    ("magenta", (255, 0, 255)),
    ("maroon", (128, 0, 0)),
    ("mediumaquamarine", (102, 205, 170)),
    ("mediumblue", (0, 0, 205)),
    ("mediumorchid", (186, 85, 211)),
    ("mediumpurple", (147, 112, 219)),
    ("mediumseagreen", (60, 179, 113)),
    ("mediumslateblue", (123, 104, 238)),
    ("mediumspringgreen", (0, 250, 154)),
    ("mediumturquoise", (72, 209, 204)),
    ("mediumvioletred", (199, 21, 133)),
    ("midnightblue", (25, 25, 112)),
    ("mintcream", (245, 255, 250)),
    ("mistyrose", (255, 228, 225)),
    ("moccasin", (255, 228, 181)),
    ("navajowhite", (255, 222, 173)),
    ("navy", (0, 0, 128)),
    ("oldlace", (253, 245, 230)),
    ("olive", (128, 128, 0)),
    ("olivedrab", (107, 142, 35)),
    ("orange", (255, 165, 0)),
    ("orangered", (255, 69, 0)),
    ("orchid", (218, 112, 214)),
    ("palegoldenrod", (238, 232, 170)),
    ("palegreen", (152, 251, 152)),
    ("paleturquoise", (175, 238, 238)),
    ("palevioletred", (219, 112, 147)),
    ("papayawhip", (255, 239, 213)),
    ("peachpuff", (255, 218, 185)),
    ("peru", (205, 133, 63)),
    ("pink", (255, 192, 203)),
    ("plum", (221, 160, 221)),
    ("powderblue", (176, 224, 230)),
    ("purple", (128, 0, 128)),
    ("rebeccapurple", (102, 51, 153)),
    ("red", (255, 0, 0)),
    ("rosybrown", (188, 143, 143)),
    ("royalblue", (65, 105, 225)),
    ("saddlebrown", (139, 69, 19)),
    ("salmon", (250, 128, 114)),
    ("sandybrown", (244, 164, 96)),
    ("seagreen", (46, 139, 87)),
    ("seashell", (255, 245, 238)),
    ("sienna", (160, 82, 45)),
    ("silver", (192, 192, 192)),
    ("skyblue", (135, 206, 235)),
    ("slateblue", (106, 90, 205)),
    ("slategray", (112, 128, 144)),
    ("slategrey", (112, 128, 144)),
    ("snow", (255, 250, 250)),
    ("springgreen", (0, 255, 127)),
    ("steelblue", (70, 130, 180)),
    ("tan", (210, 180, 140)),
    ("teal", (0, 128, 128)),
    ("thistle", (216, 191, 216)),
    ("tomato", (255, 99, 71)),
    ("turquoise", (64, 224, 208)),
    ("violet", (238, 130, 238)),
    ("wheat", (245, 222, 179)),
    ("white", (255, 255, 255)),
    ("whitesmoke", (245, 245, 245)),
    ("yellow", (255, 255, 0)),
    ("yellowgreen", (154, 205, 50)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse("#FFF"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::parse("#aabbcc"), Some(Color::rgb(0xaa, 0xbb, 0xcc)));
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#ggg"), None);
    }

    #[test]
    fn test_canonical_form() {
        let cases = [
            ("red", "#ff0000"),
            ("RebeccaPurple", "#663399"),
            ("#ABC", "#aabbcc"),
            ("rgb(255, 128, 0)", "#ff8000"),
            ("rgb(100% 0% 0%)", "#ff0000"),
            ("hsl(120, 100%, 50%)", "#00ff00"),
            ("hsl(240deg 100% 25%)", "#000080"),
            ("rgba(255, 0, 0, 0.5)", "rgba(255, 0, 0, 0.5)"),
            ("rgb(0 0 255 / 25%)", "rgba(0, 0, 255, 0.25)"),
            ("#ff000080", "rgba(255, 0, 0, 0.5)"),
            ("transparent", "rgba(0, 0, 0, 0)"),
            ("rgba(0, 0, 0, 1)", "#000000"),
        ];
        for (input, expected) in cases {
            let color = Color::parse(input).unwrap_or_else(|| panic!("failed to parse {input}"));
            assert_eq!(color.to_string(), expected, "input: {input}");
        }
    }

    #[test]
    fn test_normalize_paint_passthrough() {
        for value in ["none", "currentColor", "inherit", "url(#grad)", "url(#g) red"] {
            assert_eq!(normalize_paint("fill", value).unwrap(), value);
        }
    }

    #[test]
    fn test_normalize_paint_unknown() {
        let err = normalize_paint("stroke", "blurple").unwrap_err();
        assert!(matches!(err, SvgError::ColorResolution { ref attribute, ref value }
            if attribute == "stroke" && value == "blurple"));
        assert!(normalize_paint("fill", "rgb(1, 2)").is_err());
    }
}
