use once_cell::sync::Lazy;
use regex::Regex;

static HEX_TRIPLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#?([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})$").expect("hex triplet pattern is valid")
});

/// An HSV color as edited through a color picker.
///
/// Each component may be unset, and the color only converts to RGB once all
/// three are set. Hue is in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct ColorValue {
    pub hue: Option<f64>,
    pub saturation: Option<f64>,
    pub value: Option<f64>,
}

impl ColorValue {
    pub fn from_raw(raw: u32) -> Self {
        let mut color = ColorValue::default();
        color.set_raw(Some(raw));
        color
    }

    pub fn is_valid(&self) -> bool {
        self.hue.is_some() && self.saturation.is_some() && self.value.is_some()
    }

    /// `0xRRGGBB`, or `None` while any component is unset
    pub fn raw(&self) -> Option<u32> {
        let (Some(hue), Some(saturation), Some(value)) = (self.hue, self.saturation, self.value) else {
            return None;
        };

        let channel = |n: f64| {
            let k = (n + hue / 60.0) % 6.0;
            let c = value - value * saturation * k.min(4.0 - k).min(1.0).max(0.0);

            (c * 255.0).round().clamp(0.0, 255.0) as u32
        };

        Some(channel(5.0) << 16 | channel(3.0) << 8 | channel(1.0))
    }

    /// Lower-case `#rrggbb`, or `None` while any component is unset
    pub fn hex(&self) -> Option<String> {
        self.raw().map(|raw| format!("#{raw:06x}"))
    }

    /// Resets to an unset hue over a black, fully desaturated base.
    pub fn invalidate(&mut self) {
        self.hue = None;
        self.saturation = Some(0.0);
        self.value = Some(0.0);
    }

    /// NaN leaves the hue unset
    pub fn set_hue(&mut self, hue: f64) {
        self.hue = (!hue.is_nan()).then_some(hue);
    }

    pub fn set_saturation(&mut self, saturation: f64) {
        self.saturation = (!saturation.is_nan()).then_some(saturation);
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = (!value.is_nan()).then_some(value);
    }

    pub fn set_raw(&mut self, raw: Option<u32>) {
        match raw {
            Some(raw) => self.set_hex(&format!("#{raw:06x}")),
            None => self.invalidate(),
        }
    }

    /// Sets the color from a `#rrggbb` triplet. The leading `#` is optional and
    /// case is ignored. Malformed input is read as black rather than rejected.
    pub fn set_hex(&mut self, hex: &str) {
        if hex.is_empty() {
            return self.invalidate();
        }

        let [red, green, blue] = match HEX_TRIPLET.captures(hex) {
            Some(caps) => [1, 2, 3].map(|i| u8::from_str_radix(&caps[i], 16).unwrap_or(0) as f64),
            None => [0.0; 3],
        };

        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let delta = max - min;

        // ties resolve toward blue, then green
        let mut hue = if delta == 0.0 {
            0.0
        } else if max == blue {
            60.0 * (4.0 + (red - green) / delta)
        } else if max == green {
            60.0 * (2.0 + (blue - red) / delta)
        } else {
            60.0 * ((green - blue) / delta)
        };

        if hue < 0.0 {
            hue += 360.0;
        }

        self.hue = Some(hue);
        self.saturation = Some(if max == 0.0 { 0.0 } else { delta / max });
        self.value = Some(max / 255.0);
    }
}

impl From<Option<u32>> for ColorValue {
    fn from(raw: Option<u32>) -> Self {
        match raw {
            Some(raw) => ColorValue::from_raw(raw),
            None => ColorValue::default(),
        }
    }
}

impl From<ColorValue> for Option<u32> {
    fn from(color: ColorValue) -> Self {
        color.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        for hex in ["#000000", "#FFFFFF", "#ff0000", "#00FF00", "#0000ff", "#336699", "#5865F2", "#123456", "#fedcba"] {
            let mut color = ColorValue::default();
            color.set_hex(hex);

            assert!(color.is_valid());
            assert_eq!(color.hex().as_deref(), Some(hex.to_lowercase().as_str()), "{hex}");
        }
    }

    #[test]
    fn test_hex_without_hash() {
        let mut color = ColorValue::default();
        color.set_hex("5865f2");

        assert_eq!(color.raw(), Some(0x5865f2));
        assert_eq!(color.hex().as_deref(), Some("#5865f2"));
    }

    #[test]
    fn test_malformed_hex_is_black() {
        let mut color = ColorValue::default();
        color.set_hex("not a color");

        assert_eq!(color.raw(), Some(0));
        assert_eq!(color.hue, Some(0.0));
        assert_eq!(color.saturation, Some(0.0));
    }

    #[test]
    fn test_greys() {
        for value in [0.0, 0.2, 0.5, 0.75, 1.0] {
            let color = ColorValue {
                hue: Some(123.0),
                saturation: Some(0.0),
                value: Some(value),
            };

            let grey = (value * 255.0).round() as u32;
            assert_eq!(color.raw(), Some(grey << 16 | grey << 8 | grey));
        }
    }

    #[test]
    fn test_hsv_from_hex() {
        let mut color = ColorValue::default();
        color.set_hex("#336699");

        assert_eq!(color.hue, Some(210.0));
        assert!((color.saturation.unwrap() - 2.0 / 3.0).abs() < 1e-9);
        assert!((color.value.unwrap() - 0.6).abs() < 1e-9);

        // red is max but blue > green, so hue wraps around
        color.set_hex("#ff0080");
        assert!(color.hue.unwrap() > 300.0 && color.hue.unwrap() < 360.0);
    }

    #[test]
    fn test_invalidate() {
        let mut color = ColorValue::from_raw(0xabcdef);
        assert!(color.is_valid());

        color.invalidate();
        assert!(!color.is_valid());
        assert_eq!(color.raw(), None);
        assert_eq!(color.hex(), None);
        assert_eq!(color.saturation, Some(0.0));
        assert_eq!(color.value, Some(0.0));

        color.set_raw(Some(0));
        assert_eq!(color.hex().as_deref(), Some("#000000"));

        color.set_raw(None);
        assert_eq!(color.raw(), None);

        color.set_hex("#123456");
        color.set_hex("");
        assert_eq!(color.raw(), None);
    }

    #[test]
    fn test_unset_by_default() {
        let color = ColorValue::default();
        assert!(!color.is_valid());
        assert_eq!(Option::<u32>::from(color), None);
    }

    #[test]
    fn test_nan_component_is_unset() {
        let setters: [fn(&mut ColorValue, f64); 3] = [
            ColorValue::set_hue,
            ColorValue::set_saturation,
            ColorValue::set_value,
        ];

        for set in setters {
            let mut color = ColorValue::from_raw(0x123456);
            set(&mut color, f64::NAN);

            assert!(!color.is_valid());
            assert_eq!(color.raw(), None);
            assert_eq!(color.hex(), None);

            set(&mut color, 0.5);
            assert!(color.is_valid());
        }
    }
}
