use crate::utils::validation::is_hex_color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub name: &'static str,
    pub colors: [&'static str; 5],
}

const fn palette(name: &'static str, colors: [&'static str; 5]) -> ColorPalette {
    ColorPalette { name, colors }
}

pub static PALETTES: [ColorPalette; 24] = [
    palette("Corporate Sapphire", ["#192A56", "#2F5D9E", "#5FA8D3", "#CBD9E8", "#F4F7F9"]),
    palette("Elegant Charcoal", ["#212121", "#424242", "#757575", "#BDBDBD", "#ECEFF1"]),
    palette("Forest Modern", ["#1B5E20", "#388E3C", "#66BB6A", "#C8E6C9", "#F1F8E9"]),
    palette("Deep Plum Harmony", ["#311B92", "#512DA8", "#7E57C2", "#D1C4E9", "#F3E5F5"]),
    palette("Sunstone Warmth", ["#E64A19", "#FF7043", "#FFAB91", "#FFCCBC", "#FFF3E0"]),
    palette("Midnight Ocean", ["#001F3F", "#003366", "#0056B3", "#87CEEB", "#E0FFFF"]),
    palette("Skyline Serenity", ["#0B3C5D", "#3282B8", "#BBE1FA", "#DEEBF5", "#F8FBFD"]),
    palette("Tech Indigo", ["#1A237E", "#3F51B5", "#7986CB", "#C5CAE9", "#E8EAF6"]),
    palette("Arctic Blue", ["#005792", "#00BBD4", "#7FEFFF", "#A7F7F6", "#E1FFFF"]),
    palette("Rich Mahogany", ["#4E342E", "#6D4C41", "#8D6E63", "#D7CCC8", "#F5F5F5"]),
    palette("Desert Earth", ["#8D6247", "#B2845B", "#D4AC64", "#F4E0BF", "#FCF8F3"]),
    palette("Cinnamon Spice", ["#795548", "#A1887F", "#BCAAA4", "#EFEBE9", "#FBFBFB"]),
    palette("Regal Gold", ["#8B5E00", "#D4AF37", "#FFD700", "#FFFACD", "#FAFAD2"]),
    palette("Amber Luster", ["#FF8C00", "#FFC300", "#FFDA66", "#FFF2CC", "#FFF8E1"]),
    palette("Champagne Glow", ["#A0522D", "#CD853F", "#F0E68C", "#FDF5E6", "#FFFDD0"]),
    palette("Crimson & Cobalt", ["#8B0000", "#B22222", "#4169E1", "#6495ED", "#F0F8FF"]),
    palette("Modern Sangria Blue", ["#7F0000", "#C85050", "#3E508F", "#8CA0D9", "#ECEFF1"]),
    palette("Patriotic Contrast", ["#B20000", "#E12C2C", "#1F4068", "#4A6E9B", "#F5F8FA"]),
    palette("Vibrant Azure", ["#007ACC", "#00A1D6", "#4FC3F7", "#B3E5FC", "#E1F5FE"]),
    palette("Tropical Punch", ["#FF4081", "#F48FB1", "#FFEB3B", "#8BC34A", "#26A69A"]),
    palette("Emerald Coast", ["#00897B", "#4DB6AC", "#80CBC4", "#B2DFDB", "#E0F2F1"]),
    palette("Rose Quartz Serenity", ["#D8BFD8", "#F0C4DF", "#F6DCEF", "#FAE3E3", "#FDFDFD"]),
    palette("Berry Blossom", ["#880E4F", "#C2185B", "#EC407A", "#F8BBD0", "#FCE4EC"]),
    palette("Lavender Mist", ["#673AB7", "#9575CD", "#D1C4E9", "#EDE7F6", "#F3E5F5"]),
];

pub fn find_palette(name: &str) -> Option<&'static ColorPalette> {
    PALETTES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

/// Normalizes a user-typed hex code. `None` when it is not `#RGB`/`#RRGGBB`.
pub fn normalize_hex(input: &str) -> Option<String> {
    let candidate = input.trim().to_uppercase();
    is_hex_color(&candidate).then_some(candidate)
}

/// Adds the color if absent, removes it if present.
pub fn toggle_color(selected: &[String], color: &str) -> Vec<String> {
    if selected.iter().any(|c| c == color) {
        selected.iter().filter(|c| *c != color).cloned().collect()
    } else {
        let mut next = selected.to_vec();
        next.push(color.to_string());
        next
    }
}

/// A fully selected palette is removed; otherwise its missing colors are appended.
pub fn toggle_palette(selected: &[String], palette: &ColorPalette) -> Vec<String> {
    let fully_selected = palette
        .colors
        .iter()
        .all(|color| selected.iter().any(|c| c == color));

    if fully_selected {
        return selected
            .iter()
            .filter(|c| !palette.colors.contains(&c.as_str()))
            .cloned()
            .collect();
    }

    let mut next = selected.to_vec();
    for color in palette.colors {
        if !next.iter().any(|c| c == color) {
            next.push(color.to_string());
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_palette_color_is_valid_hex() {
        for palette in &PALETTES {
            for color in palette.colors {
                assert!(is_hex_color(color), "{} in {}", color, palette.name);
            }
        }
    }

    #[test]
    fn test_palette_toggle_adds_then_removes() {
        let palette = find_palette("forest modern").unwrap();
        let start = vec!["#388E3C".to_string(), "#FFFFFF".to_string()];

        let added = toggle_palette(&start, palette);
        assert_eq!(added.len(), 6);
        assert_eq!(added[0], "#388E3C");

        let removed = toggle_palette(&added, palette);
        assert_eq!(removed, vec!["#FFFFFF".to_string()]);
    }

    #[test]
    fn test_normalize_hex() {
        assert_eq!(normalize_hex(" #abc "), Some("#ABC".to_string()));
        assert_eq!(normalize_hex("#a1b2c3"), Some("#A1B2C3".to_string()));
        assert_eq!(normalize_hex("abc"), None);
    }

    #[test]
    fn test_toggle_color() {
        let selected = toggle_color(&[], "#FFFFFF");
        assert_eq!(selected, vec!["#FFFFFF".to_string()]);
        assert!(toggle_color(&selected, "#FFFFFF").is_empty());
    }
}
