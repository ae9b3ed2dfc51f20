//! Background Grayout — dims the page background independently of content
//! swapping.
//!
//! The original background color is captured once at initialization and
//! restored verbatim on removal; applying always darkens the *current*
//! background so a settings-driven re-apply works on whatever the page shows.

use crate::dom::PageDocument;
use crate::types::settings::ReadingSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Trait defining the grayout operations.
pub trait BackgroundGrayoutTrait {
    fn initialize(&mut self, page: &mut PageDocument, settings: &ReadingSettings);
    fn apply(&mut self, page: &mut PageDocument, amount: f64);
    fn remove(&mut self, page: &mut PageDocument);
    fn toggle(&mut self, page: &mut PageDocument, enabled: bool, amount: f64);
    fn is_applied(&self) -> bool;
}

pub struct BackgroundGrayout {
    original_background_color: Option<String>,
    is_applied: bool,
    initialized: bool,
}

impl BackgroundGrayout {
    pub fn new() -> Self {
        Self {
            original_background_color: None,
            is_applied: false,
            initialized: false,
        }
    }
}

impl Default for BackgroundGrayout {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundGrayoutTrait for BackgroundGrayout {
    /// Captures the page's background color (first call only) and applies the
    /// grayout immediately if enabled.
    fn initialize(&mut self, page: &mut PageDocument, settings: &ReadingSettings) {
        if !self.initialized {
            self.original_background_color = page
                .body_id()
                .and_then(|body| page.style_property(body, "background-color"));
            self.initialized = true;
        }
        if settings.grayout_background {
            self.apply(page, settings.grayout_amount);
        }
    }

    fn apply(&mut self, page: &mut PageDocument, amount: f64) {
        if self.is_applied {
            return;
        }
        let Some(body) = page.body_id() else {
            return;
        };
        let current = page.style_property(body, "background-color");
        let darkened = darken(current.as_deref().unwrap_or(""), amount);
        page.set_style_property(body, "background-color", &darkened, true);
        self.is_applied = true;
    }

    fn remove(&mut self, page: &mut PageDocument) {
        if !self.is_applied {
            return;
        }
        let Some(body) = page.body_id() else {
            return;
        };
        match &self.original_background_color {
            Some(original) => {
                page.set_style_property(body, "background-color", original, true);
            }
            None => page.remove_style_property(body, "background-color"),
        }
        self.is_applied = false;
    }

    fn toggle(&mut self, page: &mut PageDocument, enabled: bool, amount: f64) {
        if enabled {
            self.apply(page, amount);
        } else {
            self.remove(page);
        }
    }

    fn is_applied(&self) -> bool {
        self.is_applied
    }
}

/// Darkens a CSS color by `amount` in [0, 1], scaling each channel by
/// `1 - amount` and flooring. Unparseable, `transparent`, and `inherit`
/// inputs are treated as white. Output is always `rgb(r,g,b)`.
pub fn darken(color: &str, amount: f64) -> String {
    let amount = amount.clamp(0.0, 1.0);
    let color = color.trim();
    let rgb = if color.is_empty() || color == "transparent" || color == "inherit" {
        WHITE
    } else {
        parse_color(color).unwrap_or(WHITE)
    };

    let scale = |channel: u8| ((channel as f64) * (1.0 - amount)).floor().max(0.0) as u8;
    format!("rgb({},{},{})", scale(rgb.r), scale(rgb.g), scale(rgb.b))
}

fn parse_color(color: &str) -> Option<Rgb> {
    if let Some(args) = color
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_channels(args, 3);
    }
    if let Some(args) = color
        .strip_prefix("rgba(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        // Alpha is ignored.
        return parse_channels(args, 4);
    }
    if let Some(hex) = color.strip_prefix('#') {
        return parse_hex(hex);
    }
    named_color(color)
}

fn parse_channels(args: &str, expected: usize) -> Option<Rgb> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != expected {
        return None;
    }
    let r = parts[0].parse().ok()?;
    let g = parts[1].parse().ok()?;
    let b = parts[2].parse().ok()?;
    Some(Rgb { r, g, b })
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(Rgb {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        }),
        3 => {
            let expand = |d: &str| u8::from_str_radix(&format!("{}{}", d, d), 16).ok();
            Some(Rgb {
                r: expand(&hex[0..1])?,
                g: expand(&hex[1..2])?,
                b: expand(&hex[2..3])?,
            })
        }
        _ => None,
    }
}

fn named_color(color: &str) -> Option<Rgb> {
    let rgb = match color.to_ascii_lowercase().as_str() {
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" => (0, 255, 255),
        "magenta" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        _ => return None,
    };
    Some(Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    })
}
