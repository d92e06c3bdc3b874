use super::error::CalendarError;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub(crate) const LEVEL_COUNT: usize = 5;

/// Activity intensity bucket for a single day, 0 through 4
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub(crate) struct Level(u8);

impl Level {
    pub(crate) const ALL: [Level; LEVEL_COUNT] = [Level(0), Level(1), Level(2), Level(3), Level(4)];

    pub(crate) fn get(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl TryFrom<u64> for Level {
    type Error = LevelError;

    fn try_from(value: u64) -> Result<Level, LevelError> {
        Level::ALL
            .into_iter()
            .find(|lv| u64::from(lv.0) == value)
            .ok_or(LevelError(value))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("activity level {0} is outside 0-4")]
pub(crate) struct LevelError(u64);

/// Built-in themes
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Preset {
    Grass,
    Halloween,
    Winter,
    EmojiPositive,
    EmojiNegative,
}

impl Preset {
    pub(crate) const ALL: [Preset; 5] = [
        Preset::Grass,
        Preset::Halloween,
        Preset::Winter,
        Preset::EmojiPositive,
        Preset::EmojiNegative,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Preset::Grass => "grass",
            Preset::Halloween => "halloween",
            Preset::Winter => "winter",
            Preset::EmojiPositive => "emoji_positive",
            Preset::EmojiNegative => "emoji_negative",
        }
    }

    fn visuals(self) -> [&'static str; LEVEL_COUNT] {
        match self {
            Preset::Grass => ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"],
            Preset::Halloween => ["#ebedf0", "#ffee4a", "#ffc501", "#fe9600", "#03001c"],
            Preset::Winter => ["#ebedf0", "#b6e3ff", "#54aeff", "#0969da", "#0a3069"],
            Preset::EmojiPositive => ["⬜", "🙂", "😀", "😄", "🤩"],
            Preset::EmojiNegative => ["⬜", "😐", "🙁", "😣", "😭"],
        }
    }

    fn is_emoji(self) -> bool {
        matches!(self, Preset::EmojiPositive | Preset::EmojiNegative)
    }
}

impl FromStr for Preset {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Preset, CalendarError> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| CalendarError::UnknownTheme(s.to_owned()))
    }
}

/// A caller-supplied theme as read from JSON, e.g.
/// `{"level0": "#eee", ..., "level4": "#222", "isTextTheme": false}`
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThemeDescriptor {
    pub(crate) level0: Option<String>,
    pub(crate) level1: Option<String>,
    pub(crate) level2: Option<String>,
    pub(crate) level3: Option<String>,
    pub(crate) level4: Option<String>,
    pub(crate) is_text_theme: Option<bool>,
}

impl ThemeDescriptor {
    fn visuals(&self) -> [Option<&str>; LEVEL_COUNT] {
        [
            self.level0.as_deref(),
            self.level1.as_deref(),
            self.level2.as_deref(),
            self.level3.as_deref(),
            self.level4.as_deref(),
        ]
    }

    fn is_text_theme(&self) -> bool {
        self.is_text_theme.unwrap_or(false)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Theme {
    Preset(Preset),
    Custom(ThemeDescriptor),
}

impl Default for Theme {
    fn default() -> Theme {
        Theme::Preset(Preset::Grass)
    }
}

impl Theme {
    /// Whether days are drawn as glyphs rather than colored blocks
    pub(crate) fn is_icon_theme(&self) -> bool {
        match self {
            Theme::Preset(p) => p.is_emoji(),
            Theme::Custom(desc) => desc.is_text_theme(),
        }
    }

    pub(crate) fn resolve(&self) -> Result<ThemeLevels, CalendarError> {
        match self {
            Theme::Preset(p) => Ok(ThemeLevels {
                visuals: p.visuals().map(String::from),
                is_text_theme: p.is_emoji(),
            }),
            Theme::Custom(desc) => {
                let is_text_theme = desc.is_text_theme();
                let values = desc.visuals();
                for (lv, value) in std::iter::zip(Level::ALL, values) {
                    let Some(value) = value else {
                        return Err(CalendarError::IncompleteTheme { level: lv.get() });
                    };
                    if !is_text_theme && parse_color(value).is_none() {
                        return Err(CalendarError::InvalidColor {
                            level: lv.get(),
                            value: value.to_owned(),
                        });
                    }
                }
                Ok(ThemeLevels {
                    visuals: values.map(|v| v.unwrap_or_default().to_owned()),
                    is_text_theme,
                })
            }
        }
    }
}

impl FromStr for Theme {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Theme, CalendarError> {
        s.parse::<Preset>().map(Theme::Preset)
    }
}

/// The five per-level visuals of a resolved theme: color strings, or glyphs
/// when `is_text_theme` is set
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ThemeLevels {
    visuals: [String; LEVEL_COUNT],
    is_text_theme: bool,
}

impl ThemeLevels {
    pub(crate) fn visual(&self, level: Level) -> &str {
        self.visuals.get(level.index()).map_or("", String::as_str)
    }

    pub(crate) fn is_text_theme(&self) -> bool {
        self.is_text_theme
    }

    /// Background color for `level`, or `None` for glyph themes
    pub(crate) fn color(&self, level: Level) -> Option<Color> {
        if self.is_text_theme() {
            None
        } else {
            parse_color(self.visual(level))
        }
    }
}

/// Parse a CSS-style color: `#rgb`, `rgb(r, g, b)`, or anything ratatui
/// understands (`#rrggbb`, named colors, indexed colors)
fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#').filter(|h| h.len() == 3) {
        let mut nibbles = hex
            .chars()
            .map(|c| c.to_digit(16).and_then(|n| u8::try_from(n * 17).ok()));
        let (r, g, b) = (nibbles.next()??, nibbles.next()??, nibbles.next()??);
        return Some(Color::Rgb(r, g, b));
    }
    if let Some(args) = value
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let channels = args
            .split(',')
            .map(|c| c.trim().parse::<u8>().ok())
            .collect::<Option<Vec<_>>>()?;
        let [r, g, b] = channels.as_slice() else {
            return None;
        };
        return Some(Color::Rgb(*r, *g, *b));
    }
    Color::from_str(value).ok()
}
