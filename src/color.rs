use palette::Srgb;
use thiserror::Error;

// fixed background colors behind the three tags
const LIGHT_GREEN_RGB: Srgb<u8> = Srgb::new(204, 255, 204);
const LIGHT_YELLOW_RGB: Srgb<u8> = Srgb::new(255, 255, 204);
const LIGHT_RED_RGB: Srgb<u8> = Srgb::new(255, 204, 204);

#[derive(Debug, Error, PartialEq)]
#[error("No note color matches rgb({}, {}, {})", .0.red, .0.green, .0.blue)]
pub struct UnrecognizedColor(pub Srgb<u8>);

/// Closed set of color tags a note can be categorized with.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum NoteColor {
    LightGreen,
    #[default]
    LightYellow,
    LightRed,
}

impl NoteColor {
    pub const ALL: [Self; 3] = [Self::LightGreen, Self::LightYellow, Self::LightRed];

    #[must_use]
    pub const fn rgb(self) -> Srgb<u8> {
        match self {
            Self::LightGreen => LIGHT_GREEN_RGB,
            Self::LightYellow => LIGHT_YELLOW_RGB,
            Self::LightRed => LIGHT_RED_RGB,
        }
    }

    /// Inverse of [`rgb`](Self::rgb). Only the three fixed values map back to
    /// a tag, any other color is rejected instead of defaulted.
    pub fn try_from_rgb(rgb: Srgb<u8>) -> Result<Self, UnrecognizedColor> {
        Self::ALL
            .into_iter()
            .find(|color| color.rgb() == rgb)
            .ok_or(UnrecognizedColor(rgb))
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LightGreen => "light-green",
            Self::LightYellow => "light-yellow",
            Self::LightRed => "light-red",
        }
    }
}

impl std::fmt::Display for NoteColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[test]
fn rgb_and_back_round_trips_every_tag() {
    for color in NoteColor::ALL {
        let mapped = NoteColor::try_from_rgb(color.rgb());
        assert_eq!(mapped, Ok(color));
    }
}

#[test]
fn foreign_rgb_is_rejected_not_defaulted() {
    let white = Srgb::new(255, 255, 255);
    assert_eq!(NoteColor::try_from_rgb(white), Err(UnrecognizedColor(white)));
    // one channel off a fixed value is still foreign
    let almost_green = Srgb::new(204, 255, 205);
    assert_eq!(
        NoteColor::try_from_rgb(almost_green),
        Err(UnrecognizedColor(almost_green))
    );
}

#[test]
fn tags_serialize_as_stable_strings() {
    let json = serde_json::to_string(&NoteColor::LightGreen).expect("serialize tag must succeed");
    assert_eq!(json, "\"light-green\"");

    let parsed: NoteColor =
        serde_json::from_str("\"light-red\"").expect("deserialize tag must succeed");
    assert_eq!(parsed, NoteColor::LightRed);
}

#[test]
fn unknown_tag_string_fails_to_parse() {
    let parsed = serde_json::from_str::<NoteColor>("\"dark-blue\"");
    assert!(parsed.is_err());
}
