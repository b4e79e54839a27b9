//! Named compositions substituted wholesale for manual vanishing points.
use crate::vp::Direction::{Down, Left, Right, Up};
use crate::vp::VanishingPointTemplate as Vp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name accepted as "no preset" by [`resolve_preset`].
pub const NO_PRESET: &str = "None";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Preset {
    Architecture,
    InteriorRoom,
    ComicDynamic,
    Storyboard,
    CartoonFishEye,
}

static PRESETS: [(Preset, &[Vp]); 5] = [
    (
        Preset::Architecture,
        &[
            Vp::new(0.2, 0.2, 30, Down),
            Vp::new(0.8, 0.2, 30, Down),
            Vp::new(0.2, 0.8, 30, Up),
            Vp::new(0.8, 0.8, 30, Up),
        ],
    ),
    (
        Preset::InteriorRoom,
        &[
            Vp::new(0.25, 0.25, 30, Down),
            Vp::new(0.75, 0.25, 30, Down),
            Vp::new(0.25, 0.75, 30, Up),
            Vp::new(0.75, 0.75, 30, Up),
        ],
    ),
    (
        Preset::ComicDynamic,
        &[
            Vp::new(0.5, 0.2, 40, Down),
            Vp::new(0.2, 0.8, 40, Right),
            Vp::new(0.8, 0.8, 40, Left),
        ],
    ),
    (Preset::Storyboard, &[Vp::new(0.5, 0.4, 30, Down)]),
    (
        Preset::CartoonFishEye,
        &[
            Vp::new(0.2, 0.2, 50, Down),
            Vp::new(0.8, 0.2, 50, Down),
            Vp::new(0.2, 0.8, 50, Up),
            Vp::new(0.8, 0.8, 50, Up),
        ],
    ),
];

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Architecture,
        Preset::InteriorRoom,
        Preset::ComicDynamic,
        Preset::Storyboard,
        Preset::CartoonFishEye,
    ];

    /// Display name, as listed in the preset table.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Architecture => "Architecture",
            Preset::InteriorRoom => "Interior Room",
            Preset::ComicDynamic => "Comic Dynamic",
            Preset::Storyboard => "Storyboard",
            Preset::CartoonFishEye => "Cartoon Fish-Eye",
        }
    }

    pub fn templates(self) -> &'static [Vp] {
        PRESETS
            .iter()
            .find(|(p, _)| *p == self)
            .map(|(_, t)| *t)
            .unwrap_or(&[])
    }

    /// Lenient lookup: ignores case, spaces, `-` and `_`, so
    /// `"interior_room"` and `"Interior Room"` both match.
    pub fn from_name(name: &str) -> Option<Preset> {
        let key = normalize(name);
        Preset::ALL.into_iter().find(|p| normalize(p.name()) == key)
    }

    /// Filesystem-friendly name, e.g. `cartoon-fish-eye`.
    pub fn slug(self) -> String {
        self.name()
            .chars()
            .map(|c| if c == ' ' { '-' } else { c.to_ascii_lowercase() })
            .collect()
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Exact lookup of a preset by display name. Unknown names and
/// [`NO_PRESET`] yield `None`, meaning "use the manual vanishing points".
pub fn resolve_preset(name: &str) -> Option<&'static [Vp]> {
    PRESETS
        .iter()
        .find(|(p, _)| p.name() == name)
        .map(|(_, t)| *t)
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::from_name(s).ok_or_else(|| format!("Unknown preset {s:?}"))
    }
}

impl TryFrom<String> for Preset {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Preset> for String {
    fn from(p: Preset) -> Self {
        p.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn architecture_matches_table() {
        let t = resolve_preset("Architecture").expect("known preset");
        assert_eq!(
            t,
            &[
                Vp::new(0.2, 0.2, 30, Down),
                Vp::new(0.8, 0.2, 30, Down),
                Vp::new(0.2, 0.8, 30, Up),
                Vp::new(0.8, 0.8, 30, Up),
            ]
        );
    }

    #[test]
    fn every_preset_resolves_by_display_name() {
        let counts: Vec<usize> = Preset::ALL
            .iter()
            .map(|p| resolve_preset(p.name()).map_or(0, <[Vp]>::len))
            .collect();
        assert_eq!(counts, vec![4, 4, 3, 1, 4]);
        let comic = Preset::ComicDynamic.templates();
        assert_eq!(comic[1].direction, Right);
        assert_eq!(comic[2].direction, Left);
        assert!(Preset::CartoonFishEye.templates().iter().all(|t| t.line_count == 50));
        assert_eq!(Preset::Storyboard.templates()[0].position, [0.5, 0.4]);
    }

    #[test]
    fn sentinel_and_unknown_names_fall_back() {
        assert!(resolve_preset(NO_PRESET).is_none());
        assert!(resolve_preset("Vaporwave").is_none());
        assert!(resolve_preset("").is_none());
    }

    #[test]
    fn lenient_names_parse() {
        assert_eq!(Preset::from_name("interior_room"), Some(Preset::InteriorRoom));
        assert_eq!(Preset::from_name("cartoon-fish-eye"), Some(Preset::CartoonFishEye));
        assert_eq!("COMIC DYNAMIC".parse::<Preset>(), Ok(Preset::ComicDynamic));
        assert!("none".parse::<Preset>().is_err());
        assert_eq!(Preset::CartoonFishEye.slug(), "cartoon-fish-eye");
    }

    #[test]
    fn serde_uses_display_name() {
        let json = serde_json::to_string(&Preset::InteriorRoom).unwrap();
        assert_eq!(json, "\"Interior Room\"");
        let p: Preset = serde_json::from_str("\"storyboard\"").unwrap();
        assert_eq!(p, Preset::Storyboard);
    }
}
