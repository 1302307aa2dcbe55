use std::io::Read;
use std::path::Path;

use anyhow::Context;

/// Game policy: everything that differs between rule variants.
///
/// All fields carry serde defaults, so a TOML file only needs to name what it
/// overrides. `Rules::default()` is an 8×8 board targeting 2048 with eight
/// seeded tiles and the usual 90/10 two/four spawn split.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Rules {
    /// Grid side length.
    #[serde(default = "defaults::size")]
    pub size: usize,
    /// A game counts as won once any tile reaches this value.
    #[serde(default = "defaults::target")]
    pub target: u32,
    /// Tiles seeded when a game starts.
    #[serde(default = "defaults::initial_tiles")]
    pub initial_tiles: usize,
    /// Probability that a spawned tile is a 4 instead of a 2.
    #[serde(default = "defaults::four_chance")]
    pub four_chance: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            size: defaults::size(),
            target: defaults::target(),
            initial_tiles: defaults::initial_tiles(),
            four_chance: defaults::four_chance(),
        }
    }
}

impl Rules {
    /// Load rules from a TOML file and validate them.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut file =
            std::fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("read {}", path.display()))?;
        let rules: Self =
            toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.size >= 2,
            "grid size must be at least 2, got {}",
            self.size
        );
        anyhow::ensure!(
            self.target >= 4,
            "win target must be at least 4, got {}",
            self.target
        );
        anyhow::ensure!(
            self.initial_tiles <= self.size * self.size,
            "initial tile count {} exceeds the {}x{} board",
            self.initial_tiles,
            self.size,
            self.size
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.four_chance),
            "four_chance must be within [0, 1], got {}",
            self.four_chance
        );
        Ok(())
    }
}

mod defaults {
    pub fn size() -> usize {
        8
    }
    pub fn target() -> u32 {
        2048
    }
    pub fn initial_tiles() -> usize {
        8
    }
    pub fn four_chance() -> f64 {
        0.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let rules: Rules = toml::from_str("").unwrap();
        assert_eq!(rules, Rules::default());
    }

    #[test]
    fn partial_toml_overrides_named_fields_only() {
        let rules: Rules = toml::from_str("size = 10\nfour_chance = 0.0").unwrap();
        assert_eq!(rules.size, 10);
        assert_eq!(rules.four_chance, 0.0);
        assert_eq!(rules.target, 2048);
        assert_eq!(rules.initial_tiles, 8);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut rules = Rules {
            size: 1,
            ..Rules::default()
        };
        assert!(rules.validate().is_err());

        rules = Rules {
            four_chance: 1.5,
            ..Rules::default()
        };
        assert!(rules.validate().is_err());

        rules = Rules {
            size: 2,
            initial_tiles: 5,
            ..Rules::default()
        };
        assert!(rules.validate().is_err());

        rules = Rules {
            target: 2,
            ..Rules::default()
        };
        assert!(rules.validate().is_err());

        assert!(Rules::default().validate().is_ok());
    }

    #[test]
    fn variant_presets_pass_validation() {
        // The two shipped rule sets: a compact always-2 board and a wide
        // 90/10 board.
        let compact: Rules = toml::from_str(
            "size = 8\ntarget = 2024\ninitial_tiles = 8\nfour_chance = 0.0",
        )
        .unwrap();
        assert!(compact.validate().is_ok());

        let wide: Rules =
            toml::from_str("size = 10\ntarget = 2048\ninitial_tiles = 8").unwrap();
        assert!(wide.validate().is_ok());
    }
}
