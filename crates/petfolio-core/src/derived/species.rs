//! Species normalization.
//!
//! Handles:
//! - Alias expansion (puppy→dog, feline→cat, budgie→bird)
//! - Typo tolerance via Jaro-Winkler similarity against known aliases
//! - Unknown input kept verbatim as [`Species::Other`]

use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::models::Species;

/// Default similarity a typo must reach to be accepted.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.88;

/// Normalizer for free-text species/category input.
#[derive(Debug, Clone)]
pub struct SpeciesNormalizer {
    /// Alias map: lowercase spoken name → species
    aliases: HashMap<String, Species>,
    /// Minimum Jaro-Winkler similarity for a fuzzy match
    threshold: f64,
}

impl Default for SpeciesNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeciesNormalizer {
    /// Create a normalizer with the default alias table.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_MATCH_THRESHOLD)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            aliases: Self::default_aliases(),
            threshold,
        }
    }

    /// Map raw input to a species.
    pub fn normalize(&self, raw: &str) -> Species {
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();

        if let Some(species) = self.aliases.get(&lower) {
            return species.clone();
        }

        // Best score and the species holding it; `None` species means two
        // species tie at the top, which is ambiguous.
        let mut best: Option<(f64, Option<&Species>)> = None;
        for (alias, species) in &self.aliases {
            let score = jaro_winkler(&lower, alias);
            best = match best {
                Some((top, _)) if score < top => best,
                Some((top, current)) if score == top => {
                    Some((top, current.filter(|held| *held == species)))
                }
                _ => Some((score, Some(species))),
            };
        }

        match best {
            Some((score, Some(species))) if score >= self.threshold => {
                tracing::debug!(input = %trimmed, species = %species, score, "fuzzy species match");
                species.clone()
            }
            Some((score, None)) if score >= self.threshold => {
                tracing::debug!(input = %trimmed, score, "ambiguous species match");
                Species::Other(trimmed.to_string())
            }
            _ => Species::Other(trimmed.to_string()),
        }
    }

    /// Add a custom alias mapping.
    pub fn add_alias(&mut self, alias: &str, species: Species) {
        self.aliases.insert(alias.trim().to_lowercase(), species);
    }

    fn default_aliases() -> HashMap<String, Species> {
        let table: [(&[&str], Species); 8] = [
            (&["dog", "dogs", "canine", "puppy", "pup", "k9"], Species::Dog),
            (&["cat", "cats", "feline", "kitten", "kitty"], Species::Cat),
            (
                &["bird", "birds", "avian", "parrot", "budgie", "parakeet", "cockatiel", "canary"],
                Species::Bird,
            ),
            (&["rabbit", "rabbits", "bunny"], Species::Rabbit),
            (
                &[
                    "small mammal",
                    "small pet",
                    "hamster",
                    "guinea pig",
                    "gerbil",
                    "ferret",
                    "rat",
                    "mouse",
                    "chinchilla",
                ],
                Species::SmallMammal,
            ),
            (
                &["reptile", "lizard", "snake", "turtle", "tortoise", "gecko", "iguana"],
                Species::Reptile,
            ),
            (&["fish", "goldfish", "betta"], Species::Fish),
            (&["horse", "pony", "equine"], Species::Horse),
        ];

        let mut map = HashMap::new();
        for (aliases, species) in table {
            for alias in aliases {
                map.insert((*alias).to_string(), species.clone());
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_alias() {
        let normalizer = SpeciesNormalizer::new();
        assert_eq!(normalizer.normalize("Dog"), Species::Dog);
        assert_eq!(normalizer.normalize("  feline "), Species::Cat);
        assert_eq!(normalizer.normalize("Guinea Pig"), Species::SmallMammal);
    }

    #[test]
    fn test_typo_matches() {
        let normalizer = SpeciesNormalizer::new();
        assert_eq!(normalizer.normalize("kiten"), Species::Cat);
        assert_eq!(normalizer.normalize("parot"), Species::Bird);
    }

    #[test]
    fn test_unknown_kept_verbatim() {
        let normalizer = SpeciesNormalizer::new();
        assert_eq!(normalizer.normalize("Axolotl"), Species::Other("Axolotl".into()));
    }

    #[test]
    fn test_cross_species_tie_is_ambiguous() {
        // "canine" and "canary" score the same against "can".
        let normalizer = SpeciesNormalizer::new();
        for _ in 0..20 {
            assert_eq!(normalizer.normalize("can"), Species::Other("can".into()));
        }
        assert_eq!(
            SpeciesNormalizer::new().normalize("Can"),
            Species::Other("Can".into())
        );
    }

    #[test]
    fn test_custom_alias() {
        let mut normalizer = SpeciesNormalizer::new();
        normalizer.add_alias("Doggo", Species::Dog);
        assert_eq!(normalizer.normalize("doggo"), Species::Dog);
    }

    #[test]
    fn test_canonical_names_round_trip() {
        let normalizer = SpeciesNormalizer::new();
        for species in Species::PICKER {
            assert_eq!(normalizer.normalize(species.as_str()), species);
        }
    }
}
