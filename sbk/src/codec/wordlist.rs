//! # The 256-Word List
//!
//! One word per byte value. The list is a wire-format constant: changing
//! any entry orphans every phrase ever printed, so edits require a format
//! version bump and a very good reason.
//!
//! Structural guarantees, enforced by tests rather than trusted:
//!
//! - exactly 256 words, each 5–7 lowercase ASCII letters;
//! - the first three letters identify a word uniquely;
//! - any two words are at Damerau–Levenshtein distance ≥ 4, so a phrase
//!   with a couple of typos in a word still snaps back to exactly one
//!   candidate.

/// `WORDS[b]` is the word for byte value `b`.
pub const WORDS: [&str; 256] = [
    "abacus", "abbey", "academy", "acrobat",
    "admiral", "airport", "almond", "alpaca",
    "anchor", "antenna", "apricot", "archive",
    "arrow", "asphalt", "athlete", "atlas",
    "auburn", "auction", "avocado", "awning",
    "azalea", "badger", "banjo", "beacon",
    "bedrock", "begonia", "bellows", "bicycle",
    "biscuit", "blanket", "blossom", "bluff",
    "bobcat", "bonfire", "borough", "bottle",
    "boulder", "bramble", "brewery", "bronze",
    "buffalo", "bulldog", "bureau", "buzzard",
    "cabbage", "caliber", "camera", "candle",
    "caravan", "cashew", "catalog", "chariot",
    "cheddar", "chimney", "chrome", "citadel",
    "climate", "clutch", "cobweb", "coconut",
    "cognac", "compass", "concert", "cosmos",
    "creek", "cricket", "crystal", "cubicle",
    "cuckoo", "cupola", "curtain", "cyclone",
    "cypress", "decade", "derby", "desert",
    "dinghy", "dolphin", "domino", "drizzle",
    "dugout", "dynamo", "eaglet", "earwig",
    "echidna", "eclipse", "eggnog", "elixir",
    "embassy", "emerald", "enamel", "engine",
    "epoch", "equator", "estuary", "exodus",
    "fabric", "fashion", "feather", "figment",
    "firefly", "fjord", "florist", "fortune",
    "fossil", "freckle", "fridge", "fungus",
    "furnace", "galaxy", "gazelle", "gherkin",
    "giraffe", "glacier", "gondola", "gopher",
    "granite", "grease", "griffin", "grotto",
    "guitar", "gypsum", "hammock", "harvest",
    "hatchet", "hickory", "holster", "hyena",
    "iguana", "incense", "indigo", "inkwell",
    "jackal", "jasmine", "jigsaw", "juniper",
    "kayak", "kernel", "kitten", "lasagna",
    "laundry", "lentil", "leopard", "library",
    "luggage", "mailbox", "manatee", "meerkat",
    "meteor", "mildew", "mineral", "monsoon",
    "moose", "mustang", "narwhal", "nebula",
    "niche", "nimbus", "nomad", "nutmeg",
    "oatmeal", "obelisk", "ocelot", "octopus",
    "odyssey", "olive", "orbit", "orchard",
    "osmium", "osprey", "ostrich", "outpost",
    "pagoda", "parsley", "pearl", "pelican",
    "pendant", "perfume", "phantom", "picnic",
    "pigeon", "plateau", "plumber", "polygon",
    "popcorn", "prairie", "pretzel", "prism",
    "pudding", "pumpkin", "pyramid", "quarry",
    "quill", "raccoon", "radish", "rampart",
    "redwood", "rhubarb", "rosebud", "rustic",
    "saffron", "sawdust", "scooter", "scroll",
    "seagull", "sequin", "sherbet", "sierra",
    "skillet", "skunk", "slipper", "snorkel",
    "spaniel", "sphinx", "spruce", "squash",
    "stadium", "steeple", "stirrup", "stomach",
    "stucco", "summit", "sundial", "swallow",
    "swift", "tadpole", "tangelo", "tapioca",
    "tawny", "termite", "thistle", "tobacco",
    "toffee", "tornado", "trawler", "trellis",
    "tripod", "trumpet", "turnip", "tuxedo",
    "umpire", "upland", "vacuum", "vanilla",
    "vapor", "velvet", "veranda", "violin",
    "vista", "vortex", "vulture", "walnut",
    "warthog", "whisker", "wrench", "yogurt",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::mnemonic::damerau_levenshtein;
    use std::collections::HashSet;

    #[test]
    fn exactly_256_words_of_legal_length() {
        assert_eq!(WORDS.len(), 256);
        for w in WORDS {
            assert!(
                (5..=7).contains(&w.len()),
                "word '{}' has length {}",
                w,
                w.len()
            );
            assert!(w.bytes().all(|b| b.is_ascii_lowercase()), "word '{}'", w);
        }
    }

    #[test]
    fn words_are_unique_and_sorted() {
        let set: HashSet<&str> = WORDS.iter().copied().collect();
        assert_eq!(set.len(), 256);
        let mut sorted = WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, WORDS.to_vec());
    }

    #[test]
    fn three_letter_prefixes_are_unique() {
        let prefixes: HashSet<&str> = WORDS.iter().map(|w| &w[..3]).collect();
        assert_eq!(prefixes.len(), 256);
    }

    #[test]
    fn pairwise_edit_distance_is_at_least_four() {
        for (i, a) in WORDS.iter().enumerate() {
            for b in WORDS.iter().skip(i + 1) {
                let d = damerau_levenshtein(a, b);
                assert!(d >= 4, "'{}' vs '{}' has distance {}", a, b, d);
            }
        }
    }
}
