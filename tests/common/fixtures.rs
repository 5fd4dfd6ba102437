//! Test data shared by the mock servers and the tests.

use serde_json::json;

const KNOWN_NAMES: &[&str] = &[
    "bulbasaur",
    "ivysaur",
    "venusaur",
    "charmander",
    "charmeleon",
    "charizard",
    "squirtle",
    "wartortle",
    "blastoise",
];

/// Real names for the first few ids, generated ones after that.
pub fn creature_name(id: u32) -> String {
    KNOWN_NAMES
        .get(id as usize - 1)
        .map(|n| n.to_string())
        .unwrap_or_else(|| format!("creature-{}", id))
}

/// A detail payload shaped like the public API's, extra fields included.
pub fn creature_detail_json(id: u32) -> serde_json::Value {
    json!({
        "id": id,
        "name": creature_name(id),
        "height": 5 + id,
        "weight": 50 + id * 10,
        "base_experience": 64,
        "types": [
            {"slot": 1, "type": {"name": "grass", "url": "https://x/type/12/"}}
        ],
        "abilities": [
            {"ability": {"name": "overgrow", "url": "https://x/ability/65/"}, "is_hidden": false, "slot": 1}
        ],
        "stats": [
            {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": "https://x/stat/1/"}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "attack", "url": "https://x/stat/2/"}}
        ],
        "sprites": {
            "front_default": format!("https://img/{}.png", id),
            "other": {
                "official-artwork": {"front_default": format!("https://img/official/{}.png", id)}
            }
        }
    })
}
