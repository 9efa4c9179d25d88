use std::path::PathBuf;

/// Every type the badge folder ships an image for.
pub const KNOWN_TYPES: [&str; 18] = [
    "grass", "fire", "water", "bug", "normal", "dark", "poison", "electric", "ground", "ice",
    "fairy", "steel", "fighting", "psychic", "rock", "ghost", "dragon", "flying",
];

pub const PORTRAIT_DIR: &str = "Pokemon Pictures";
pub const BADGE_DIR: &str = "Type Pictures";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub path: PathBuf,
}

/// Maps record ids to portraits and type names to badges. `None` means the
/// image is not available; callers render a placeholder.
pub trait AssetResolver {
    fn portrait(&self, id: u32) -> Option<Asset>;
    fn badge(&self, type_name: &str) -> Option<Asset>;
}

/// Resolves assets from the two image folders under one root directory.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn portrait_path(&self, id: u32) -> PathBuf {
        self.root.join(PORTRAIT_DIR).join(format!("{id}.png"))
    }

    pub fn badge_path(&self, type_name: &str) -> PathBuf {
        self.root
            .join(BADGE_DIR)
            .join(format!("{}.png", capitalize(type_name.trim())))
    }
}

impl AssetResolver for DirAssets {
    fn portrait(&self, id: u32) -> Option<Asset> {
        let path = self.portrait_path(id);
        path.is_file().then_some(Asset { path })
    }

    fn badge(&self, type_name: &str) -> Option<Asset> {
        let key = type_name.trim().to_ascii_lowercase();
        if !KNOWN_TYPES.contains(&key.as_str()) {
            return None;
        }
        let path = self.badge_path(&key);
        path.is_file().then_some(Asset { path })
    }
}

fn capitalize(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_file_names_are_capitalized() {
        let assets = DirAssets::new("assets");
        assert_eq!(
            assets.badge_path("fire"),
            PathBuf::from("assets").join(BADGE_DIR).join("Fire.png")
        );
        assert_eq!(
            assets.portrait_path(25),
            PathBuf::from("assets").join(PORTRAIT_DIR).join("25.png")
        );
    }

    #[test]
    fn missing_files_resolve_to_none() {
        let assets = DirAssets::new("definitely/not/a/real/dir");
        assert_eq!(assets.portrait(1), None);
        assert_eq!(assets.badge("grass"), None);
        assert_eq!(assets.badge("cosmic"), None);
    }
}
