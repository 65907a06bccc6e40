use crate::api::models::{Champion, MetadataDto};

/// The champion list from the static metadata, loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct ChampionRoster {
    champions: Vec<Champion>,
}

impl ChampionRoster {
    pub fn new(champions: Vec<Champion>) -> Self {
        ChampionRoster { champions }
    }

    /// Case-insensitive exact match on the display name.
    pub fn find(&self, input: &str) -> Option<&Champion> {
        let wanted = input.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }

        self.champions
            .iter()
            .find(|c| c.name.to_lowercase() == wanted)
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }
}

impl From<&MetadataDto> for ChampionRoster {
    fn from(meta: &MetadataDto) -> Self {
        ChampionRoster::new(meta.champions.clone())
    }
}

#[cfg(test)]
pub(crate) fn champion(name: &str) -> Champion {
    Champion {
        name: name.to_string(),
        shortname: name.to_lowercase().replace([' ', '\''], ""),
        img: format!("img/{}.png", name.to_lowercase()),
        games: 1000,
        title: String::new(),
    }
}
