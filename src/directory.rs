use crate::model::UserId;
use crate::zone::Zone;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Membre d'une zone (`GET /api/auth/user/zone/{zone}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneMember {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub name: String,
    pub zone: Zone,
}

/// Annuaire d'une zone : résolution id → nom.
#[derive(Debug, Clone, Default)]
pub struct ZoneDirectory {
    members: BTreeMap<UserId, ZoneMember>,
}

impl ZoneDirectory {
    pub fn new(members: Vec<ZoneMember>) -> Self {
        Self {
            members: members.into_iter().map(|m| (m.id.clone(), m)).collect(),
        }
    }

    pub fn get(&self, id: &UserId) -> Option<&ZoneMember> {
        self.members.get(id)
    }

    /// Nom affichable ; l'id brut sert de repli pour un utilisateur hors annuaire.
    pub fn name_of<'a>(&'a self, id: &'a UserId) -> &'a str {
        self.members
            .get(id)
            .map(|m| m.name.as_str())
            .unwrap_or_else(|| id.as_str())
    }

    pub fn members(&self) -> impl Iterator<Item = &ZoneMember> {
        self.members.values()
    }

    /// Collègues pouvant recevoir une demande (tout le monde sauf `me`).
    pub fn colleagues(&self, me: &UserId) -> impl Iterator<Item = &ZoneMember> + '_ {
        let me = me.clone();
        self.members.values().filter(move |m| m.id != me)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ZoneMember> {
        self.members
            .values()
            .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Abrège un nom : deux mots → trois premières lettres de chacun, un mot → inchangé,
/// plus de deux → initiales en majuscules.
pub fn abbreviate_name(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => String::new(),
        [single] => (*single).to_owned(),
        [first, last] => format!(
            "{} {}",
            first.chars().take(3).collect::<String>(),
            last.chars().take(3).collect::<String>()
        ),
        many => many
            .iter()
            .filter_map(|p| p.chars().next())
            .flat_map(char::to_uppercase)
            .collect(),
    }
}
