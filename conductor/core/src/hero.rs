//! Hero Records
//!
//! Payload types returned by the roster service. The screen only ever looks at
//! `localized_name`; everything else is carried through untouched for the
//! surface to render. Unknown fields are preserved in `extra` so that a newer
//! service schema does not break decoding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Anything that carries a display name usable for lookup
pub trait Named {
    /// The display name (`localized_name` on the wire)
    fn display_name(&self) -> &str;
}

/// Case-insensitive exact match on display name
#[must_use]
pub fn name_matches(display_name: &str, identifier: &str) -> bool {
    display_name.to_lowercase() == identifier.to_lowercase()
}

/// Find the first record whose display name matches `identifier`
///
/// Roster order is preserved, so when two records share a name the earlier
/// one wins.
pub fn find_by_name<'a, T: Named>(roster: &'a [T], identifier: &str) -> Option<&'a T> {
    roster
        .iter()
        .find(|record| name_matches(record.display_name(), identifier))
}

/// Entry in the hero roster (first lookup stage)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroRecord {
    /// Numeric hero id
    #[serde(default)]
    pub id: Option<u32>,
    /// Internal name (`npc_dota_hero_*`)
    #[serde(default)]
    pub name: Option<String>,
    /// Display name
    pub localized_name: String,
    /// Primary attribute code
    #[serde(default)]
    pub primary_attr: Option<String>,
    /// Melee or Ranged
    #[serde(default)]
    pub attack_type: Option<String>,
    /// Role tags
    #[serde(default)]
    pub roles: Vec<String>,
    /// Fields this crate does not model
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl HeroRecord {
    /// Create a record with only a display name
    pub fn named(localized_name: impl Into<String>) -> Self {
        Self {
            localized_name: localized_name.into(),
            ..Default::default()
        }
    }

    /// Lines of the hero detail card
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![self.localized_name.clone()];
        if let Some(attr) = &self.primary_attr {
            lines.push(format!("Primary Attribute: {attr}"));
        }
        if let Some(attack_type) = &self.attack_type {
            lines.push(format!("Attack Type: {attack_type}"));
        }
        lines
    }
}

impl Named for HeroRecord {
    fn display_name(&self) -> &str {
        &self.localized_name
    }
}

/// Full stats record (second lookup stage)
///
/// All fields other than `localized_name` are optional: the service omits
/// values it does not know and the screen never interprets them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct HeroStats {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    /// Display name, the only required field
    pub localized_name: String,
    #[serde(default)]
    pub primary_attr: Option<String>,
    #[serde(default)]
    pub attack_type: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub base_health: Option<f64>,
    #[serde(default)]
    pub base_health_regen: Option<f64>,
    #[serde(default)]
    pub base_mana: Option<f64>,
    #[serde(default)]
    pub base_mana_regen: Option<f64>,
    #[serde(default)]
    pub base_armor: Option<f64>,
    #[serde(default)]
    pub base_mr: Option<f64>,
    #[serde(default)]
    pub base_attack_min: Option<f64>,
    #[serde(default)]
    pub base_attack_max: Option<f64>,
    #[serde(default)]
    pub base_str: Option<f64>,
    #[serde(default)]
    pub base_agi: Option<f64>,
    #[serde(default)]
    pub base_int: Option<f64>,
    #[serde(default)]
    pub str_gain: Option<f64>,
    #[serde(default)]
    pub agi_gain: Option<f64>,
    #[serde(default)]
    pub int_gain: Option<f64>,
    #[serde(default)]
    pub attack_range: Option<f64>,
    #[serde(default)]
    pub projectile_speed: Option<f64>,
    #[serde(default)]
    pub attack_rate: Option<f64>,
    #[serde(default)]
    pub base_attack_time: Option<f64>,
    #[serde(default)]
    pub attack_point: Option<f64>,
    #[serde(default)]
    pub move_speed: Option<f64>,
    #[serde(default)]
    pub turn_rate: Option<f64>,
    #[serde(default)]
    pub cm_enabled: Option<bool>,
    #[serde(default)]
    pub legs: Option<f64>,
    #[serde(default)]
    pub hero_id: Option<u32>,
    /// Fields this crate does not model
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl HeroStats {
    /// Create a stats record with only a display name
    pub fn named(localized_name: impl Into<String>) -> Self {
        Self {
            localized_name: localized_name.into(),
            ..Default::default()
        }
    }

    /// Lines of the stats panel, in display order
    ///
    /// Missing values are skipped rather than rendered as blanks.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{} Stats", self.localized_name)];

        if let Some(attr) = &self.primary_attr {
            lines.push(format!("Primary Attribute: {attr}"));
        }
        if let Some(attack_type) = &self.attack_type {
            lines.push(format!("Attack Type: {attack_type}"));
        }
        if !self.roles.is_empty() {
            lines.push(format!("Roles: {}", self.roles.join(", ")));
        }

        let numeric = [
            ("Base Health", self.base_health),
            ("Base Health Regen", self.base_health_regen),
            ("Base Mana", self.base_mana),
            ("Base Mana Regen", self.base_mana_regen),
            ("Base Armor", self.base_armor),
        ];
        push_numeric(&mut lines, &numeric);

        if let Some(mr) = self.base_mr {
            lines.push(format!("Base Magic Resistance: {}%", fmt_num(mr)));
        }
        if let (Some(min), Some(max)) = (self.base_attack_min, self.base_attack_max) {
            lines.push(format!(
                "Base Attack Damage: {} - {}",
                fmt_num(min),
                fmt_num(max)
            ));
        }

        let numeric = [
            ("Base Strength", self.base_str),
            ("Base Agility", self.base_agi),
            ("Base Intelligence", self.base_int),
            ("Attack Range", self.attack_range),
            ("Projectile Speed", self.projectile_speed),
            ("Attack Rate", self.attack_rate),
            ("Base Attack Time", self.base_attack_time),
            ("Attack Point", self.attack_point),
            ("Movement Speed", self.move_speed),
            ("Turn Rate", self.turn_rate),
            ("Legs", self.legs),
        ];
        push_numeric(&mut lines, &numeric);

        lines
    }
}

impl Named for HeroStats {
    fn display_name(&self) -> &str {
        &self.localized_name
    }
}

fn push_numeric(lines: &mut Vec<String>, fields: &[(&str, Option<f64>)]) {
    for (label, value) in fields {
        if let Some(value) = value {
            lines.push(format!("{label}: {}", fmt_num(*value)));
        }
    }
}

/// Integers print without a trailing `.0`
fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
