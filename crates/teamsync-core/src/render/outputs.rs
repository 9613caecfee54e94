//! Aggregate output mapping resource names to team ids

use super::builder::{quote, HclBuilder};
use super::GENERATED_HEADER;
use crate::directory::Group;
use crate::naming::normalize;

pub fn render(groups: &[Group]) -> String {
    let entries: Vec<(String, String)> = groups
        .iter()
        .map(|group| {
            let id = normalize(&group.name);
            (quote(&id), format!("grafana_team.{}.id", id))
        })
        .collect();

    HclBuilder::new()
        .comment(GENERATED_HEADER)
        .blank()
        .block("output \"team_ids\"", |b| {
            if entries.is_empty() {
                b.line("value = {}")
            } else {
                let attrs: Vec<(&str, String)> = entries
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.clone()))
                    .collect();
                b.block("value =", |b| b.attrs(&attrs))
            }
        })
        .build()
}
