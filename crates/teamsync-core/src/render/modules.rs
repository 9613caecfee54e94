//! Root `main.tf`: a `teams` map passed to the teams and folders modules

use super::builder::{quote, HclBuilder};
use super::GENERATED_HEADER;
use crate::directory::Group;
use crate::naming::normalize;

/// Folder title for a group's team folder
pub fn folder_label(group: &Group) -> String {
    group.name.clone()
}

pub fn render(groups: &[Group]) -> String {
    HclBuilder::new()
        .comment(GENERATED_HEADER)
        .blank()
        .block("locals", |b| {
            if groups.is_empty() {
                b.line("teams = {}")
            } else {
                b.block("teams =", |b| {
                    b.each(groups, |b, group| {
                        b.block(&format!("{} =", quote(&normalize(&group.name))), |b| {
                            b.attrs(&[
                                ("name", quote(&group.name)),
                                ("group", quote(&group.identifier)),
                                ("folder", quote(&folder_label(group))),
                            ])
                        })
                    })
                })
            }
        })
        .blank()
        .block("module \"teams\"", |b| {
            b.attrs(&[
                ("source", quote("./modules/teams")),
                ("teams", "local.teams".to_string()),
            ])
        })
        .blank()
        .block("module \"folders\"", |b| {
            b.attrs(&[
                ("source", quote("./modules/folders")),
                ("teams", "local.teams".to_string()),
                ("team_ids", "module.teams.team_ids".to_string()),
            ])
        })
        .build()
}
