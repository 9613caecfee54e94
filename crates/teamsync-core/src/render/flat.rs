//! One standalone team resource plus external-group link per group

use super::builder::{quote, HclBuilder};
use super::GENERATED_HEADER;
use crate::directory::Group;
use crate::naming::normalize;

pub fn render(groups: &[Group]) -> String {
    HclBuilder::new()
        .comment(GENERATED_HEADER)
        .each(groups, |b, group| {
            let id = normalize(&group.name);
            b.blank()
                .block(&format!("resource \"grafana_team\" \"{}\"", id), |b| {
                    b.attrs(&[("name", quote(&group.name))])
                })
                .blank()
                .block(
                    &format!("resource \"grafana_team_external_group\" \"{}_group\"", id),
                    |b| {
                        b.attrs(&[
                            ("team_id", format!("grafana_team.{}.id", id)),
                            ("groups", format!("[{}]", quote(&group.identifier))),
                        ])
                    },
                )
        })
        .build()
}
