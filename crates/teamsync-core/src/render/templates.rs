//! Static Terraform boilerplate written alongside the generated files

/// Grafana provider version constraint used by every generated module
pub const GRAFANA_PROVIDER_VERSION: &str = "~> 3.4.0";

/// Root `terraform.tf`: provider requirements, provider config and inputs
pub const ROOT_TERRAFORM: &str = r#"# Terraform settings and provider configurations

terraform {
  required_providers {
    grafana = {
      source  = "grafana/grafana"
      version = "~> 3.4.0"
    }
  }
}

provider "grafana" {
  url        = var.grafana_url
  auth       = var.grafana_auth
  retries    = 5
  retry_wait = 10
}

variable "grafana_url" {
  type        = string
  description = "The URL of your Grafana instance"
}

variable "grafana_auth" {
  type        = string
  description = "The API key or auth token for Grafana"
  sensitive   = true
}
"#;

/// `modules/teams/main.tf`: one team per map entry, linked to its directory group
pub const TEAMS_MODULE_MAIN: &str = r#"# Grafana teams synchronized from directory groups

variable "teams" {
  type = map(object({
    name   = string
    group  = string
    folder = string
  }))
  description = "Teams keyed by resource name"
}

resource "grafana_team" "this" {
  for_each = var.teams

  name = each.value.name
}

resource "grafana_team_external_group" "this" {
  for_each = var.teams

  team_id = grafana_team.this[each.key].id
  groups  = [each.value.group]
}

output "team_ids" {
  value       = { for key, team in grafana_team.this : key => team.id }
  description = "Grafana team ids keyed by resource name"
}
"#;

/// `modules/folders/main.tf`: one folder per team, editable by that team
pub const FOLDERS_MODULE_MAIN: &str = r#"# Grafana folders owned by synchronized teams

variable "teams" {
  type = map(object({
    name   = string
    group  = string
    folder = string
  }))
  description = "Teams keyed by resource name"
}

variable "team_ids" {
  type        = map(string)
  description = "Grafana team ids keyed by resource name"
}

resource "grafana_folder" "this" {
  for_each = var.teams

  title = each.value.folder
}

resource "grafana_folder_permission" "this" {
  for_each = var.teams

  folder_uid = grafana_folder.this[each.key].uid

  permissions {
    team_id    = var.team_ids[each.key]
    permission = "Edit"
  }
}

output "folder_uids" {
  value       = { for key, folder in grafana_folder.this : key => folder.uid }
  description = "Grafana folder uids keyed by resource name"
}
"#;

/// `modules/<name>/terraform.tf`: provider requirements for a child module
pub fn module_terraform(module: &str) -> String {
    format!(
        r#"# Terraform settings and provider configurations for {module} module

terraform {{
  required_providers {{
    grafana = {{
      source  = "grafana/grafana"
      version = "{version}"
    }}
  }}
}}
"#,
        module = module,
        version = GRAFANA_PROVIDER_VERSION
    )
}
