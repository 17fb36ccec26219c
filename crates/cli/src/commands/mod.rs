//! Command implementations.
//!
//! Every list/delete/patch command builds the same chain: config → session →
//! REST client → list controller, then renders the controller's working
//! collection or reports the operation result. Confirmation prompts live
//! here; the controller never prompts.

use std::io::{self, Write as _};

use serde_json::{Map, Value, json};
use thiserror::Error;
use xomo_admin_console::client::ResourceRoutes;
use xomo_admin_console::config::ConfigError;
use xomo_admin_console::{
    ConsoleConfig, ListConfig, OperationError, ResourceListController, RestClient, SessionContext,
    kinds,
};
use xomo_admin_core::{ResourceId, ResourceRecord};

mod table;

/// Errors surfaced to the operator.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A remote operation failed.
    #[error("{0}")]
    Operation(#[from] OperationError),

    /// Reading the confirmation prompt failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Client-side list options common to every `list` command.
pub struct ListOpts {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub desc: bool,
}

/// Shared command context: configuration, HTTP pool, session.
pub struct Context {
    config: ConsoleConfig,
    http: reqwest::Client,
    session: SessionContext,
}

impl Context {
    /// Build the context from the environment and hydrate the session.
    pub fn from_env() -> Result<Self, CliError> {
        let config = ConsoleConfig::from_env()?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let session = SessionContext::new();
        session.hydrate(config.token.clone(), None);
        Ok(Self {
            config,
            http,
            session,
        })
    }

    fn client<R: ResourceRecord>(&self, routes: ResourceRoutes) -> RestClient<R> {
        RestClient::new(
            self.http.clone(),
            self.config.api_base_url.clone(),
            self.session.clone(),
            routes,
        )
    }

    async fn controller<R: ResourceRecord>(
        &self,
        routes: ResourceRoutes,
        list_config: ListConfig<R>,
    ) -> Result<ResourceListController<RestClient<R>>, CliError> {
        let controller = ResourceListController::new(self.client(routes), list_config);
        controller.load().await?;
        Ok(controller)
    }

    async fn run_list<R: ResourceRecord>(
        &self,
        routes: ResourceRoutes,
        list_config: ListConfig<R>,
        columns: &[(&str, &str)],
        opts: &ListOpts,
    ) -> Result<(), CliError> {
        let controller = self.controller(routes, list_config).await?;
        if let Some(term) = &opts.search {
            controller.set_search_term(term);
        }
        if let Some(field) = &opts.sort {
            controller.set_sort(field);
            if opts.desc {
                controller.set_sort(field);
            }
        }

        let working = controller.working();
        let rows: Vec<Vec<String>> = working
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|(_, path)| record.field_text(path).unwrap_or_else(|| "-".to_string()))
                    .collect()
            })
            .collect();
        let headers: Vec<&str> = columns.iter().map(|(header, _)| *header).collect();
        table::render(&headers, &rows);
        Ok(())
    }

    async fn run_delete<R: ResourceRecord>(
        &self,
        routes: ResourceRoutes,
        raw_id: &str,
        skip_confirm: bool,
    ) -> Result<(), CliError> {
        let kind = routes.kind;
        let id = parse_id(raw_id);
        let controller = self.controller(routes, ListConfig::<R>::new()).await?;

        if !controller.working().iter().any(|r| r.id() == id) {
            println!("No {kind} entry with id {id}");
            return Ok(());
        }
        if !skip_confirm && !confirm(&format!("Delete {kind} {id}? This cannot be undone."))? {
            println!("Aborted");
            return Ok(());
        }

        controller.remove_resource(&id).await?;
        println!("Deleted {kind} {id}");
        Ok(())
    }

    async fn run_patch<R: ResourceRecord>(
        &self,
        routes: ResourceRoutes,
        raw_id: &str,
        partial: Map<String, Value>,
    ) -> Result<(), CliError> {
        let kind = routes.kind;
        let id = parse_id(raw_id);
        let controller = self.controller(routes, ListConfig::<R>::new()).await?;

        if !controller.working().iter().any(|r| r.id() == id) {
            println!("No {kind} entry with id {id}");
            return Ok(());
        }

        controller.patch_resource(&id, partial).await?;
        println!("Updated {kind} {id}");
        Ok(())
    }

    pub async fn list_products(&self, opts: &ListOpts) -> Result<(), CliError> {
        self.run_list(
            kinds::products::routes(),
            kinds::products::list_config(),
            &[
                ("ID", "id"),
                ("Name", "name"),
                ("Price", "price"),
                ("Category", "category.name"),
            ],
            opts,
        )
        .await
    }

    pub async fn delete_product(&self, id: &str, yes: bool) -> Result<(), CliError> {
        self.run_delete::<xomo_admin_core::Product>(kinds::products::routes(), id, yes)
            .await
    }

    pub async fn list_categories(&self, opts: &ListOpts) -> Result<(), CliError> {
        self.run_list(
            kinds::categories::routes(),
            kinds::categories::list_config(),
            &[("ID", "id"), ("Name", "name"), ("Description", "description")],
            opts,
        )
        .await
    }

    pub async fn delete_category(&self, id: &str, yes: bool) -> Result<(), CliError> {
        self.run_delete::<xomo_admin_core::Category>(kinds::categories::routes(), id, yes)
            .await
    }

    pub async fn list_orders(&self, opts: &ListOpts) -> Result<(), CliError> {
        self.run_list(
            kinds::orders::routes(),
            kinds::orders::list_config(),
            &[
                ("ID", "id"),
                ("User", "user.email"),
                ("Total", "totalPrice"),
                ("Status", "status"),
            ],
            opts,
        )
        .await
    }

    pub async fn set_order_status(&self, id: &str, status: &str) -> Result<(), CliError> {
        let mut partial = Map::new();
        partial.insert("status".to_string(), json!(status.to_uppercase()));
        self.run_patch::<xomo_admin_core::Order>(kinds::orders::routes(), id, partial)
            .await
    }

    pub async fn list_users(&self, opts: &ListOpts) -> Result<(), CliError> {
        self.run_list(
            kinds::users::routes(),
            kinds::users::list_config(),
            &[
                ("ID", "id"),
                ("Email", "email"),
                ("Name", "name"),
                ("Roles", "roles"),
            ],
            opts,
        )
        .await
    }

    pub async fn delete_user(&self, id: &str, yes: bool) -> Result<(), CliError> {
        self.run_delete::<xomo_admin_core::User>(kinds::users::routes(), id, yes)
            .await
    }

    pub async fn set_user_roles(&self, id: &str, roles: &[String]) -> Result<(), CliError> {
        let mut partial = Map::new();
        partial.insert("roles".to_string(), json!(roles));
        self.run_patch::<xomo_admin_core::User>(kinds::users::routes(), id, partial)
            .await
    }

    pub async fn list_ads(&self, opts: &ListOpts) -> Result<(), CliError> {
        self.run_list(
            kinds::home_ads::routes(),
            kinds::home_ads::list_config(),
            &[
                ("ID", "id"),
                ("Title", "title"),
                ("Active", "active"),
                ("Position", "position"),
            ],
            opts,
        )
        .await
    }

    pub async fn delete_ad(&self, id: &str, yes: bool) -> Result<(), CliError> {
        self.run_delete::<xomo_admin_core::HomeAd>(kinds::home_ads::routes(), id, yes)
            .await
    }

    pub async fn list_inquiries(&self, opts: &ListOpts) -> Result<(), CliError> {
        self.run_list(
            kinds::inquiries::routes(),
            kinds::inquiries::list_config(),
            &[
                ("ID", "id"),
                ("Name", "name"),
                ("Email", "email"),
                ("Subject", "subject"),
                ("Date", "createdAt"),
            ],
            opts,
        )
        .await
    }

    pub fn whoami(&self) -> Result<(), CliError> {
        if !self.session.is_authenticated() {
            println!("Not signed in (set XOMO_ADMIN_TOKEN)");
            return Ok(());
        }
        println!("Signed in: yes");
        println!("Admin: {}", if self.session.is_admin() { "yes" } else { "no" });
        if let Some(admin) = self.session.current_admin() {
            if let Some(email) = admin.email {
                println!("Email: {email}");
            }
        }
        Ok(())
    }
}

/// Numeric IDs parse as integers; anything else stays a string key.
fn parse_id(raw: &str) -> ResourceId {
    raw.parse::<i64>().map_or_else(|_| ResourceId::from(raw), ResourceId::Int)
}

fn confirm(prompt: &str) -> Result<bool, io::Error> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), ResourceId::Int(42));
        assert_eq!(parse_id("ord-42"), ResourceId::from("ord-42"));
    }
}
