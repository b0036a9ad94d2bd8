use repoflow_api_models::{
    LocalRepositoryRequest, RemoteRepositoryRequest, RepositoryCreateRequest,
    VirtualRepositoryRequest,
};

use crate::cli::{CreateStoreCommand, NameArgs, RepositoryCreateArgs, required_flag};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::workspace::required_name;
use crate::output::emit;

pub(crate) async fn handle_repository_list(ctx: &AppContext, workspace: &str) -> CliResult<()> {
    let repositories = ctx.api.list_repositories(workspace).await?;
    emit(&repositories, ctx.output)
}

pub(crate) async fn handle_repository_get(
    ctx: &AppContext,
    workspace: &str,
    args: NameArgs,
) -> CliResult<()> {
    let name = required_name(&args.name)?;
    let repository = ctx.api.get_repository(workspace, name).await?;
    emit(&repository, ctx.output)
}

pub(crate) async fn handle_repository_packages(
    ctx: &AppContext,
    workspace: &str,
    args: NameArgs,
) -> CliResult<()> {
    let name = required_name(&args.name)?;
    let packages = ctx.api.list_repository_packages(workspace, name).await?;
    emit(&packages, ctx.output)
}

pub(crate) async fn handle_repository_delete(
    ctx: &AppContext,
    workspace: &str,
    args: NameArgs,
) -> CliResult<()> {
    let name = required_name(&args.name)?;
    let deletion = ctx.api.delete_repository(workspace, name).await?;
    if ctx.output.is_text() {
        println!("Successfully deleted repository '{name}' workspace '{workspace}'");
        return Ok(());
    }
    emit(&deletion, ctx.output)
}

pub(crate) async fn handle_repository_prune(
    ctx: &AppContext,
    workspace: &str,
    args: NameArgs,
) -> CliResult<()> {
    let name = required_name(&args.name)?;
    let deletion = ctx.api.delete_repository_content(workspace, name).await?;
    if ctx.output.is_text() {
        println!("Successfully deleted content of repository '{name}' workspace '{workspace}'");
        return Ok(());
    }
    emit(&deletion, ctx.output)
}

pub(crate) async fn handle_repository_create(
    ctx: &AppContext,
    workspace: &str,
    args: RepositoryCreateArgs,
) -> CliResult<()> {
    let request = repository_request(args)?;
    let created = ctx.api.create_repository(workspace, &request).await?;
    if ctx.output.is_text() {
        println!(
            "Successfully created repository '{}' on workspace '{workspace}'.",
            request.name()
        );
        return Ok(());
    }
    emit(&created, ctx.output)
}

/// Build the creation payload for the selected store kind.
pub(crate) fn repository_request(args: RepositoryCreateArgs) -> CliResult<RepositoryCreateRequest> {
    let package_type = required_flag(args.package_type, "--type")?;

    let request = match args.store {
        CreateStoreCommand::Local(local) => RepositoryCreateRequest::Local(LocalRepositoryRequest {
            name: required_name(&local.name)?.to_string(),
            package_type,
        }),
        CreateStoreCommand::Remote(remote) => {
            RepositoryCreateRequest::Remote(RemoteRepositoryRequest {
                name: required_name(&remote.name)?.to_string(),
                package_type,
                remote_repository_url: remote.remote_url,
                is_remote_cache_enabled: remote.cache,
                remote_repository_username: remote.remote_username,
                remote_repository_password: remote
                    .remote_password
                    .filter(|password| !password.is_empty()),
                file_cache_time_till_revalidation: revalidation_ms(remote.file_cache_ttr),
                metadata_cache_time_till_revalidation: revalidation_ms(remote.metadata_cache_ttr),
            })
        }
        CreateStoreCommand::Virtual(virtual_args) => {
            let children: Vec<String> = virtual_args
                .child_repositories
                .into_iter()
                .map(|child| child.trim().to_string())
                .filter(|child| !child.is_empty())
                .collect();
            if children.is_empty() {
                return Err(CliError::validation(
                    "at least one --child-repository is required",
                ));
            }
            let upload_target = virtual_args
                .local_repository
                .map(|local| local.trim().to_string())
                .filter(|local| !local.is_empty());
            if let Some(local) = &upload_target
                && !children.contains(local)
            {
                return Err(CliError::validation(format!(
                    "--local-repository '{local}' must also be listed in --child-repository"
                )));
            }
            RepositoryCreateRequest::Virtual(VirtualRepositoryRequest {
                name: required_name(&virtual_args.name)?.to_string(),
                package_type,
                child_repository_ids: children,
                upload_local_repository_id: upload_target,
            })
        }
    };
    Ok(request)
}

/// Negative values mean "revalidate never" and are left out of the body.
const fn revalidation_ms(value: Option<i64>) -> Option<i64> {
    match value {
        Some(ms) if ms >= 0 => Some(ms),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use httpmock::Method::DELETE;
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::cli::{LocalCreateArgs, RemoteCreateArgs, VirtualCreateArgs};
    use crate::client::tests::client_for;
    use crate::output::OutputFormat;

    fn context_with(server: &MockServer, output: OutputFormat) -> AppContext {
        AppContext {
            api: client_for(server, None),
            output,
        }
    }

    fn remote_args() -> RemoteCreateArgs {
        RemoteCreateArgs {
            name: "npmjs".to_string(),
            remote_url: "https://registry.npmjs.org".to_string(),
            remote_username: "bot".to_string(),
            remote_password: None,
            cache: true,
            file_cache_ttr: None,
            metadata_cache_ttr: None,
        }
    }

    fn create(store: CreateStoreCommand) -> RepositoryCreateArgs {
        RepositoryCreateArgs {
            package_type: Some("npm".to_string()),
            store,
        }
    }

    fn virtual_args(children: &[&str], local: Option<&str>) -> VirtualCreateArgs {
        VirtualCreateArgs {
            name: "all-npm".to_string(),
            child_repositories: children.iter().map(ToString::to_string).collect(),
            local_repository: local.map(str::to_string),
        }
    }

    #[test]
    fn missing_type_is_a_validation_error() {
        let args = RepositoryCreateArgs {
            package_type: None,
            store: CreateStoreCommand::Local(LocalCreateArgs {
                name: "libs".to_string(),
            }),
        };
        let err = repository_request(args).expect_err("type is required");
        assert_eq!(err.display_message(), "--type is required");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn negative_revalidation_is_omitted() {
        let mut remote = remote_args();
        remote.file_cache_ttr = Some(-1);
        remote.metadata_cache_ttr = Some(0);
        let request =
            repository_request(create(CreateStoreCommand::Remote(remote))).expect("valid remote");
        let RepositoryCreateRequest::Remote(body) = &request else {
            panic!("expected remote payload");
        };
        assert_eq!(body.file_cache_time_till_revalidation, None);
        assert_eq!(body.metadata_cache_time_till_revalidation, Some(0));
        assert_eq!(request.store(), "remote");
    }

    #[test]
    fn empty_password_is_not_sent() {
        let mut remote = remote_args();
        remote.remote_password = Some(String::new());
        let request =
            repository_request(create(CreateStoreCommand::Remote(remote))).expect("valid remote");
        let value = serde_json::to_value(&request).expect("serialise");
        assert!(value.get("remoteRepositoryPassword").is_none());
    }

    #[test]
    fn upload_target_must_be_a_child() {
        let err = repository_request(create(CreateStoreCommand::Virtual(virtual_args(
            &["r1"],
            Some("l1"),
        ))))
        .expect_err("l1 is not a child");
        assert!(matches!(err, CliError::Validation(message) if message.contains("'l1'")));

        let request = repository_request(create(CreateStoreCommand::Virtual(virtual_args(
            &["l1", "r1"],
            Some("l1"),
        ))))
        .expect("valid virtual");
        assert_eq!(request.store(), "virtual");
    }

    #[test]
    fn blank_children_are_rejected() {
        let err = repository_request(create(CreateStoreCommand::Virtual(virtual_args(
            &[" ", ""],
            None,
        ))))
        .expect_err("no usable children");
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[tokio::test]
    async fn create_remote_posts_to_remote_store() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/1/workspaces/main/repositories/remote")
                .json_body(json!({
                    "name": "npmjs",
                    "packageType": "npm",
                    "remoteRepositoryUrl": "https://registry.npmjs.org",
                    "isRemoteCacheEnabled": true,
                    "remoteRepositoryUsername": "bot"
                }));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({
                    "id": "r1",
                    "name": "npmjs",
                    "packageType": "npm",
                    "repositoryType": "remote",
                    "status": "active"
                }));
        });

        let mut remote = remote_args();
        remote.file_cache_ttr = Some(-1);
        handle_repository_create(
            &context_with(&server, OutputFormat::Json),
            "main",
            create(CreateStoreCommand::Remote(remote)),
        )
        .await
        .map_err(|err| anyhow::anyhow!(err.display_message()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn prune_targets_content_endpoint() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE)
                .path("/api/1/workspaces/main/repositories/libs/content");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"repositoryId": "l1", "status": "purged"}));
        });

        handle_repository_prune(
            &context_with(&server, OutputFormat::Text),
            "main",
            NameArgs {
                name: "libs".to_string(),
            },
        )
        .await
        .map_err(|err| anyhow::anyhow!(err.display_message()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn no_content_delete_and_prune_succeed() -> Result<()> {
        let server = MockServer::start_async().await;
        let delete = server.mock(|when, then| {
            when.method(DELETE)
                .path("/api/1/workspaces/main/repositories/libs");
            then.status(204);
        });
        let purge = server.mock(|when, then| {
            when.method(DELETE)
                .path("/api/1/workspaces/main/repositories/libs/content");
            then.status(204);
        });

        let libs = || NameArgs {
            name: "libs".to_string(),
        };
        handle_repository_delete(&context_with(&server, OutputFormat::Text), "main", libs())
            .await
            .map_err(|err| anyhow::anyhow!(err.display_message()))?;
        handle_repository_prune(&context_with(&server, OutputFormat::Json), "main", libs())
            .await
            .map_err(|err| anyhow::anyhow!(err.display_message()))?;
        delete.assert();
        purge.assert();
        Ok(())
    }

    #[tokio::test]
    async fn packages_render_as_table() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/1/workspaces/main/repositories/libs/packages");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"total": 0, "offset": 0, "limit": 20, "packages": []}));
        });

        handle_repository_packages(
            &context_with(&server, OutputFormat::Text),
            "main",
            NameArgs {
                name: "libs".to_string(),
            },
        )
        .await
        .map_err(|err| anyhow::anyhow!(err.display_message()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn error_list_surfaces_as_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/1/workspaces/main/repositories");
            then.status(400)
                .header("content-type", "application/json")
                .json_body(json!({"errors": ["workspace is archived", "read only"]}));
        });

        let err = handle_repository_list(&context_with(&server, OutputFormat::Text), "main")
            .await
            .expect_err("400 must fail");
        assert_eq!(
            err.display_message(),
            "API Errors (400): workspace is archived; read only"
        );
    }
}
