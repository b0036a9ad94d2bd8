use repoflow_api_models::WorkspaceCreateRequest;

use crate::cli::{NameArgs, WorkspaceCreateArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::emit;

pub(crate) async fn handle_workspace_list(ctx: &AppContext) -> CliResult<()> {
    let workspaces = ctx.api.list_workspaces().await?;
    emit(&workspaces, ctx.output)
}

pub(crate) async fn handle_workspace_get(ctx: &AppContext, args: NameArgs) -> CliResult<()> {
    let name = required_name(&args.name)?;
    let workspace = ctx.api.get_workspace(name).await?;
    emit(&workspace, ctx.output)
}

pub(crate) async fn handle_workspace_delete(ctx: &AppContext, args: NameArgs) -> CliResult<()> {
    let name = required_name(&args.name)?;
    let result = ctx.api.delete_workspace(name).await?;
    if ctx.output.is_text() {
        println!("Successfully deleted workspace '{name}'");
        return Ok(());
    }
    emit(&result, ctx.output)
}

pub(crate) async fn handle_workspace_create(
    ctx: &AppContext,
    args: WorkspaceCreateArgs,
) -> CliResult<()> {
    let request = workspace_request(args)?;
    let created = ctx.api.create_workspace(&request).await?;
    if ctx.output.is_text() {
        println!("Successfully created workspace '{}'.", request.name);
        return Ok(());
    }
    emit(&created, ctx.output)
}

/// Map the create flags onto the request body; unset limits stay unset.
pub(crate) fn workspace_request(args: WorkspaceCreateArgs) -> CliResult<WorkspaceCreateRequest> {
    let name = required_name(&args.name)?.to_string();
    Ok(WorkspaceCreateRequest {
        name,
        package_limit: args.package_limit,
        bandwidth_limit: args.bandwidth_limit,
        storage_limit: args.storage_limit,
        comments: args.comments,
    })
}

pub(crate) fn required_name(name: &str) -> CliResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CliError::validation("name must not be empty"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use httpmock::Method::DELETE;
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::client::tests::client_for;
    use crate::output::OutputFormat;

    fn context_with(server: &MockServer, output: OutputFormat) -> AppContext {
        AppContext {
            api: client_for(server, Some("token")),
            output,
        }
    }

    fn create_args(name: &str) -> WorkspaceCreateArgs {
        WorkspaceCreateArgs {
            name: name.to_string(),
            package_limit: None,
            bandwidth_limit: None,
            storage_limit: None,
            comments: None,
        }
    }

    #[test]
    fn request_keeps_explicit_zero_limits() {
        let mut args = create_args(" team ");
        args.storage_limit = Some(0);
        args.comments = Some("ci".to_string());
        let request = workspace_request(args).expect("valid args");
        assert_eq!(request.name, "team");
        assert_eq!(request.storage_limit, Some(0));
        assert_eq!(request.package_limit, None);
        assert_eq!(request.comments.as_deref(), Some("ci"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = workspace_request(create_args("   ")).expect_err("blank name");
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[tokio::test]
    async fn create_posts_limits_and_comment() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/1/workspaces")
                .header("authorization", "Bearer token")
                .json_body(json!({"name": "team", "bandwidthLimit": 500, "comment": "ci"}));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({"id": "w2", "name": "team"}));
        });

        let mut args = create_args("team");
        args.bandwidth_limit = Some(500);
        args.comments = Some("ci".to_string());
        handle_workspace_create(&context_with(&server, OutputFormat::Text), args)
            .await
            .map_err(|err| anyhow::anyhow!(err.display_message()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn list_renders_in_every_format() -> Result<()> {
        for output in [OutputFormat::Text, OutputFormat::Yaml, OutputFormat::Json] {
            let server = MockServer::start_async().await;
            let mock = server.mock(|when, then| {
                when.method(GET).path("/api/1/workspaces");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([{"id": "w1", "name": "main"}]));
            });

            handle_workspace_list(&context_with(&server, output))
                .await
                .map_err(|err| anyhow::anyhow!(err.display_message()))?;
            mock.assert();
        }
        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_api_errors_as_failures() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/api/1/workspaces/main");
            then.status(403)
                .header("content-type", "application/json")
                .json_body(json!({"code": "FORBIDDEN", "message": "not an owner"}));
        });

        let err = handle_workspace_delete(
            &context_with(&server, OutputFormat::Json),
            NameArgs {
                name: "main".to_string(),
            },
        )
        .await
        .expect_err("403 must fail");
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.display_message(),
            "API Error (403): FORBIDDEN - not an owner"
        );
    }

    #[tokio::test]
    async fn transport_failure_is_not_an_api_error() {
        let ctx = AppContext {
            api: crate::client::ApiClient::new(
                "http://127.0.0.1:1/api".parse().expect("url"),
                None,
                "trace",
            )
            .expect("client"),
            output: OutputFormat::Text,
        };

        let err = handle_workspace_get(
            &ctx,
            NameArgs {
                name: "main".to_string(),
            },
        )
        .await
        .expect_err("unreachable server");
        let message = err.display_message();
        assert!(
            message.starts_with("request to GET http://127.0.0.1:1/api/1/workspaces/main failed")
        );
        assert!(!message.contains("API Error"));
    }
}
