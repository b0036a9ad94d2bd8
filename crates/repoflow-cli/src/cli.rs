//! Command-line surface for managing `RepoFlow` workspaces and repositories.

use std::ffi::OsStr;
use std::path::PathBuf;

use clap::builder::{PossibleValue, StringValueParser, TypedValueParser};
use clap::{Args, Parser, Subcommand};
use repoflow_telemetry::{LogFormat, LoggingConfig, init_logging};
use uuid::Uuid;

use crate::client::{ApiClient, AppContext, CliError, CliResult};
use crate::commands::repository::{
    handle_repository_create, handle_repository_delete, handle_repository_get,
    handle_repository_list, handle_repository_packages, handle_repository_prune,
};
use crate::commands::workspace::{
    handle_workspace_create, handle_workspace_delete, handle_workspace_get, handle_workspace_list,
};
use crate::output::OutputFormat;

/// Parses CLI arguments, executes the requested command, and reports
/// failures on stderr. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let logging = LoggingConfig::for_cli(cli.debug, LogFormat::from_name(cli.log_format.as_deref()));
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    let command_name = command_label(&cli.command);
    let trace_id = Uuid::new_v4().to_string();

    match execute(cli, &trace_id).await {
        Ok(()) => 0,
        Err(err) => {
            let message = err.display_message();
            tracing::debug!(
                command = command_name,
                trace_id = %trace_id,
                exit_code = err.exit_code(),
                error = %message,
                "command failed"
            );
            eprintln!("error: {message}");
            err.exit_code()
        }
    }
}

async fn execute(cli: Cli, trace_id: &str) -> CliResult<()> {
    let config = repoflow_config::load(cli.config.as_deref())?;
    let api = ApiClient::new(
        config.base_url()?,
        config.token().map(str::to_string),
        trace_id,
    )?;
    tracing::debug!(url = %config.url, trace_id, "client configured");

    let ctx = AppContext {
        api,
        output: OutputFormat::from_flag(&cli.output),
    };
    dispatch(&ctx, cli.command).await
}

pub(crate) async fn dispatch(ctx: &AppContext, command: Command) -> CliResult<()> {
    match command {
        Command::Workspace(workspace) => match workspace {
            WorkspaceCommand::List => handle_workspace_list(ctx).await,
            WorkspaceCommand::Get(args) => handle_workspace_get(ctx, args).await,
            WorkspaceCommand::Delete(args) => handle_workspace_delete(ctx, args).await,
            WorkspaceCommand::Create(args) => handle_workspace_create(ctx, args).await,
        },
        Command::Repository(RepositoryArgs { workspace, command }) => {
            let workspace = required_flag(workspace, "--workspace")?;
            match command {
                RepositoryCommand::List => handle_repository_list(ctx, &workspace).await,
                RepositoryCommand::Get(args) => handle_repository_get(ctx, &workspace, args).await,
                RepositoryCommand::Packages(args) => {
                    handle_repository_packages(ctx, &workspace, args).await
                }
                RepositoryCommand::Delete(args) => {
                    handle_repository_delete(ctx, &workspace, args).await
                }
                RepositoryCommand::Prune(args) => {
                    handle_repository_prune(ctx, &workspace, args).await
                }
                RepositoryCommand::Create(args) => {
                    handle_repository_create(ctx, &workspace, args).await
                }
            }
        }
    }
}

/// Unwrap a flag clap cannot mark required because it is global.
pub(crate) fn required_flag(value: Option<String>, flag: &str) -> CliResult<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| CliError::validation(format!("{flag} is required")))
}

/// Accepts any `--output` string while advertising the known formats to help
/// and shell completion. Unknown values fall back to text at render time.
#[derive(Clone)]
struct OutputFlagParser;

impl TypedValueParser for OutputFlagParser {
    type Value = String;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        StringValueParser::new().parse_ref(cmd, arg, value)
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        Some(Box::new(
            ["text", "yaml", "json"].into_iter().map(PossibleValue::new),
        ))
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Workspace(workspace) => match workspace {
            WorkspaceCommand::List => "workspace_list",
            WorkspaceCommand::Get(_) => "workspace_get",
            WorkspaceCommand::Delete(_) => "workspace_delete",
            WorkspaceCommand::Create(_) => "workspace_create",
        },
        Command::Repository(args) => match &args.command {
            RepositoryCommand::List => "repository_list",
            RepositoryCommand::Get(_) => "repository_get",
            RepositoryCommand::Packages(_) => "repository_packages",
            RepositoryCommand::Delete(_) => "repository_delete",
            RepositoryCommand::Prune(_) => "repository_prune",
            RepositoryCommand::Create(_) => "repository_create",
        },
    }
}

#[derive(Parser)]
#[command(
    name = "repoflow",
    version,
    about = "Manage RepoFlow workspaces and repositories"
)]
pub(crate) struct Cli {
    #[arg(long, global = true, help = "Enable debug logging")]
    pub(crate) debug: bool,
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_parser = OutputFlagParser,
        help = "Output format"
    )]
    pub(crate) output: String,
    #[arg(
        long,
        global = true,
        env = "REPOFLOW_CONFIG",
        help = "Configuration file (default: first config.* in ./configs or .)"
    )]
    pub(crate) config: Option<PathBuf>,
    #[arg(long, global = true, env = "REPOFLOW_LOG_FORMAT", hide = true)]
    pub(crate) log_format: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Manage workspaces
    #[command(subcommand)]
    Workspace(WorkspaceCommand),
    /// Manage repositories inside a workspace
    Repository(RepositoryArgs),
}

#[derive(Subcommand)]
pub(crate) enum WorkspaceCommand {
    /// List all workspaces
    List,
    /// Show one workspace
    Get(NameArgs),
    /// Delete a workspace
    Delete(NameArgs),
    /// Create a workspace
    Create(WorkspaceCreateArgs),
}

#[derive(Args)]
pub(crate) struct NameArgs {
    #[arg(help = "Identifier or name")]
    pub(crate) name: String,
}

#[derive(Args)]
pub(crate) struct WorkspaceCreateArgs {
    #[arg(help = "Workspace name")]
    pub(crate) name: String,
    #[arg(short = 'p', long, help = "Maximum number of packages")]
    pub(crate) package_limit: Option<i64>,
    #[arg(short = 'b', long, help = "Bandwidth limit in bytes")]
    pub(crate) bandwidth_limit: Option<i64>,
    #[arg(short = 's', long, help = "Storage limit in bytes")]
    pub(crate) storage_limit: Option<i64>,
    #[arg(short = 'c', long, help = "Free-form comment")]
    pub(crate) comments: Option<String>,
}

#[derive(Args)]
pub(crate) struct RepositoryArgs {
    #[arg(
        short = 'w',
        long,
        global = true,
        help = "Workspace holding the repositories (identifier or name)"
    )]
    pub(crate) workspace: Option<String>,
    #[command(subcommand)]
    pub(crate) command: RepositoryCommand,
}

#[derive(Subcommand)]
pub(crate) enum RepositoryCommand {
    /// List repositories in the workspace
    List,
    /// Show one repository
    Get(NameArgs),
    /// List packages stored in a repository
    Packages(NameArgs),
    /// Delete a repository
    Delete(NameArgs),
    /// Delete every package stored in a repository
    Prune(NameArgs),
    /// Create a local, remote or virtual repository
    Create(RepositoryCreateArgs),
}

#[derive(Args)]
pub(crate) struct RepositoryCreateArgs {
    #[arg(
        short = 't',
        long = "type",
        global = true,
        help = "Package type (npm, maven, docker, ...)"
    )]
    pub(crate) package_type: Option<String>,
    #[command(subcommand)]
    pub(crate) store: CreateStoreCommand,
}

#[derive(Subcommand)]
pub(crate) enum CreateStoreCommand {
    /// Repository holding uploaded packages
    Local(LocalCreateArgs),
    /// Caching proxy for an upstream registry
    Remote(RemoteCreateArgs),
    /// Single endpoint aggregating other repositories
    Virtual(VirtualCreateArgs),
}

#[derive(Args)]
pub(crate) struct LocalCreateArgs {
    #[arg(help = "Repository name")]
    pub(crate) name: String,
}

#[derive(Args)]
pub(crate) struct RemoteCreateArgs {
    #[arg(help = "Repository name")]
    pub(crate) name: String,
    #[arg(short = 'r', long, help = "Upstream registry URL")]
    pub(crate) remote_url: String,
    #[arg(short = 'u', long, help = "Upstream username")]
    pub(crate) remote_username: String,
    #[arg(short = 'p', long, help = "Upstream password")]
    pub(crate) remote_password: Option<String>,
    #[arg(short = 'c', long, help = "Cache upstream artifacts")]
    pub(crate) cache: bool,
    #[arg(
        long = "file-cache-ttr",
        allow_negative_numbers = true,
        help = "Milliseconds before cached files are revalidated (negative: never)"
    )]
    pub(crate) file_cache_ttr: Option<i64>,
    #[arg(
        long = "metadata-cache-ttr",
        allow_negative_numbers = true,
        help = "Milliseconds before cached metadata is revalidated (negative: never)"
    )]
    pub(crate) metadata_cache_ttr: Option<i64>,
}

#[derive(Args)]
pub(crate) struct VirtualCreateArgs {
    #[arg(help = "Repository name")]
    pub(crate) name: String,
    #[arg(
        short = 'r',
        long = "child-repository",
        value_delimiter = ',',
        required = true,
        help = "Child repository identifiers"
    )]
    pub(crate) child_repositories: Vec<String>,
    #[arg(
        long = "local-repository",
        help = "Local child receiving uploads (must also be a child repository)"
    )]
    pub(crate) local_repository: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("repoflow").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommands() {
        let cli = parse(&["workspace", "list", "--output", "json", "--debug"]);
        assert!(cli.debug);
        assert_eq!(OutputFormat::from_flag(&cli.output), OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Command::Workspace(WorkspaceCommand::List)
        ));
    }

    #[test]
    fn output_defaults_to_text_and_accepts_unknown_values() {
        assert_eq!(parse(&["workspace", "list"]).output, "text");
        let cli = parse(&["--output", "xml", "workspace", "list"]);
        assert_eq!(OutputFormat::from_flag(&cli.output), OutputFormat::Text);
    }

    #[test]
    fn output_flag_advertises_known_formats() {
        let command = Cli::command();
        let output = command
            .get_arguments()
            .find(|arg| arg.get_id() == "output")
            .expect("output flag");
        let names: Vec<String> = output
            .get_possible_values()
            .iter()
            .map(|value| value.get_name().to_string())
            .collect();
        assert_eq!(names, ["text", "yaml", "json"]);
    }

    #[test]
    fn workspace_flag_is_accepted_before_or_after_subcommand() {
        let before = parse(&["repository", "-w", "main", "get", "libs"]);
        let after = parse(&["repository", "get", "libs", "--workspace", "main"]);
        for cli in [before, after] {
            let Command::Repository(args) = cli.command else {
                panic!("expected repository command");
            };
            assert_eq!(args.workspace.as_deref(), Some("main"));
            assert!(matches!(args.command, RepositoryCommand::Get(ref name) if name.name == "libs"));
        }
    }

    #[test]
    fn missing_workspace_is_a_validation_error() {
        let err = required_flag(None, "--workspace").expect_err("absent flag");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "--workspace is required");
        assert!(required_flag(Some("  ".to_string()), "--workspace").is_err());
        assert_eq!(
            required_flag(Some(" main ".to_string()), "--workspace").expect("present"),
            "main"
        );
    }

    #[test]
    fn remote_create_accepts_negative_ttr() {
        let cli = parse(&[
            "repository",
            "-w",
            "main",
            "create",
            "-t",
            "npm",
            "remote",
            "npmjs",
            "-r",
            "https://registry.npmjs.org",
            "-u",
            "bot",
            "-c",
            "--file-cache-ttr",
            "-1",
            "--metadata-cache-ttr",
            "60000",
        ]);
        let Command::Repository(RepositoryArgs {
            command: RepositoryCommand::Create(create),
            ..
        }) = cli.command
        else {
            panic!("expected repository create");
        };
        assert_eq!(create.package_type.as_deref(), Some("npm"));
        let CreateStoreCommand::Remote(remote) = create.store else {
            panic!("expected remote store");
        };
        assert!(remote.cache);
        assert_eq!(remote.remote_username, "bot");
        assert_eq!(remote.file_cache_ttr, Some(-1));
        assert_eq!(remote.metadata_cache_ttr, Some(60_000));
    }

    #[test]
    fn virtual_create_splits_child_list() {
        let cli = parse(&[
            "repository",
            "create",
            "virtual",
            "all-npm",
            "-r",
            "l1,r1",
            "-r",
            "r2",
            "--local-repository",
            "l1",
            "--type",
            "npm",
            "-w",
            "main",
        ]);
        let Command::Repository(RepositoryArgs {
            workspace,
            command: RepositoryCommand::Create(create),
        }) = cli.command
        else {
            panic!("expected repository create");
        };
        assert_eq!(workspace.as_deref(), Some("main"));
        assert_eq!(create.package_type.as_deref(), Some("npm"));
        let CreateStoreCommand::Virtual(args) = create.store else {
            panic!("expected virtual store");
        };
        assert_eq!(args.child_repositories, ["l1", "r1", "r2"]);
        assert_eq!(args.local_repository.as_deref(), Some("l1"));
    }

    #[test]
    fn virtual_create_requires_children() {
        let result = Cli::try_parse_from([
            "repoflow", "repository", "-w", "main", "create", "-t", "npm", "virtual", "all",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn command_labels_name_the_operation() {
        let cli = parse(&["repository", "-w", "main", "prune", "libs"]);
        assert_eq!(command_label(&cli.command), "repository_prune");
        let cli = parse(&["workspace", "create", "team", "-p", "10"]);
        assert_eq!(command_label(&cli.command), "workspace_create");
    }
}
