//! Binary entrypoint for the `repoflow` command.

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = repoflow_cli::run().await;
    if code != 0 {
        std::process::exit(code);
    }
}
