//! `FoxLba` CLI binary

fn main() -> anyhow::Result<()> {
    foxlba::cli::run_cli()
}
