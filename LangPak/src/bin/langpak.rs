fn main() -> anyhow::Result<()> {
    langpak::cli::run_cli()
}
