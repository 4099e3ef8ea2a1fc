fn main() -> anyhow::Result<()> {
    quality_cli::run()
}
