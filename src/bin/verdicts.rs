use anyhow::Result;

fn main() -> Result<()> {
    oraclebox::cli::run(oraclebox::cli::CliMode::Verdicts)
}
