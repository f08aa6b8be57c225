use anyhow::Result;

fn main() -> Result<()> {
    tfget::cli::run()
}
