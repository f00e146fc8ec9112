use scripture_seal::cli;
use scripture_seal::Result;

fn main() -> Result<()> {
    cli::run()
}
