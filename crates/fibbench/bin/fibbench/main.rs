mod logging;

use clap::Parser;
use eyre::Result;
use fibbench::{Format, HarnessBuilder, DEFAULT_ITERATIVE_N, DEFAULT_RECURSIVE_N};

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "fibbench: time a naive recursive and a linear iterative Fibonacci computation.

Run without arguments to print the classic three-line summary."
)]
pub struct BenchArgs {
    #[arg(
        long,
        env = "FIBBENCH_FORMAT",
        default_value_t = Format::Text,
        help = "Report format: text, table, json or json-pretty"
    )]
    pub format: Format,

    #[arg(
        long,
        env = "FIBBENCH_RECURSIVE_N",
        default_value_t = DEFAULT_RECURSIVE_N,
        allow_negative_numbers = true,
        help = "Fibonacci index for the recursive benchmark"
    )]
    pub recursive_n: i32,

    #[arg(
        long,
        env = "FIBBENCH_ITERATIVE_N",
        default_value_t = DEFAULT_ITERATIVE_N,
        allow_negative_numbers = true,
        help = "Fibonacci index for the iterative benchmark"
    )]
    pub iterative_n: i32,

    #[arg(
        long,
        env = "FIBBENCH_RUNS",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Timed invocations per benchmark"
    )]
    pub runs: u32,

    #[arg(
        long,
        value_delimiter = ',',
        default_value = "95",
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Comma separated percentiles for table and JSON output"
    )]
    pub percentiles: Vec<u8>,
}

impl BenchArgs {
    pub fn run(&self) -> Result<()> {
        tracing::debug!(args = ?self, "starting benchmark run");

        let harness = HarnessBuilder::new("fibbench")
            .recursive_n(self.recursive_n)
            .iterative_n(self.iterative_n)
            .runs(self.runs)
            .percentiles(&self.percentiles)
            .format(self.format)
            .build();

        harness
            .run_and_report()
            .map_err(|e| eyre::eyre!("Failed to write report: {}", e))?;

        Ok(())
    }
}

fn main() -> Result<()> {
    logging::init_logging();

    let args = BenchArgs::parse();
    args.run()
}
