use clap::Parser;

#[derive(Parser)]
#[command(
    name = "typed-array",
    about = "Run the typed collection sample workload and report timings",
    version
)]
pub struct Cli {
    /// Number of integers in the sample list
    #[arg(short, long, default_value_t = 10_000)]
    pub length: i64,

    /// Print the report as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}
