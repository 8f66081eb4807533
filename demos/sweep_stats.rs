use clap::{Args, Parser};
use tracing_subscriber::EnvFilter;

use planesweep::{generators, Segments, Sweeper};

#[derive(Parser)]
#[command(about = "Sweeps over a synthetic input and prints what it found")]
struct Cli {
    #[command(flatten)]
    input: Input,

    /// Print the full report (including every intersection point) as YAML.
    #[arg(long)]
    report: bool,

    /// Also compare against the quadratic brute-force search.
    #[arg(long)]
    check: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Input {
    /// `n` rising segments crossing `n` falling ones.
    #[arg(long)]
    lattice: Option<usize>,

    /// `n` disjoint crossing pairs.
    #[arg(long)]
    crosses: Option<usize>,

    /// `n` segments that all cross one another.
    #[arg(long)]
    fan: Option<usize>,
}

fn get_coords(input: &Input) -> Vec<[i64; 4]> {
    match (input.lattice, input.crosses, input.fan) {
        (Some(n), None, None) => generators::lattice(n),
        (None, Some(n), None) => generators::crosses(n),
        (None, None, Some(n)) => generators::fan(n),
        _ => unreachable!(),
    }
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Cli::parse();
    let segs = Segments::from_coords(get_coords(&args.input))?;
    tracing::info!(segments = segs.len(), bbox = ?segs.bounding_box(), "sweeping");

    let start = std::time::Instant::now();
    let report = Sweeper::new(&segs).run()?;
    let elapsed = start.elapsed();

    println!("segments:      {}", segs.len());
    println!("events:        {}", report.events);
    println!("intersections: {}", report.intersection_count());
    println!("elapsed:       {elapsed:?}");

    if args.check {
        let expected = segs.pairwise_intersections()?.len();
        if expected != report.intersection_count() {
            anyhow::bail!(
                "brute force found {expected} intersections, but the sweep found {}",
                report.intersection_count()
            );
        }
        println!("brute force agrees");
    }

    if args.report {
        print!("{}", serde_yaml::to_string(&report)?);
    }

    Ok(())
}
