//! Show how a name run shrinks as its arc gets narrower.

use fanchart::render::label::{Segment, TextRun};
use fanchart::render::truncate::fit_run;
use fanchart::{ProportionalMeasure, Px, RunKind};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let measure = ProportionalMeasure::default();
    for width in [200.0, 120.0, 80.0, 40.0, 10.0] {
        let mut run = TextRun::new(
            RunKind::FirstNames,
            vec![
                Segment::new("Johann", false),
                Segment::new("Wolfgang", true).with_dx(0.25),
                Segment::new("Maximilian", false).with_dx(0.25),
            ],
        );
        let outcome = fit_run(&mut run, Px(width), &measure);
        println!("{:>6} {:<10} {}", width, format!("{:?}", outcome), run.text());
    }
}
