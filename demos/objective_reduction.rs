//! Objective reduction example: how many of your objectives are really distinct?
//!
//! This example samples a synthetic many-objective problem (8 objectives driven
//! by 3 hidden design factors) and reports:
//!
//! - Eigenvalue spectrum of the correlation matrix and the significant components.
//! - Correlated groups and their representatives.
//! - Per-representative loss (trace of the correlation matrix without it).
//! - The same reduction on an RBF kernel similarity matrix.
//!
//! Run: `cargo run --example objective_reduction`

use cull::{
    correlation_matrix, reduce, KernelConfig, Reduction, ReductionConfig, SampleMatrix,
};
use rand::prelude::*;

fn print_reduction(names: &[&str], r: &Reduction) {
    println!(
        "{:>5}  {:>12}  {:>10}  {:>12}",
        "k", "eigenvalue", "% variance", "cumulative %"
    );
    println!("{}", "-".repeat(46));
    let mut cumul = 0.0;
    for (i, (&ev, &ratio)) in r.eigenvalues.iter().zip(&r.explained_variance).enumerate() {
        cumul += 100.0 * ratio;
        let mark = if r.variance_report.contains(&i) { "*" } else { " " };
        println!(
            "{:>4}{}  {:>12.4}  {:>9.2}%  {:>11.2}%",
            i + 1,
            mark,
            ev,
            100.0 * ratio,
            cumul
        );
    }
    println!(
        "  {} significant components explain {:.1}%",
        r.variance_report.len(),
        100.0 * r.explained_by_significant()
    );

    println!("\nGroups:");
    for ((g, &rep), &loss) in r.groups.iter().zip(&r.representatives).zip(&r.loss_report) {
        let members: Vec<&str> = g.members().iter().map(|&j| names[j]).collect();
        println!(
            "  anchor {:<10} {:<48} -> {:<10} (loss {:.2})",
            names[g.anchor()],
            members.join(", "),
            names[rep],
            loss
        );
    }

    let kept: Vec<&str> = r.retained_objectives().iter().map(|&j| names[j]).collect();
    let dropped: Vec<&str> = r
        .discarded_objectives(names.len())
        .iter()
        .map(|&j| names[j])
        .collect();
    println!("\nRetained ({}): {}", kept.len(), kept.join(", "));
    println!("Discarded ({}): {}", dropped.len(), dropped.join(", "));
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Objective Reduction ===\n");

    // ---------------------------------------------------------------
    // Sample: 200 solutions, 3 hidden factors, 8 objectives
    // ---------------------------------------------------------------
    let names = [
        "cost",
        "cost_eur",
        "mass",
        "log_mass",
        "drag",
        "noise",
        "latency",
        "energy",
    ];
    let mut rng = StdRng::seed_from_u64(7);
    let rows: Vec<Vec<f64>> = (0..200)
        .map(|_| {
            let a = rng.random::<f64>();
            let b = rng.random::<f64>();
            let c = rng.random::<f64>();
            let eps = |rng: &mut StdRng| 0.02 * (rng.random::<f64>() - 0.5);
            vec![
                3.0 * a + 1.0,
                0.92 * (3.0 * a + 1.0),
                2.0 * b + eps(&mut rng),
                (1.0 + 2.0 * b).ln(),
                b * b + 0.5 * c,
                c + eps(&mut rng),
                // falls as cost rises
                1.0 / (0.5 + a) + eps(&mut rng),
                a + b + c,
            ]
        })
        .collect();
    let samples = SampleMatrix::try_new(&rows).expect("synthetic sample is well-formed");

    // ---------------------------------------------------------------
    // Correlation matrix
    // ---------------------------------------------------------------
    let corr = correlation_matrix(&samples).expect("no constant objectives");
    println!("Correlation matrix:");
    print!("{:>10}", "");
    for name in &names {
        print!("  {:>8}", &name[..name.len().min(8)]);
    }
    println!();
    for (i, name) in names.iter().enumerate() {
        print!("{:>10}", name);
        for j in 0..names.len() {
            print!("  {:>8.3}", corr.get(i, j));
        }
        println!();
    }

    // ---------------------------------------------------------------
    // Linear reduction
    // ---------------------------------------------------------------
    let config = ReductionConfig::default().with_correlation_threshold(0.9);
    println!("\n--- Pearson correlation, threshold 0.9 ---\n");
    let linear = reduce(&samples, &config).expect("reduction succeeds");
    print_reduction(&names, &linear);

    // ---------------------------------------------------------------
    // Kernel reduction
    // ---------------------------------------------------------------
    let config = config.with_kernel(KernelConfig::default().with_gamma(0.5));
    println!("\n--- RBF kernel (gamma 0.5), threshold 0.9 ---\n");
    let kernel = reduce(&samples, &config).expect("reduction succeeds");
    print_reduction(&names, &kernel);
}
