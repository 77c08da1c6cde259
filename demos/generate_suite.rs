//! Example: Generate a labeled fixture suite across all five scenarios.
//!
//! Run with: cargo run --example generate_suite

use fencewave::{
    generate_dataset, output_file_name, GenerationConfig, GenerationManifest, Scenario,
};

fn main() {
    println!("Fencewave Fixture Suite");
    println!("=======================\n");

    let scenarios = [
        (Scenario::Normal, None),
        (Scenario::short(), None),
        (Scenario::Cut, Some(3.0)),
        (Scenario::arcing(), None),
        (Scenario::intermittent(), None),
    ];

    for (scenario, cutoff) in scenarios {
        let mut config = GenerationConfig::new()
            .with_duration_s(6.0)
            .with_sample_rate_hz(20_000.0)
            .with_scenario(scenario)
            .with_seed(42);
        if let Some(cutoff) = cutoff {
            config = config.with_cutoff_s(cutoff);
        }

        let dataset = match generate_dataset(&config) {
            Ok(ds) => ds,
            Err(e) => {
                eprintln!("  Error generating {}: {}", config.scenario.label(), e);
                continue;
            }
        };

        let label = config.scenario.label();
        let name = output_file_name(label, chrono::Utc::now());
        let csv_path = format!("fixtures/{}", name);
        if let Err(e) = dataset.to_csv(&csv_path) {
            eprintln!("  Warning: Could not save {}: {}", csv_path, e);
            continue;
        }
        println!(
            "  Created {} ({} samples, expected alert {:?})",
            csv_path,
            dataset.len(),
            config.scenario.expected_alert()
        );

        let manifest_path = csv_path.replace(".csv", ".manifest.json");
        if let Err(e) = GenerationManifest::new(&config, &dataset).save(&manifest_path) {
            eprintln!("  Warning: Could not save {}: {}", manifest_path, e);
        }
    }

    println!("\nAll fixtures generated.");
}
