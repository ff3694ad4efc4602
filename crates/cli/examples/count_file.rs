use hashprobe_core::{report, CollisionCounter};
use hashprobe_formats::open_pairs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/test_pairs.txt".to_string());

    println!("Input: {}\n", input_file);

    let mut reader = open_pairs(&input_file)?;
    let mut counter = CollisionCounter::new();

    for record in reader.by_ref() {
        let record = record?;
        counter.insert_record(&record);
    }
    println!("Skipped {} malformed lines", reader.malformed_lines());

    let collision_report = counter.finish();

    println!("\nLargest groups:");
    for group in collision_report.groups.iter().take(5) {
        println!("  {} ({} values): {}", group.hash, group.size(), group.data.join(", "));
    }

    println!("\nSummary:");
    println!("  {}", report::summary_line(&collision_report.stats));
    println!("  {}", report::totals_line(&collision_report.stats));

    Ok(())
}
